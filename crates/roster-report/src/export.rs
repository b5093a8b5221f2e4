//! Cleaned entities back to delimited text.

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};

use roster_model::{Entity, Field, FieldValue};

use crate::error::{ExportError, Result};

/// Header row: union of field names across all entities, first-seen order.
pub fn export_header(entities: &[Entity]) -> Vec<Field> {
    let mut header: Vec<Field> = Vec::new();
    for entity in entities {
        for (field, _) in entity.values() {
            if !header.contains(&field) {
                header.push(field);
            }
        }
    }
    header
}

/// Encode one field with the csv writer's escaping rules.
fn encode_field(value: &str, quote_style: QuoteStyle) -> Result<Vec<u8>> {
    let mut out = WriterBuilder::new()
        .quote_style(quote_style)
        .from_writer(Vec::new());
    out.write_field(value)?;
    out.into_inner().map_err(|err| ExportError::Io(err.into_error()))
}

fn cell(value: &FieldValue) -> Result<Vec<u8>> {
    let quote_style = match value {
        FieldValue::IntList(_) | FieldValue::TextList(_) => QuoteStyle::Always,
        FieldValue::Text(_) | FieldValue::Int(_) => QuoteStyle::Necessary,
    };
    encode_field(&value.to_cell_string(), quote_style)
}

fn write_line<W: Write>(writer: &mut W, cells: Vec<Vec<u8>>) -> Result<()> {
    writer.write_all(&cells.join(&b','))?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write entities as CSV. List fields are comma-joined and always quoted;
/// other values are quoted only when they contain a delimiter or quote.
pub fn export_csv_to_writer<W: Write>(entities: &[Entity], mut writer: W) -> Result<()> {
    let header = export_header(entities);

    if !header.is_empty() {
        let cells = header
            .iter()
            .map(|field| encode_field(field.name(), QuoteStyle::Necessary))
            .collect::<Result<Vec<_>>>()?;
        write_line(&mut writer, cells)?;
    }
    for entity in entities {
        let values = entity.values();
        let cells = header
            .iter()
            .map(|field| match values.iter().find(|(f, _)| f == field) {
                Some((_, value)) => cell(value),
                None => Ok(Vec::new()),
            })
            .collect::<Result<Vec<_>>>()?;
        write_line(&mut writer, cells)?;
    }
    writer.flush()?;

    tracing::debug!(entities = entities.len(), columns = header.len(), "exported csv");
    Ok(())
}

pub fn export_csv(entities: &[Entity]) -> Result<String> {
    let mut buffer = Vec::new();
    export_csv_to_writer(entities, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| {
        ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
