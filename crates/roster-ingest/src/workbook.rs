//! Spreadsheet workbook decoding via calamine. First sheet only.

use std::fmt;
use std::io::{Cursor, Read, Seek};

use calamine::{Data, Reader, Xls, Xlsx};

use crate::error::{IngestError, Result};
use crate::format::FileFormat;
use crate::table::RawTable;

pub(crate) fn read_workbook(bytes: &[u8], format: FileFormat) -> Result<RawTable> {
    let cursor = Cursor::new(bytes);
    let rows = match format {
        FileFormat::Xls => first_sheet(Xls::new(cursor).map_err(workbook_error)?)?,
        _ => first_sheet(Xlsx::new(cursor).map_err(workbook_error)?)?,
    };
    RawTable::from_rows(format, rows)
}

fn workbook_error(err: impl fmt::Display) -> IngestError {
    IngestError::Workbook {
        message: err.to_string(),
    }
}

fn first_sheet<RS, R>(mut workbook: R) -> Result<Vec<Vec<String>>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: fmt::Display,
{
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IngestError::NoSheets)?;

    let range = workbook.worksheet_range(&sheet).map_err(workbook_error)?;
    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return Err(IngestError::EmptySheet { sheet });
    }
    tracing::debug!(sheet = %sheet, rows = height, columns = width, "reading first sheet");

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// Render a cell as text. Integral floats lose their decimal point.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(n) => format_float(*n),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => format_float(dt.as_f64()),
    }
}

fn format_float(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
