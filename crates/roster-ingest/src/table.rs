//! Header row plus string records, the only shape extraction produces.

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use crate::format::FileFormat;

/// One input row: ordered `(header, value)` pairs.
///
/// Headers may repeat; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    cells: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Value under the first header equal to `header`.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(header, value)| (header.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.trim().is_empty())
    }

    pub fn into_cells(self) -> Vec<(String, String)> {
        self.cells
    }
}

/// Extracted table: trimmed headers and one record per non-blank data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub format: FileFormat,
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    /// Build a table from positional rows. The first non-blank row is the header.
    pub(crate) fn from_rows(format: FileFormat, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut rows = rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()));

        let header_row = rows.next().ok_or(IngestError::NoHeader)?;
        let headers: Vec<String> = header_row
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let trimmed = header.trim();
                if trimmed.is_empty() {
                    format!("Column{}", idx + 1)
                } else {
                    trimmed.to_string()
                }
            })
            .collect();

        let records = rows
            .map(|row| {
                let mut values = row.into_iter();
                let cells = headers
                    .iter()
                    .map(|header| (header.clone(), values.next().unwrap_or_default()))
                    .collect();
                RawRecord::new(cells)
            })
            .collect();

        Ok(Self {
            format,
            headers,
            rows: records,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
