//! Container format detection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IngestError, Result};

/// ZIP local file header, the outer container of `xlsx`.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE compound document header, the outer container of legacy `xls`.
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Supported input containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Delimited text (comma, semicolon, tab, or pipe).
    Csv,
    /// Office Open XML workbook.
    Xlsx,
    /// Legacy binary workbook.
    Xls,
}

impl FileFormat {
    /// Resolve a declared extension, case-insensitive, leading dot allowed.
    pub fn from_extension(extension: &str) -> Result<Self> {
        let normalized = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            "xls" => Ok(Self::Xls),
            _ => Err(IngestError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Guess the container from magic bytes, falling back to delimited text.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) {
            Self::Xlsx
        } else if bytes.starts_with(OLE_MAGIC) {
            Self::Xls
        } else {
            Self::Csv
        }
    }

    pub fn is_workbook(&self) -> bool {
        matches!(self, Self::Xlsx | Self::Xls)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_lookup() {
        assert_eq!(FileFormat::from_extension("CSV").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_extension(".xlsx").unwrap(), FileFormat::Xlsx);
        assert_eq!(FileFormat::from_extension("xls").unwrap(), FileFormat::Xls);
        assert!(matches!(
            FileFormat::from_extension("ods"),
            Err(IngestError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn sniff_magic_bytes() {
        assert_eq!(FileFormat::sniff(b"PK\x03\x04rest"), FileFormat::Xlsx);
        assert_eq!(FileFormat::sniff(OLE_MAGIC), FileFormat::Xls);
        assert_eq!(FileFormat::sniff(b"ClientID,ClientName\n"), FileFormat::Csv);
    }
}
