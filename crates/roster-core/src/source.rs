use std::path::Path;

use roster_ingest::{IngestError, Result};

/// A named upload: the raw bytes plus the extension the caller declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    /// Lowercase extension without the dot; `None` means sniff the content.
    pub extension: Option<String>,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let extension = Path::new(&name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        Self {
            name,
            extension,
            bytes,
        }
    }

    pub fn with_extension(mut self, extension: Option<&str>) -> Self {
        self.extension = extension.map(|ext| ext.trim_start_matches('.').to_lowercase());
        self
    }

    /// Read a file from disk, rejecting it by size before loading it.
    pub fn from_path(path: &Path, max_bytes: u64) -> Result<Self> {
        let read_error = |source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        };
        let size = std::fs::metadata(path).map_err(read_error)?.len();
        if size > max_bytes {
            return Err(IngestError::TooLarge {
                size,
                max_size: max_bytes,
            });
        }
        let bytes = std::fs::read(path).map_err(read_error)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_name() {
        let file = SourceFile::new("Clients.CSV", b"a".to_vec());
        assert_eq!(file.extension.as_deref(), Some("csv"));

        let file = SourceFile::new("upload", Vec::new());
        assert_eq!(file.extension, None);

        let file = file.with_extension(Some(".XLSX"));
        assert_eq!(file.extension.as_deref(), Some("xlsx"));
    }

    #[test]
    fn from_path_checks_size_first() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("clients.csv");
        std::fs::write(&path, "Client ID\nC001\n").expect("write fixture");

        let err = SourceFile::from_path(&path, 4).expect_err("too large");
        assert!(matches!(err, IngestError::TooLarge { size: 15, max_size: 4 }));

        let file = SourceFile::from_path(&path, 1024).expect("read");
        assert_eq!(file.name, "clients.csv");
        assert_eq!(file.extension.as_deref(), Some("csv"));
    }

    #[test]
    fn from_path_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = SourceFile::from_path(&dir.path().join("gone.csv"), 1024).expect_err("missing");
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
