use serde::{Deserialize, Serialize};

/// A raw cell value keyed by canonical field.
///
/// Delimited text always yields `Text`; callers that already hold structured
/// lists (manual edits, other containers) pass `List` and skip splitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    List(Vec<String>),
}

impl CellValue {
    /// True when the cell carries no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::List(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }

    /// Flat text form, lists comma-joined.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::List(items) => items.join(","),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<Vec<String>> for CellValue {
    fn from(value: Vec<String>) -> Self {
        CellValue::List(value)
    }
}
