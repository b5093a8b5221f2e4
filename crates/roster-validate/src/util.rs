//! Utility types for validation.

use std::collections::BTreeMap;

/// A set that performs case-insensitive lookups but preserves original names.
///
/// Used for skill names, which match regardless of case.
#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveSet {
    /// Maps lowercase name -> first original spelling
    inner: BTreeMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; the first spelling seen is kept.
    pub fn insert(&mut self, value: impl AsRef<str>) {
        let s = value.as_ref().trim();
        self.inner
            .entry(s.to_lowercase())
            .or_insert_with(|| s.to_string());
    }

    /// Check if the set contains a value (case-insensitive).
    pub fn contains(&self, value: impl AsRef<str>) -> bool {
        self.inner.contains_key(&value.as_ref().trim().to_lowercase())
    }

    /// True when every value is in the set.
    pub fn contains_all<I, S>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CaseInsensitiveSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_ignore_case_and_whitespace() {
        let set: CaseInsensitiveSet = ["Rust", "SQL", "rust"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("rust"));
        assert!(set.contains(" sql "));
        assert!(set.contains_all(["RUST", "Sql"]));
        assert!(!set.contains_all(["rust", "go"]));
    }
}
