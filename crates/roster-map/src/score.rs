//! String scoring used by the fuzzy stages of header matching.

use std::collections::BTreeSet;

use rapidfuzz::distance::levenshtein;

/// Lowercase and drop whitespace and separators: `"Client_ID "` becomes `"clientid"`.
pub fn compact(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalized edit-distance similarity in `0.0..=1.0` of the compacted forms.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = compact(a);
    let b = compact(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    levenshtein::normalized_similarity(a.chars(), b.chars())
}

/// Split on whitespace, `_`, `-`, and lower-to-upper case transitions.
///
/// `"MaxLoadPerPhase"` yields `max load per phase`; acronyms stay whole so
/// `"RequestedTaskIDs"` yields `requested task ids`.
pub fn tokens(raw: &str) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for word in raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-') {
        let mut current = String::new();
        let mut prev_lower = false;
        for ch in word.chars() {
            if ch.is_uppercase() && prev_lower && !current.is_empty() {
                out.insert(std::mem::take(&mut current).to_lowercase());
            }
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
            if ch.is_alphanumeric() {
                current.push(ch);
            }
        }
        if !current.is_empty() {
            out.insert(current.to_lowercase());
        }
    }
    out
}

/// Shared tokens over the larger token set.
pub fn overlap_ratio(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let largest = a.len().max(b.len());
    if largest == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / largest as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn compact_strips_separators() {
        assert_eq!(compact(" Client_ID "), "clientid");
        assert_eq!(compact("Max-Load per Phase"), "maxloadperphase");
    }

    #[test]
    fn similarity_bounds() {
        assert_eq!(similarity("Client ID", "ClientID"), 1.0);
        assert_eq!(similarity("", "ClientID"), 0.0);
        let near = similarity("ClientNme", "ClientName");
        assert!(near > 0.8 && near < 1.0);
        assert!(similarity("zzzz", "Duration") < 0.6);
    }

    #[test]
    fn camel_and_separator_tokens() {
        assert_eq!(tokens("MaxLoadPerPhase"), set(&["max", "load", "per", "phase"]));
        assert_eq!(tokens("RequestedTaskIDs"), set(&["requested", "task", "ids"]));
        assert_eq!(tokens("max_load-per phase"), set(&["max", "load", "per", "phase"]));
        assert_eq!(tokens("AttributesJSON"), set(&["attributes", "json"]));
    }

    #[test]
    fn overlap_uses_larger_set() {
        let header = set(&["load", "max"]);
        let field = set(&["max", "load", "per", "phase"]);
        assert_eq!(overlap_ratio(&header, &field), 0.5);
        assert_eq!(overlap_ratio(&set(&[]), &set(&[])), 0.0);
    }
}
