//! Value coercion helpers.
//!
//! Everything here is total: malformed input produces a typed outcome, never
//! a panic.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Value used when a numeric cell is blank or unparseable.
pub const DEFAULT_NUMBER: i64 = 1;

/// Identifier shape: alphanumeric start, then alphanumerics, `_`, `.` or `-`.
static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*$").expect("Invalid ID regex"));

/// Inclusive integer range token such as `1-3` or `2 - 5`.
static RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*-\s*(\d+)$").expect("Invalid range regex"));

/// Outcome of parsing a numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedNumber {
    Blank,
    Integer(i64),
    /// A non-integral value rounded to the nearest integer.
    Rounded { original: f64, value: i64 },
    Invalid,
}

/// Parse an integer, accepting surrounding whitespace and integral floats.
pub fn parse_number(raw: &str) -> ParsedNumber {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedNumber::Blank;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return ParsedNumber::Integer(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            let rounded = value.round() as i64;
            if value.fract() == 0.0 {
                ParsedNumber::Integer(rounded)
            } else {
                ParsedNumber::Rounded {
                    original: value,
                    value: rounded,
                }
            }
        }
        _ => ParsedNumber::Invalid,
    }
}

/// Whether an identifier has a usable shape.
pub fn is_valid_id(id: &str) -> bool {
    ID_REGEX.is_match(id)
}

/// Strip characters an identifier may not contain. `None` if nothing usable remains.
pub fn sanitize_id(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .skip_while(|c| !c.is_ascii_alphanumeric())
        .collect();
    is_valid_id(&cleaned).then_some(cleaned)
}

/// Deterministic stand-in for a missing identifier: `C` + `AUTO` + 1-based row.
pub fn placeholder_id(prefix: char, row: usize) -> String {
    format!("{prefix}AUTO{:04}", row + 1)
}

/// Split list text on `,` or `;`, or read it as a JSON array when bracketed.
pub fn split_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[')
        && let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(trimmed)
    {
        return values
            .into_iter()
            .map(|value| match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect();
    }
    trimmed
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split([',', ';'])
        .map(str::to_string)
        .collect()
}

/// Trim, drop empty entries, and de-duplicate keeping the first occurrence.
pub fn clean_text_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_string())
        .filter(|item| !item.is_empty() && seen.insert(item.clone()))
        .collect()
}

/// Integer list parsed against inclusive bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntListParse {
    /// In-range values, in input order.
    pub kept: Vec<i64>,
    /// Entries dropped as out of range or unparseable, as written.
    pub dropped: Vec<String>,
}

/// Parse list entries into integers; out-of-range and unparseable entries are dropped.
pub fn parse_int_list<I, S>(items: I, min: i64, max: i64) -> IntListParse
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = IntListParse::default();
    for item in items {
        let token = item.as_ref().trim();
        if token.is_empty() {
            continue;
        }
        if let Some((start, end)) = parse_range(token) {
            if start > end {
                out.dropped.push(token.to_string());
                continue;
            }
            if start < min || end > max {
                out.dropped.push(token.to_string());
            }
            out.kept.extend(start.max(min)..=end.min(max));
            continue;
        }
        match parse_number(token) {
            ParsedNumber::Integer(value) if (min..=max).contains(&value) => out.kept.push(value),
            _ => out.dropped.push(token.to_string()),
        }
    }
    out
}

fn parse_range(token: &str) -> Option<(i64, i64)> {
    let caps = RANGE_REGEX.captures(token)?;
    let start = caps.get(1)?.as_str().parse().ok()?;
    let end = caps.get(2)?.as_str().parse().ok()?;
    Some((start, end))
}

/// JSON syntax check. Blank and `{}` are always accepted.
pub fn check_json(raw: &str) -> Result<(), String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        return Ok(());
    }
    serde_json::from_str::<serde_json::Value>(trimmed)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Render integers as `[1, 2, 3]` for messages.
pub fn format_ints(values: &[i64]) -> String {
    let joined = values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 4 "), ParsedNumber::Integer(4));
        assert_eq!(parse_number("3.0"), ParsedNumber::Integer(3));
        assert_eq!(
            parse_number("2.6"),
            ParsedNumber::Rounded {
                original: 2.6,
                value: 3
            }
        );
        assert_eq!(parse_number(""), ParsedNumber::Blank);
        assert_eq!(parse_number("high"), ParsedNumber::Invalid);
        assert_eq!(parse_number("inf"), ParsedNumber::Invalid);
        assert_eq!(parse_number("-7"), ParsedNumber::Integer(-7));
    }

    #[test]
    fn test_ids() {
        assert!(is_valid_id("C001"));
        assert!(is_valid_id("W-12.a_b"));
        assert!(!is_valid_id("C 001"));
        assert!(!is_valid_id("-C1"));
        assert_eq!(sanitize_id(" C 00#1 ").as_deref(), Some("C001"));
        assert_eq!(sanitize_id("--T9"), Some("T9".to_string()));
        assert_eq!(sanitize_id("???"), None);
        assert_eq!(placeholder_id('W', 0), "WAUTO0001");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b;c"), vec!["a", " b", "c"]);
        assert_eq!(split_list(r#"["x", "y"]"#), vec!["x", "y"]);
        assert_eq!(split_list("[1,2]"), vec!["1", "2"]);
        assert_eq!(split_list("[1, 2"), vec!["1", " 2"]);
    }

    #[test]
    fn test_clean_text_list() {
        assert_eq!(
            clean_text_list([" rust", "", "go ", "rust"]),
            vec!["rust".to_string(), "go".to_string()]
        );
    }

    #[test]
    fn test_parse_int_list() {
        let parsed = parse_int_list(["1", "25", "x", "3"], 1, 20);
        assert_eq!(parsed.kept, vec![1, 3]);
        assert_eq!(parsed.dropped, vec!["25", "x"]);

        let parsed = parse_int_list(["1-3", "5"], 1, 20);
        assert_eq!(parsed.kept, vec![1, 2, 3, 5]);
        assert!(parsed.dropped.is_empty());

        let parsed = parse_int_list(["18-22"], 1, 20);
        assert_eq!(parsed.kept, vec![18, 19, 20]);
        assert_eq!(parsed.dropped, vec!["18-22"]);
    }

    #[test]
    fn test_check_json() {
        assert!(check_json("").is_ok());
        assert!(check_json("{}").is_ok());
        assert!(check_json(r#"{"vip": true}"#).is_ok());
        assert!(check_json("{invalid}").is_err());
    }
}
