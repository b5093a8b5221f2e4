//! Delimited text decoding.

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::Result;
use crate::format::FileFormat;
use crate::table::RawTable;

/// Candidate delimiters, tried in this order.
const DELIMITERS: &[u8] = b",;\t|";

/// Lines inspected when sniffing the delimiter.
const SNIFF_LINES: usize = 10;

/// Decode bytes to text.
///
/// A byte order mark selects its encoding and is stripped. Otherwise UTF-8 is
/// tried first, with Windows-1252 as the fallback for spreadsheet exports.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return decoded.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Pick the delimiter whose field count is most consistent over the first lines.
///
/// Score is (lines matching the first line's field count) times that count;
/// a delimiter must split the first line into at least two fields.
pub fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    let mut best = b',';
    let mut best_score = 0usize;

    for &delimiter in DELIMITERS {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| field_count(line, delimiter))
            .collect();

        let Some(&target) = counts.first() else {
            break;
        };
        if target <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&count| count == target).count();
        let score = consistent * target;
        if score > best_score {
            best_score = score;
            best = delimiter;
        }
    }

    best
}

fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|record| record.ok())
        .map_or(1, |record| record.len())
}

/// Parse delimited text into a raw table.
pub(crate) fn read_delimited(bytes: &[u8]) -> Result<RawTable> {
    let content = decode_text(bytes);
    let delimiter = sniff_delimiter(&content);
    tracing::debug!(delimiter = %char::from(delimiter).escape_default(), "sniffed delimiter");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    RawTable::from_rows(FileFormat::Csv, rows)
}
