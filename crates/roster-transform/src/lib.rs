//! Entity transformation for roster uploads.
//!
//! Turns mapped rows into typed [`roster_model::Entity`] values. Each row is
//! handled on its own: strings are trimmed, numbers are parsed and clamped
//! into their declared bounds, integer lists lose out-of-range entries, and
//! attribute JSON is syntax-checked. Every repair is reported as a
//! diagnostic; a row that cannot be transformed at all is dropped with one
//! whole-row error.

mod coerce;
mod error;
mod row;
mod rows;

pub use coerce::{
    DEFAULT_NUMBER, IntListParse, ParsedNumber, check_json, clean_text_list, is_valid_id,
    parse_int_list, parse_number, placeholder_id, sanitize_id, split_list,
};
pub use error::TransformError;
pub use row::{MappedRow, RowOutcome, TransformedRow, transform_row};
pub use rows::{TransformOutput, transform_rows};
