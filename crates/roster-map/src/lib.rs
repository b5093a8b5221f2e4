//! Header mapping for roster uploads.
//!
//! Proposes a canonical field for every raw header of one entity kind, with a
//! confidence score and the stage that matched:
//!
//! 1. exact alias (1.0)
//! 2. case-insensitive alias (0.95)
//! 3. edit-distance similarity against names and aliases (> 0.6)
//! 4. token overlap against canonical names (> 0.4)
//!
//! Proposals above 0.8 are accepted automatically; the rest stay pending until
//! confirmed or overridden.

mod aliases;
mod error;
mod mapper;
mod score;

pub use aliases::{ALIAS_TABLE_VERSION, aliases, aliases_for};
pub use error::{MapError, Result};
pub use mapper::{
    HeaderMapper, HeaderMapping, MappingPolicy, PARTIAL_WORD_THRESHOLD, SIMILARITY_THRESHOLD,
    map_headers,
};
pub use score::{compact, overlap_ratio, similarity, tokens};
