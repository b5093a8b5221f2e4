//! Header mapping proposals.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::Field;

/// How a raw header was matched to a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchReason {
    Exact,
    CaseInsensitive,
    Similarity,
    PartialWord,
    None,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchReason::Exact => "exact",
            MatchReason::CaseInsensitive => "case-insensitive",
            MatchReason::Similarity => "similarity",
            MatchReason::PartialWord => "partial-word",
            MatchReason::None => "none",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed mapping from one raw header to a canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub raw_header: String,
    /// `None` when the header is unmapped.
    pub canonical_field: Option<Field>,
    /// Certainty in `0.0..=1.0`.
    pub confidence: f64,
    pub reasoning: MatchReason,
    pub accepted: bool,
}

impl FieldMapping {
    /// Confidence above which a mapping is accepted without confirmation.
    pub const AUTO_ACCEPT: f64 = 0.8;

    pub fn matched(raw_header: impl Into<String>, field: Field, confidence: f64, reasoning: MatchReason) -> Self {
        Self {
            raw_header: raw_header.into(),
            canonical_field: Some(field),
            confidence,
            reasoning,
            accepted: confidence > Self::AUTO_ACCEPT,
        }
    }

    pub fn unmapped(raw_header: impl Into<String>) -> Self {
        Self {
            raw_header: raw_header.into(),
            canonical_field: None,
            confidence: 0.0,
            reasoning: MatchReason::None,
            accepted: false,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.canonical_field.is_some()
    }

    /// Mapped but waiting for a caller to confirm it.
    pub fn is_pending(&self) -> bool {
        self.is_mapped() && !self.accepted
    }
}
