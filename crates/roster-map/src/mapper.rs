//! Header mapper: raw headers to canonical fields.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use roster_model::{EntityKind, Field, FieldMapping, MatchReason};

use crate::aliases::{aliases, aliases_for};
use crate::error::{MapError, Result};
use crate::score::{overlap_ratio, similarity, tokens};

/// Confidence for a case-insensitive alias match.
const CASE_INSENSITIVE_CONFIDENCE: f64 = 0.95;
/// Fuzzy similarity must exceed this to propose a field.
pub const SIMILARITY_THRESHOLD: f64 = 0.6;
/// Token overlap must exceed this to propose a field.
pub const PARTIAL_WORD_THRESHOLD: f64 = 0.4;

/// Which proposals the pipeline applies when reading rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingPolicy {
    /// Every proposed mapping, pending or not.
    #[default]
    AcceptAll,
    /// Only accepted mappings (auto-accepted, confirmed, or overridden).
    AcceptedOnly,
}

impl MappingPolicy {
    fn applies(self, mapping: &FieldMapping) -> Option<Field> {
        match self {
            MappingPolicy::AcceptAll => mapping.canonical_field,
            MappingPolicy::AcceptedOnly => mapping.canonical_field.filter(|_| mapping.accepted),
        }
    }
}

/// Proposes canonical fields for the headers of one entity kind.
///
/// Matching is a pure function of the header text, the kind, and the caller
/// overrides: identical inputs always produce identical output.
#[derive(Debug, Clone)]
pub struct HeaderMapper {
    kind: EntityKind,
    overrides: BTreeMap<String, Field>,
}

impl HeaderMapper {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            overrides: BTreeMap::new(),
        }
    }

    /// Force a raw header onto a field. Fields of another kind are ignored.
    pub fn with_override(mut self, raw_header: impl Into<String>, field: Field) -> Self {
        let raw_header = raw_header.into();
        if field.kind() == self.kind {
            self.overrides.insert(raw_header.trim().to_string(), field);
        } else {
            tracing::warn!(
                header = %raw_header,
                field = %field,
                kind = %self.kind,
                "ignoring header override for another entity kind"
            );
        }
        self
    }

    pub fn with_overrides(self, overrides: impl IntoIterator<Item = (String, Field)>) -> Self {
        overrides
            .into_iter()
            .fold(self, |mapper, (raw, field)| mapper.with_override(raw, field))
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Propose a field for one header. First matching stage wins.
    pub fn suggest(&self, raw_header: &str) -> FieldMapping {
        let header = raw_header.trim();

        if let Some(field) = self.overrides.get(header) {
            return FieldMapping::matched(raw_header, *field, 1.0, MatchReason::Exact);
        }

        let table = aliases(self.kind);
        if let Some((_, field)) = table.iter().find(|(alias, _)| *alias == header) {
            return FieldMapping::matched(raw_header, *field, 1.0, MatchReason::Exact);
        }

        let lowered = header.to_lowercase();
        if let Some((_, field)) = table.iter().find(|(alias, _)| alias.to_lowercase() == lowered) {
            return FieldMapping::matched(
                raw_header,
                *field,
                CASE_INSENSITIVE_CONFIDENCE,
                MatchReason::CaseInsensitive,
            );
        }

        if let Some((field, score)) = self.best_similarity(header) {
            return FieldMapping::matched(raw_header, field, score, MatchReason::Similarity);
        }

        if let Some((field, ratio)) = self.best_overlap(header) {
            return FieldMapping::matched(raw_header, field, ratio, MatchReason::PartialWord);
        }

        FieldMapping::unmapped(raw_header)
    }

    /// Highest similarity against canonical names and alias keys; earliest field wins ties.
    fn best_similarity(&self, header: &str) -> Option<(Field, f64)> {
        let mut best: Option<(Field, f64)> = None;
        for field in Field::for_kind(self.kind) {
            let by_name = similarity(header, field.name());
            let by_alias = aliases_for(*field)
                .map(|alias| similarity(header, alias))
                .fold(0.0, f64::max);
            let score = by_name.max(by_alias);
            if score > SIMILARITY_THRESHOLD && best.is_none_or(|(_, top)| score > top) {
                best = Some((*field, score));
            }
        }
        best
    }

    fn best_overlap(&self, header: &str) -> Option<(Field, f64)> {
        let header_tokens = tokens(header);
        if header_tokens.is_empty() {
            return None;
        }
        let mut best: Option<(Field, f64)> = None;
        for field in Field::for_kind(self.kind) {
            let ratio = overlap_ratio(&header_tokens, &tokens(field.name()));
            if ratio > PARTIAL_WORD_THRESHOLD && best.is_none_or(|(_, top)| ratio > top) {
                best = Some((*field, ratio));
            }
        }
        best
    }

    pub fn map_headers(&self, headers: &[String]) -> HeaderMapping {
        let _span = tracing::debug_span!("map_headers", kind = %self.kind, headers = headers.len())
            .entered();

        let suggestions: Vec<FieldMapping> = headers.iter().map(|h| self.suggest(h)).collect();
        let mapping = HeaderMapping::from_suggestions(self.kind, suggestions);

        tracing::debug!(
            mapped = mapping.mapping.len(),
            unmapped = mapping.unmapped.len(),
            pending = mapping.pending().count(),
            "mapped headers"
        );
        mapping
    }
}

/// Map headers with no caller overrides.
pub fn map_headers(headers: &[String], kind: EntityKind) -> HeaderMapping {
    HeaderMapper::new(kind).map_headers(headers)
}

/// Mapper output: one suggestion per header, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderMapping {
    pub kind: EntityKind,
    /// Every proposed mapping, keyed by raw header.
    pub mapping: BTreeMap<String, Field>,
    pub suggestions: Vec<FieldMapping>,
    pub unmapped: Vec<String>,
}

impl HeaderMapping {
    fn from_suggestions(kind: EntityKind, suggestions: Vec<FieldMapping>) -> Self {
        let mut mapping = Self {
            kind,
            mapping: BTreeMap::new(),
            suggestions,
            unmapped: Vec::new(),
        };
        mapping.rebuild();
        mapping
    }

    fn rebuild(&mut self) {
        self.mapping.clear();
        self.unmapped.clear();
        for suggestion in &self.suggestions {
            match suggestion.canonical_field {
                Some(field) => {
                    self.mapping
                        .entry(suggestion.raw_header.clone())
                        .or_insert(field);
                }
                None => self.unmapped.push(suggestion.raw_header.clone()),
            }
        }
    }

    /// Accept the pending proposal for a header.
    pub fn confirm(&mut self, raw_header: &str) -> Result<()> {
        let mut found = false;
        for suggestion in self
            .suggestions
            .iter_mut()
            .filter(|s| s.raw_header == raw_header)
        {
            found = true;
            if suggestion.is_mapped() {
                suggestion.accepted = true;
            }
        }
        if found {
            Ok(())
        } else {
            Err(MapError::UnknownHeader(raw_header.to_string()))
        }
    }

    /// Replace the proposal for a header with a caller-chosen field.
    pub fn override_field(&mut self, raw_header: &str, field: Field) -> Result<()> {
        if field.kind() != self.kind {
            return Err(MapError::WrongKind {
                field,
                kind: self.kind,
            });
        }
        let mut found = false;
        for suggestion in self
            .suggestions
            .iter_mut()
            .filter(|s| s.raw_header == raw_header)
        {
            found = true;
            *suggestion = FieldMapping::matched(raw_header, field, 1.0, MatchReason::Exact);
        }
        if !found {
            return Err(MapError::UnknownHeader(raw_header.to_string()));
        }
        self.rebuild();
        Ok(())
    }

    pub fn pending(&self) -> impl Iterator<Item = &FieldMapping> {
        self.suggestions.iter().filter(|s| s.is_pending())
    }

    /// Field read from each column, positionally.
    ///
    /// When several columns target one field, only the first supplies it.
    pub fn columns(&self, policy: MappingPolicy) -> Vec<Option<Field>> {
        let mut taken = BTreeSet::new();
        self.suggestions
            .iter()
            .map(|s| policy.applies(s).filter(|field| taken.insert(*field)))
            .collect()
    }

    /// Headers whose target field is already supplied by an earlier column.
    pub fn shadowed(&self, policy: MappingPolicy) -> Vec<(String, Field)> {
        let mut taken = BTreeSet::new();
        self.suggestions
            .iter()
            .filter_map(|s| {
                let field = policy.applies(s)?;
                (!taken.insert(field)).then(|| (s.raw_header.clone(), field))
            })
            .collect()
    }

    /// Raw header to field for the columns actually read.
    pub fn applied(&self, policy: MappingPolicy) -> BTreeMap<String, Field> {
        self.suggestions
            .iter()
            .zip(self.columns(policy))
            .filter_map(|(s, field)| field.map(|f| (s.raw_header.clone(), f)))
            .collect()
    }

    /// Required fields (identifier and name) no column supplies.
    pub fn missing_required(&self, policy: MappingPolicy) -> Vec<Field> {
        let present: BTreeSet<Field> = self.columns(policy).into_iter().flatten().collect();
        Field::required(self.kind)
            .into_iter()
            .filter(|field| !present.contains(field))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn stage_order() {
        let mapper = HeaderMapper::new(EntityKind::Client);

        let exact = mapper.suggest("client_id");
        assert_eq!(exact.canonical_field, Some(Field::ClientId));
        assert_eq!(exact.reasoning, MatchReason::Exact);
        assert_eq!(exact.confidence, 1.0);

        let ci = mapper.suggest("CLIENTNAME");
        assert_eq!(ci.reasoning, MatchReason::CaseInsensitive);
        assert_eq!(ci.confidence, 0.95);
        assert!(ci.accepted);

        let fuzzy = mapper.suggest("Priorty Lvl");
        assert_eq!(fuzzy.canonical_field, Some(Field::PriorityLevel));
        assert_eq!(fuzzy.reasoning, MatchReason::Similarity);
        assert!(fuzzy.confidence > SIMILARITY_THRESHOLD);

        let none = mapper.suggest("Favourite Colour");
        assert_eq!(none.canonical_field, None);
        assert_eq!(none.confidence, 0.0);
    }

    #[test]
    fn partial_word_match_stays_pending() {
        let mapper = HeaderMapper::new(EntityKind::Worker);
        let suggestion = mapper.suggest("phase load cap");
        assert_eq!(suggestion.canonical_field, Some(Field::MaxLoadPerPhase));
        assert_eq!(suggestion.reasoning, MatchReason::PartialWord);
        assert_eq!(suggestion.confidence, 0.5);
        assert!(!suggestion.accepted);
    }

    #[test]
    fn override_wins_over_aliases() {
        let mapper = HeaderMapper::new(EntityKind::Task)
            .with_override("Name", Field::Category)
            .with_override("Other", Field::ClientName);
        assert_eq!(mapper.suggest("Name").canonical_field, Some(Field::Category));
        assert_eq!(mapper.suggest("Other").canonical_field, None);
    }

    #[test]
    fn columns_keep_first_duplicate() {
        let mapping = map_headers(&headers(&["TaskID", "task_id", "TaskName"]), EntityKind::Task);
        assert_eq!(
            mapping.columns(MappingPolicy::AcceptAll),
            vec![Some(Field::TaskId), None, Some(Field::TaskName)]
        );
        assert_eq!(
            mapping.shadowed(MappingPolicy::AcceptAll),
            vec![("task_id".to_string(), Field::TaskId)]
        );
    }

    #[test]
    fn accepted_only_policy_skips_pending() {
        let mut mapping = map_headers(&headers(&["WorkerID", "phase load cap"]), EntityKind::Worker);
        assert_eq!(
            mapping.columns(MappingPolicy::AcceptedOnly),
            vec![Some(Field::WorkerId), None]
        );
        mapping.confirm("phase load cap").unwrap();
        assert_eq!(
            mapping.columns(MappingPolicy::AcceptedOnly),
            vec![Some(Field::WorkerId), Some(Field::MaxLoadPerPhase)]
        );
        assert!(mapping.confirm("missing").is_err());
    }

    #[test]
    fn override_field_updates_mapping() {
        let mut mapping = map_headers(&headers(&["ClientID", "Notes"]), EntityKind::Client);
        assert_eq!(mapping.unmapped, vec!["Notes".to_string()]);
        mapping.override_field("Notes", Field::ClientName).unwrap();
        assert!(mapping.unmapped.is_empty());
        assert_eq!(mapping.mapping.get("Notes"), Some(&Field::ClientName));
        assert!(mapping.missing_required(MappingPolicy::AcceptedOnly).is_empty());
        assert_eq!(
            mapping.override_field("Notes", Field::TaskId),
            Err(MapError::WrongKind {
                field: Field::TaskId,
                kind: EntityKind::Client
            })
        );
    }

    #[test]
    fn missing_required_fields() {
        let mapping = map_headers(&headers(&["Priority"]), EntityKind::Client);
        assert_eq!(
            mapping.missing_required(MappingPolicy::AcceptAll),
            vec![Field::ClientId, Field::ClientName]
        );
    }
}
