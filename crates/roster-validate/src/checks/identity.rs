//! Identifier uniqueness and prefix convention.

use std::collections::HashMap;

use roster_model::{EntityCollections, EntityKind, Field, IssueCode, ValidationError};

/// Every occurrence of an ID after the first is an error. Blank IDs count
/// as one shared value.
pub fn duplicates(collections: &EntityCollections) -> Vec<ValidationError> {
    let mut issues = Vec::new();
    for kind in EntityKind::ALL {
        let field = Field::id_field(kind);
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        for (idx, entity) in collections.entities(kind).iter().enumerate() {
            let id = entity.id().trim();
            match first_seen.get(id) {
                Some(first) => issues.push(
                    ValidationError::new(
                        IssueCode::DuplicateId,
                        kind,
                        id,
                        idx,
                        field.name(),
                        if id.is_empty() {
                            format!("Blank {field} (also blank in row {})", first + 1)
                        } else {
                            format!("Duplicate {field} '{id}' (first used by row {})", first + 1)
                        },
                    )
                    .with_fix(format!("Give this {kind} a unique {field}")),
                ),
                None => {
                    first_seen.insert(id.to_string(), idx);
                }
            }
        }
    }
    issues
}

/// IDs are expected to start with the kind's letter.
pub fn prefixes(collections: &EntityCollections) -> Vec<ValidationError> {
    let mut issues = Vec::new();
    for kind in EntityKind::ALL {
        let field = Field::id_field(kind);
        let prefix = kind.id_prefix();
        for (idx, entity) in collections.entities(kind).iter().enumerate() {
            let id = entity.id();
            let matches = id
                .chars()
                .next()
                .is_some_and(|c| c.eq_ignore_ascii_case(&prefix));
            if !matches {
                issues.push(
                    ValidationError::new(
                        IssueCode::IdPrefix,
                        kind,
                        id,
                        idx,
                        field.name(),
                        format!("{field} '{id}' does not start with '{prefix}'"),
                    )
                    .with_fix(format!("Prefix {field} with '{prefix}'")),
                );
            }
        }
    }
    issues
}
