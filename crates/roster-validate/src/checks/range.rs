//! Numeric bounds, re-checked for entities edited outside the transformer.

use roster_model::{
    EntityCollections, EntityKind, FieldType, FieldValue, IssueCode, ValidationError,
};

pub fn check(collections: &EntityCollections) -> Vec<ValidationError> {
    let mut issues = Vec::new();
    for kind in EntityKind::ALL {
        for (idx, entity) in collections.entities(kind).iter().enumerate() {
            for (field, value) in entity.values() {
                let Some((min, max)) = field.field_type().bounds() else {
                    continue;
                };
                match (field.field_type(), value) {
                    (FieldType::Int { .. }, FieldValue::Int(n)) if !(min..=max).contains(&n) => {
                        let clamped = n.clamp(min, max);
                        issues.push(
                            ValidationError::new(
                                IssueCode::OutOfRange,
                                kind,
                                entity.id(),
                                idx,
                                field.name(),
                                format!("{field} {n} is outside {min}-{max}"),
                            )
                            .with_fix(format!("Set {field} to {clamped}")),
                        );
                    }
                    (FieldType::IntList { .. }, FieldValue::IntList(values)) => {
                        let (kept, bad): (Vec<i64>, Vec<i64>) =
                            values.iter().copied().partition(|v| (min..=max).contains(v));
                        if bad.is_empty() {
                            continue;
                        }
                        issues.push(
                            ValidationError::new(
                                IssueCode::OutOfRange,
                                kind,
                                entity.id(),
                                idx,
                                field.name(),
                                format!("{field} has entries outside {min}-{max}: {bad:?}"),
                            )
                            .with_fix(format!("Set {field} to {kept:?}")),
                        );
                    }
                    _ => {}
                }
            }
        }
    }
    issues
}
