//! Validation report and quality score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use roster_model::{EntityKind, Severity, ValidationError};

/// Score penalty per error-severity issue.
const ERROR_PENALTY: usize = 10;
/// Score penalty per warning-severity issue.
const WARNING_PENALTY: usize = 2;

/// Issue counts for one entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl KindCounts {
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.info
    }

    fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.info += 1,
        }
    }
}

/// Output of the validation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationError>,
    pub counts: BTreeMap<EntityKind, KindCounts>,
    /// Quality score in `0..=100`; advisory notes do not count.
    pub score: u32,
}

impl ValidationReport {
    pub fn from_issues(issues: Vec<ValidationError>) -> Self {
        let mut counts: BTreeMap<EntityKind, KindCounts> =
            EntityKind::ALL.into_iter().map(|k| (k, KindCounts::default())).collect();
        for issue in &issues {
            counts.entry(issue.entity_type).or_default().add(issue.severity);
        }
        let mut report = Self {
            issues,
            counts,
            score: 0,
        };
        report.score = quality_score(report.error_count(), report.warning_count());
        report
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn counts_for(&self, kind: EntityKind) -> KindCounts {
        self.counts.get(&kind).copied().unwrap_or_default()
    }

    pub fn issues_for(&self, kind: EntityKind) -> impl Iterator<Item = &ValidationError> {
        self.issues.iter().filter(move |i| i.entity_type == kind)
    }
}

/// `100 - min(100, 10 * errors + 2 * warnings)`.
pub fn quality_score(errors: usize, warnings: usize) -> u32 {
    let penalty = errors
        .saturating_mul(ERROR_PENALTY)
        .saturating_add(warnings.saturating_mul(WARNING_PENALTY))
        .min(100);
    (100 - penalty) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_formula() {
        assert_eq!(quality_score(0, 0), 100);
        assert_eq!(quality_score(1, 0), 90);
        assert_eq!(quality_score(2, 3), 74);
        assert_eq!(quality_score(11, 0), 0);
        assert_eq!(quality_score(usize::MAX, usize::MAX), 0);
    }
}
