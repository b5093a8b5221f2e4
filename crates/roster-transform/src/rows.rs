//! Whole-file transformation.

use std::time::Instant;

use rayon::prelude::*;

use roster_model::{EntityKind, ValidationError};

use crate::row::{MappedRow, TransformedRow, transform_row};

/// Transformed rows of one file, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutput {
    pub rows: Vec<TransformedRow>,
    /// One whole-row diagnostic per dropped row.
    pub failures: Vec<ValidationError>,
    /// Rows skipped because every mapped cell was blank.
    pub blank_rows: usize,
}

impl TransformOutput {
    /// Repair diagnostics and row failures together, ordered by row.
    pub fn diagnostics(&self) -> Vec<ValidationError> {
        let mut all: Vec<ValidationError> = self
            .rows
            .iter()
            .flat_map(|row| row.diagnostics.iter().cloned())
            .chain(self.failures.iter().cloned())
            .collect();
        all.sort_by_key(|d| d.row);
        all
    }
}

/// Transform every non-blank row. Rows are independent, so `parallel` only
/// affects scheduling; output order always follows the input.
pub fn transform_rows(kind: EntityKind, rows: &[MappedRow], parallel: bool) -> TransformOutput {
    let started = Instant::now();
    let _span = tracing::debug_span!("transform", kind = %kind, rows = rows.len(), parallel).entered();

    let blank_rows = rows.iter().filter(|row| row.is_blank()).count();
    let outcomes: Vec<_> = if parallel {
        rows.par_iter()
            .filter(|row| !row.is_blank())
            .map(|row| transform_row(kind, row))
            .collect()
    } else {
        rows.iter()
            .filter(|row| !row.is_blank())
            .map(|row| transform_row(kind, row))
            .collect()
    };

    let mut output = TransformOutput {
        blank_rows,
        ..Default::default()
    };
    for outcome in outcomes {
        match outcome {
            Ok(row) => output.rows.push(row),
            Err(failure) => output.failures.push(failure),
        }
    }

    tracing::debug!(
        entities = output.rows.len(),
        failed = output.failures.len(),
        blank = blank_rows,
        duration_ms = started.elapsed().as_millis() as u64,
        "transformed rows"
    );
    output
}
