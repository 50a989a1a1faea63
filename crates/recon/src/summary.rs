use std::collections::HashMap;

use crate::model::{ChangeKind, ChangeRecord, CompareSummary};

/// Compute summary statistics from report rows.
pub fn compute_summary(rows: &[ChangeRecord]) -> CompareSummary {
    let mut kind_counts: HashMap<String, usize> = HashMap::new();
    let mut unchanged = 0;
    let mut renamed = 0;
    let mut recoded = 0;
    let mut removed = 0;
    let mut added = 0;

    for row in rows {
        *kind_counts.entry(row.kind.to_string()).or_insert(0) += 1;

        match row.kind {
            ChangeKind::Unchanged => unchanged += 1,
            ChangeKind::Renamed => renamed += 1,
            ChangeKind::Recoded => recoded += 1,
            ChangeKind::Removed => removed += 1,
            ChangeKind::Added => added += 1,
            ChangeKind::Metadata | ChangeKind::Section | ChangeKind::Skills => {}
        }
    }

    CompareSummary {
        total_rows: rows.len(),
        unchanged,
        renamed,
        recoded,
        removed,
        added,
        kind_counts,
    }
}
