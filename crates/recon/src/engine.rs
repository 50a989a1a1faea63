use std::collections::HashSet;

use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::matcher::reconcile;
use crate::model::{ChangeRecord, CompareMeta, CompareResult, DocumentRecord, EntityKind};
use crate::sections::{compare_metadata, compare_sections, compare_skills};
use crate::summary::compute_summary;

/// Run a full comparison of two document revisions.
///
/// Never fails: degraded input (empty lists, blank names or codes) degrades
/// the report, it does not error. Match state is created per call, so
/// repeated runs never contaminate each other.
pub fn run(config: &CompareConfig, old: &DocumentRecord, new: &DocumentRecord) -> CompareResult {
    let mut rows = Vec::new();

    compare_metadata(&old.meta, &new.meta, config, &mut rows);
    rows.extend(reconcile(
        &old.core_tasks,
        &new.core_tasks,
        EntityKind::CoreTask,
        config,
        &config.pages.core_tasks,
    ));
    rows.extend(reconcile(
        &old.sub_processes,
        &new.sub_processes,
        EntityKind::SubProcess,
        config,
        &config.pages.sub_processes,
    ));
    compare_sections(&old.prose_sections, &new.prose_sections, config, &mut rows);
    compare_skills(&old.skill_items, &new.skill_items, config, &mut rows);

    dedup_rows(&mut rows);

    let summary = compute_summary(&rows);

    CompareResult {
        meta: CompareMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
    }
}

/// Parse one pre-extracted document record from its JSON form.
pub fn load_document(json: &str) -> Result<DocumentRecord, CompareError> {
    serde_json::from_str(json).map_err(|e| CompareError::DocumentParse(e.to_string()))
}

/// Drop rows repeating an already-seen (old_code, old_name, new_code,
/// new_name) tuple, keeping the first occurrence. Safety net for entity
/// lists sharing a code namespace by coincidence; the match state already
/// prevents duplicates within one list.
fn dedup_rows(rows: &mut Vec<ChangeRecord>) {
    let mut seen: HashSet<(String, String, String, String)> = HashSet::new();
    rows.retain(|row| {
        seen.insert((
            row.old_code.clone(),
            row.old_name.clone(),
            row.new_code.clone(),
            row.new_name.clone(),
        ))
    });
}
