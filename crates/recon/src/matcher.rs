use std::collections::{HashMap, HashSet};

use crate::config::CompareConfig;
use crate::describe::describe_change;
use crate::model::{ChangeKind, ChangeRecord, CodedEntity, EntityKind, NO_COUNTERPART};
use crate::similarity::similarity;

// ---------------------------------------------------------------------------
// Match state
// ---------------------------------------------------------------------------

/// Book-keeping for one reconciliation run.
///
/// Consumption is monotonic: once an entity on either side is matched it is
/// never reconsidered by a later phase, and an (old, new) code pair is never
/// reported twice. Created per run and discarded after; nothing here
/// survives across comparisons.
#[derive(Debug, Default)]
pub struct MatchState {
    consumed_old: HashSet<String>,
    consumed_new: HashSet<String>,
    emitted: HashSet<(String, String)>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn old_free(&self, code: &str) -> bool {
        !self.consumed_old.contains(code)
    }

    pub fn new_free(&self, code: &str) -> bool {
        !self.consumed_new.contains(code)
    }

    pub fn pair_emitted(&self, old_code: &str, new_code: &str) -> bool {
        self.emitted
            .contains(&(old_code.to_string(), new_code.to_string()))
    }

    fn consume_pair(&mut self, old_code: &str, new_code: &str) {
        self.consumed_old.insert(old_code.to_string());
        self.consumed_new.insert(new_code.to_string());
        self.emitted
            .insert((old_code.to_string(), new_code.to_string()));
    }

    fn retire_old(&mut self, code: &str) {
        self.consumed_old.insert(code.to_string());
    }

    fn retire_new(&mut self, code: &str) {
        self.consumed_new.insert(code.to_string());
    }
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

/// Phase 1: exact name match. Name identity outranks code identity: the
/// first unconsumed new entry with the same (case-sensitive) name wins,
/// whatever its code.
pub fn match_exact_name(
    old: &[CodedEntity],
    new: &[CodedEntity],
    kind: EntityKind,
    state: &mut MatchState,
    page: &str,
    out: &mut Vec<ChangeRecord>,
) {
    let mut by_name: HashMap<&str, Vec<&CodedEntity>> = HashMap::new();
    for entity in new {
        by_name.entry(entity.name.as_str()).or_default().push(entity);
    }

    for old_entity in old {
        if !state.old_free(&old_entity.code) {
            continue;
        }
        let Some(candidates) = by_name.get(old_entity.name.as_str()) else {
            continue;
        };
        for &new_entity in candidates {
            if !state.new_free(&new_entity.code) {
                continue;
            }
            if state.pair_emitted(&old_entity.code, &new_entity.code) {
                continue;
            }
            emit_match(old_entity, new_entity, kind, state, page, out);
            break;
        }
    }
}

/// Phase 2: proximate code-shift heuristic for sub-process codes of the
/// form `<stem>-W<n>`.
///
/// Old entries are scanned in code order. Candidate codes at small offsets
/// under the same stem are accepted when the names agree closely enough
/// (similarity strictly above the shift threshold, or exact equality). A
/// candidate that exists but fails the bar does not stop the scan; later
/// offsets are still tried.
pub fn match_code_shift(
    old: &[CodedEntity],
    new: &[CodedEntity],
    kind: EntityKind,
    state: &mut MatchState,
    config: &CompareConfig,
    page: &str,
    out: &mut Vec<ChangeRecord>,
) {
    let by_code: HashMap<&str, &CodedEntity> =
        new.iter().map(|e| (e.code.as_str(), e)).collect();

    let mut remaining: Vec<&CodedEntity> =
        old.iter().filter(|e| state.old_free(&e.code)).collect();
    remaining.sort_by(|a, b| a.code.cmp(&b.code));

    for old_entity in remaining {
        let Some((stem, number)) = split_code(&old_entity.code) else {
            continue;
        };

        for offset in shift_offsets(config.shift.max_offset) {
            let shifted = number as i64 + offset;
            if shifted < 0 {
                continue;
            }
            let candidate_code = format!("{stem}-W{shifted}");
            let Some(&new_entity) = by_code.get(candidate_code.as_str()) else {
                continue;
            };
            if !state.new_free(&candidate_code) {
                continue;
            }
            if state.pair_emitted(&old_entity.code, &candidate_code) {
                continue;
            }

            let score = similarity(&old_entity.name, &new_entity.name);
            if score > config.thresholds.shift_accept || old_entity.name == new_entity.name {
                emit_match(old_entity, new_entity, kind, state, page, out);
                break;
            }
        }
    }
}

/// Phase 3: greedy best fuzzy match over everything still unmatched.
///
/// Order-dependent by construction: each old entry takes the best candidate
/// available at the time it is processed, which may not be globally optimal.
/// Ties keep the candidate seen first.
pub fn match_best_fuzzy(
    old: &[CodedEntity],
    new: &[CodedEntity],
    kind: EntityKind,
    state: &mut MatchState,
    config: &CompareConfig,
    page: &str,
    out: &mut Vec<ChangeRecord>,
) {
    for old_entity in old {
        if !state.old_free(&old_entity.code) {
            continue;
        }

        let mut best: Option<&CodedEntity> = None;
        let mut best_score = config.thresholds.fuzzy_match;

        for new_entity in new {
            if !state.new_free(&new_entity.code) {
                continue;
            }
            if state.pair_emitted(&old_entity.code, &new_entity.code) {
                continue;
            }
            let score = similarity(&old_entity.name, &new_entity.name);
            if score > best_score {
                best_score = score;
                best = Some(new_entity);
            }
        }

        if let Some(new_entity) = best {
            emit_match(old_entity, new_entity, kind, state, page, out);
        }
    }
}

/// Phase 4: residue. Whatever is still unconsumed on the old side was
/// removed; whatever is still unconsumed on the new side was added.
pub fn emit_residue(
    old: &[CodedEntity],
    new: &[CodedEntity],
    kind: EntityKind,
    state: &mut MatchState,
    page: &str,
    out: &mut Vec<ChangeRecord>,
) {
    for entity in old {
        if !state.old_free(&entity.code) {
            continue;
        }
        state.retire_old(&entity.code);
        out.push(ChangeRecord {
            kind: ChangeKind::Removed,
            old_code: entity.code.clone(),
            old_name: entity.name.clone(),
            new_code: NO_COUNTERPART.into(),
            new_name: NO_COUNTERPART.into(),
            impact: format!("{} removed in the new revision", kind.label()),
            page: page.to_string(),
        });
    }

    for entity in new {
        if !state.new_free(&entity.code) {
            continue;
        }
        state.retire_new(&entity.code);
        out.push(ChangeRecord {
            kind: ChangeKind::Added,
            old_code: NO_COUNTERPART.into(),
            old_name: NO_COUNTERPART.into(),
            new_code: entity.code.clone(),
            new_name: entity.name.clone(),
            impact: format!("New {} added in the new revision", kind.label_lower()),
            page: page.to_string(),
        });
    }
}

/// Run all phases for one entity list pair, with fresh state. Core tasks
/// have no sub-code structure, so the shift phase only applies to
/// sub-processes.
pub fn reconcile(
    old: &[CodedEntity],
    new: &[CodedEntity],
    kind: EntityKind,
    config: &CompareConfig,
    page: &str,
) -> Vec<ChangeRecord> {
    let mut state = MatchState::new();
    let mut out = Vec::new();

    match_exact_name(old, new, kind, &mut state, page, &mut out);
    if kind == EntityKind::SubProcess {
        match_code_shift(old, new, kind, &mut state, config, page, &mut out);
    }
    match_best_fuzzy(old, new, kind, &mut state, config, page, &mut out);
    emit_residue(old, new, kind, &mut state, page, &mut out);

    out
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Emit one matched pair, classified by what actually changed.
fn emit_match(
    old: &CodedEntity,
    new: &CodedEntity,
    kind: EntityKind,
    state: &mut MatchState,
    page: &str,
    out: &mut Vec<ChangeRecord>,
) {
    let same_code = old.code == new.code;
    let same_name = old.name == new.name;

    let (change, impact) = if same_code && same_name {
        (ChangeKind::Unchanged, "No change in name or code".to_string())
    } else if same_code {
        (
            ChangeKind::Renamed,
            format!(
                "{} renamed: {}",
                kind.label(),
                describe_change(&old.name, &new.name)
            ),
        )
    } else if same_name {
        (
            ChangeKind::Recoded,
            format!("{} re-coded from {} to {}", kind.label(), old.code, new.code),
        )
    } else {
        (
            ChangeKind::Recoded,
            format!(
                "{} re-coded from {} to {}. Name change: {}",
                kind.label(),
                old.code,
                new.code,
                describe_change(&old.name, &new.name)
            ),
        )
    };

    state.consume_pair(&old.code, &new.code);
    out.push(ChangeRecord {
        kind: change,
        old_code: old.code.clone(),
        old_name: old.name.clone(),
        new_code: new.code.clone(),
        new_name: new.name.clone(),
        impact,
        page: page.to_string(),
    });
}

/// Split a sub-process code `<stem>-W<n>` into stem and number.
fn split_code(code: &str) -> Option<(&str, u32)> {
    let (stem, num) = code.rsplit_once("-W")?;
    if stem.is_empty() {
        return None;
    }
    let n: u32 = num.parse().ok()?;
    Some((stem, n))
}

/// Offset sequence +1..=max then -1..=-max, nearest first within each sign.
fn shift_offsets(max_offset: u32) -> impl Iterator<Item = i64> {
    let max = max_offset as i64;
    (1..=max).chain((1..=max).map(|n| -n))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
