use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single coded entry from a parsed qualification file: one core task or
/// one sub-process.
///
/// `code` identifies the entry within one revision only; the same conceptual
/// entry may carry a different code in the next revision. Codes are assumed
/// unique within one side of a comparison. Missing fields deserialize to
/// empty strings and are compared as such.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodedEntity {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Code of the owning core task, for sub-processes. Carried from the
    /// ingestion step; the shift heuristic derives its stem from `code`.
    #[serde(default)]
    pub parent_code: Option<String>,
}

/// Which taxonomy level an entity list belongs to. Core tasks have flat
/// codes; sub-process codes follow the `<stem>-W<n>` pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    CoreTask,
    SubProcess,
}

impl EntityKind {
    /// Report label at sentence start.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CoreTask => "Core task",
            Self::SubProcess => "Sub-process",
        }
    }

    /// Report label mid-sentence.
    pub fn label_lower(&self) -> &'static str {
        match self {
            Self::CoreTask => "core task",
            Self::SubProcess => "sub-process",
        }
    }
}

/// One prose section (context, professional attitude, outcome statement).
/// Sections are kept as a sequence so document order survives parsing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProseSection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
}

/// Identifying metadata of one document revision.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentMeta {
    #[serde(default)]
    pub file_number: String,
    #[serde(default)]
    pub qualification_number: String,
    #[serde(default)]
    pub qualification_name: String,
    #[serde(default)]
    pub version_label: String,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
}

/// The full parsed representation of one document revision. Produced by the
/// ingestion side; the engine only reads it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub meta: DocumentMeta,
    #[serde(default)]
    pub core_tasks: Vec<CodedEntity>,
    #[serde(default)]
    pub sub_processes: Vec<CodedEntity>,
    #[serde(default)]
    pub prose_sections: Vec<ProseSection>,
    #[serde(default)]
    pub skill_items: Vec<String>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Placeholder for the code/name columns of a side without a counterpart.
pub const NO_COUNTERPART: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Unchanged,
    Renamed,
    Recoded,
    Removed,
    Added,
    Metadata,
    Section,
    Skills,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unchanged => write!(f, "unchanged"),
            Self::Renamed => write!(f, "renamed"),
            Self::Recoded => write!(f, "recoded"),
            Self::Removed => write!(f, "removed"),
            Self::Added => write!(f, "added"),
            Self::Metadata => write!(f, "metadata"),
            Self::Section => write!(f, "section"),
            Self::Skills => write!(f, "skills"),
        }
    }
}

/// One row of the comparison report.
///
/// Entity rows carry `-` on at most one side; metadata, section and skill
/// rows use `-` in the code columns on both sides by construction.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub old_code: String,
    pub old_name: String,
    pub new_code: String,
    pub new_name: String,
    pub impact: String,
    pub page: String,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CompareSummary {
    pub total_rows: usize,
    pub unchanged: usize,
    pub renamed: usize,
    pub recoded: usize,
    pub removed: usize,
    pub added: usize,
    pub kind_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareResult {
    pub meta: CompareMeta,
    pub summary: CompareSummary,
    pub rows: Vec<ChangeRecord>,
}
