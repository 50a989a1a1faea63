use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CompareError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Comparison settings. Every table has defaults, so a config file is
/// optional; `CompareConfig::default()` reproduces the historical behavior
/// of the report except for section summaries (see [`SummaryMode`]).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub name: String,
    pub thresholds: ThresholdConfig,
    pub shift: ShiftConfig,
    pub sections: SectionConfig,
    pub keywords: Vec<String>,
    pub pages: PageConfig,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            name: "Qualification file comparison".into(),
            thresholds: ThresholdConfig::default(),
            shift: ShiftConfig::default(),
            sections: SectionConfig::default(),
            keywords: default_keywords(),
            pages: PageConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Thresholds + shift window
// ---------------------------------------------------------------------------

/// Similarity cut points. The comparators are fixed: strict `>` at the
/// fuzzy and shift points, `>=` at the skill coverage point. Config moves
/// the cut points, never the comparators.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Minimum name similarity for a global fuzzy match (exclusive).
    pub fuzzy_match: f64,
    /// Minimum name similarity for a code-shift match (exclusive);
    /// exactly equal names always pass.
    pub shift_accept: f64,
    /// Minimum similarity for a skill statement to count as covered
    /// on the other side (inclusive).
    pub skill_covered: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            fuzzy_match: 0.5,
            shift_accept: 0.7,
            skill_covered: 0.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShiftConfig {
    /// Sub-process codes are probed at offsets up to this distance,
    /// ascending, positive before negative.
    pub max_offset: u32,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self { max_offset: 3 }
    }
}

// ---------------------------------------------------------------------------
// Prose sections
// ---------------------------------------------------------------------------

/// How prose-section rows get their impact sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMode {
    /// Derive the sentence from the two texts with the describer.
    Computed,
    /// Use the hand-authored annotation for the section, falling back to
    /// the computed sentence when no annotation exists.
    Annotated,
}

impl Default for SummaryMode {
    fn default() -> Self {
        Self::Computed
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub mode: SummaryMode,
    /// Hand-authored summaries keyed by section name, for `annotated` mode.
    pub annotations: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Keywords + page references
// ---------------------------------------------------------------------------

fn default_keywords() -> Vec<String> {
    [
        "integrity",
        "ethics",
        "conflict",
        "security",
        "privacy",
        "threat",
        "stress",
        "English",
        "communication",
        "proactive",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Page references printed in the report, per row family.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub metadata: String,
    pub core_tasks: String,
    pub sub_processes: String,
    pub sections: String,
    pub skills: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            metadata: "1".into(),
            core_tasks: "6".into(),
            sub_processes: "7-14".into(),
            sections: "6-7".into(),
            skills: "7-9".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CompareConfig {
    pub fn from_toml(input: &str) -> Result<Self, CompareError> {
        let config: CompareConfig =
            toml::from_str(input).map_err(|e| CompareError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CompareError> {
        for (label, value) in [
            ("thresholds.fuzzy_match", self.thresholds.fuzzy_match),
            ("thresholds.shift_accept", self.thresholds.shift_accept),
            ("thresholds.skill_covered", self.thresholds.skill_covered),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CompareError::ConfigValidation(format!(
                    "{label} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.shift.max_offset == 0 {
            return Err(CompareError::ConfigValidation(
                "shift.max_offset must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = CompareConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.thresholds.fuzzy_match, 0.5);
        assert_eq!(config.thresholds.shift_accept, 0.7);
        assert_eq!(config.thresholds.skill_covered, 0.8);
        assert_eq!(config.shift.max_offset, 3);
        assert_eq!(config.sections.mode, SummaryMode::Computed);
        assert_eq!(config.pages.sub_processes, "7-14");
    }

    #[test]
    fn parse_full_config() {
        let input = r#"
name = "Beveiliger 2016 vs 2021"
keywords = ["integriteit", "conflict"]

[thresholds]
fuzzy_match = 0.55
shift_accept = 0.75
skill_covered = 0.85

[shift]
max_offset = 2

[sections]
mode = "annotated"

[sections.annotations]
Context = "Context broadened to cover 24/7 operations."

[pages]
metadata = "2"
"#;
        let config = CompareConfig::from_toml(input).unwrap();
        assert_eq!(config.name, "Beveiliger 2016 vs 2021");
        assert_eq!(config.keywords, vec!["integriteit", "conflict"]);
        assert_eq!(config.thresholds.fuzzy_match, 0.55);
        assert_eq!(config.shift.max_offset, 2);
        assert_eq!(config.sections.mode, SummaryMode::Annotated);
        assert_eq!(
            config.sections.annotations["Context"],
            "Context broadened to cover 24/7 operations."
        );
        // omitted tables fall back to defaults
        assert_eq!(config.pages.metadata, "2");
        assert_eq!(config.pages.core_tasks, "6");
    }

    #[test]
    fn empty_input_is_all_defaults() {
        let config = CompareConfig::from_toml("").unwrap();
        assert_eq!(config.name, "Qualification file comparison");
        assert!(!config.keywords.is_empty());
    }

    #[test]
    fn reject_threshold_out_of_range() {
        let err = CompareConfig::from_toml("[thresholds]\nfuzzy_match = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("fuzzy_match"));
    }

    #[test]
    fn reject_zero_offset() {
        let err = CompareConfig::from_toml("[shift]\nmax_offset = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_offset"));
    }

    #[test]
    fn reject_unknown_mode() {
        let err = CompareConfig::from_toml("[sections]\nmode = \"manual\"\n");
        assert!(err.is_err(), "typo in mode should fail deserialization");
    }
}
