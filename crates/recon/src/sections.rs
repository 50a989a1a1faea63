use chrono::NaiveDate;

use crate::config::{CompareConfig, SummaryMode};
use crate::describe::describe_change;
use crate::model::{ChangeKind, ChangeRecord, DocumentMeta, ProseSection, NO_COUNTERPART};
use crate::similarity::has_similar;

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// The four fixed metadata rows. The report always carries these, templated,
/// whether or not the fields actually differ between revisions.
pub fn compare_metadata(
    old: &DocumentMeta,
    new: &DocumentMeta,
    config: &CompareConfig,
    out: &mut Vec<ChangeRecord>,
) {
    let page = config.pages.metadata.as_str();

    out.push(ChangeRecord {
        kind: ChangeKind::Metadata,
        old_code: old.file_number.clone(),
        old_name: NO_COUNTERPART.into(),
        new_code: new.file_number.clone(),
        new_name: NO_COUNTERPART.into(),
        impact: "Change of qualification file number".into(),
        page: page.into(),
    });

    out.push(ChangeRecord {
        kind: ChangeKind::Metadata,
        old_code: old.qualification_number.clone(),
        old_name: old.qualification_name.clone(),
        new_code: new.qualification_number.clone(),
        new_name: new.qualification_name.clone(),
        impact: format!(
            "Renamed from {} to {} and change of qualification number",
            old.qualification_name, new.qualification_name
        ),
        page: page.into(),
    });

    out.push(ChangeRecord {
        kind: ChangeKind::Metadata,
        old_code: NO_COUNTERPART.into(),
        old_name: format!("Revised {}", old.version_label),
        new_code: NO_COUNTERPART.into(),
        new_name: format!("Revised {}", new.version_label),
        impact: "Update of the qualification file".into(),
        page: page.into(),
    });

    out.push(ChangeRecord {
        kind: ChangeKind::Metadata,
        old_code: NO_COUNTERPART.into(),
        old_name: format!("Valid from {}", format_date(old.valid_from)),
        new_code: NO_COUNTERPART.into(),
        new_name: format!("Valid from {}", format_date(new.valid_from)),
        impact: "New validity date".into(),
        page: page.into(),
    });
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string())
        .unwrap_or_else(|| NO_COUNTERPART.into())
}

// ---------------------------------------------------------------------------
// Prose sections
// ---------------------------------------------------------------------------

/// One row per prose section: old document order first, then sections that
/// only exist in the new revision.
pub fn compare_sections(
    old: &[ProseSection],
    new: &[ProseSection],
    config: &CompareConfig,
    out: &mut Vec<ChangeRecord>,
) {
    let page = config.pages.sections.as_str();

    for old_section in old {
        match new.iter().find(|s| s.name == old_section.name) {
            Some(new_section) => out.push(ChangeRecord {
                kind: ChangeKind::Section,
                old_code: NO_COUNTERPART.into(),
                old_name: old_section.name.clone(),
                new_code: NO_COUNTERPART.into(),
                new_name: new_section.name.clone(),
                impact: section_summary(old_section, new_section, config),
                page: page.into(),
            }),
            None => out.push(ChangeRecord {
                kind: ChangeKind::Section,
                old_code: NO_COUNTERPART.into(),
                old_name: old_section.name.clone(),
                new_code: NO_COUNTERPART.into(),
                new_name: NO_COUNTERPART.into(),
                impact: "Section removed in the new revision".into(),
                page: page.into(),
            }),
        }
    }

    for new_section in new {
        if old.iter().any(|s| s.name == new_section.name) {
            continue;
        }
        out.push(ChangeRecord {
            kind: ChangeKind::Section,
            old_code: NO_COUNTERPART.into(),
            old_name: NO_COUNTERPART.into(),
            new_code: NO_COUNTERPART.into(),
            new_name: new_section.name.clone(),
            impact: "Section added in the new revision".into(),
            page: page.into(),
        });
    }
}

fn section_summary(old: &ProseSection, new: &ProseSection, config: &CompareConfig) -> String {
    if config.sections.mode == SummaryMode::Annotated {
        if let Some(annotation) = config.sections.annotations.get(&old.name) {
            return annotation.clone();
        }
    }
    describe_change(&old.text, &new.text)
}

// ---------------------------------------------------------------------------
// Knowledge and skills
// ---------------------------------------------------------------------------

/// One row summarizing the unordered knowledge/skill statement list.
///
/// A statement is covered when its best match on the other side reaches the
/// coverage threshold; the uniquely-uncovered new statements are scanned for
/// the configured keyword vocabulary.
pub fn compare_skills(
    old_items: &[String],
    new_items: &[String],
    config: &CompareConfig,
    out: &mut Vec<ChangeRecord>,
) {
    let threshold = config.thresholds.skill_covered;

    let old_unique: Vec<&String> = old_items
        .iter()
        .filter(|item| !has_similar(item, new_items, threshold))
        .collect();
    let new_unique: Vec<&String> = new_items
        .iter()
        .filter(|item| !has_similar(item, old_items, threshold))
        .collect();

    out.push(ChangeRecord {
        kind: ChangeKind::Skills,
        old_code: NO_COUNTERPART.into(),
        old_name: "Knowledge and skills".into(),
        new_code: NO_COUNTERPART.into(),
        new_name: "Knowledge and skills".into(),
        impact: skill_impact(&old_unique, &new_unique, &config.keywords),
        page: config.pages.skills.clone(),
    });
}

fn skill_impact(old_unique: &[&String], new_unique: &[&String], vocabulary: &[String]) -> String {
    // Vocabulary terms spotted in the new-side unique items, reported in
    // vocabulary order.
    let mut found: Vec<&str> = Vec::new();
    for term in vocabulary {
        let needle = term.to_lowercase();
        if new_unique
            .iter()
            .any(|item| item.to_lowercase().contains(&needle))
        {
            found.push(term.as_str());
        }
    }

    if !found.is_empty() {
        format!(
            "The new revision adds knowledge and skills covering: {}. Some skills are described more specifically.",
            found.join(", ")
        )
    } else if !new_unique.is_empty() && old_unique.is_empty() {
        "The new revision adds knowledge and skills. Some skills are described more specifically."
            .into()
    } else if !old_unique.is_empty() && new_unique.is_empty() {
        "Some knowledge and skills from the old revision were removed or reworded.".into()
    } else if !old_unique.is_empty() && !new_unique.is_empty() {
        "Both additions and removals in knowledge and skills, with more emphasis on current knowledge in the new revision.".into()
    } else {
        "No significant changes in knowledge and skills.".into()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, text: &str) -> ProseSection {
        ProseSection {
            name: name.into(),
            text: text.into(),
        }
    }

    fn meta(file: &str, number: &str, name: &str, version: &str) -> DocumentMeta {
        DocumentMeta {
            file_number: file.into(),
            qualification_number: number.into(),
            qualification_name: name.into(),
            version_label: version.into(),
            valid_from: NaiveDate::from_ymd_opt(2021, 8, 1),
        }
    }

    #[test]
    fn metadata_always_emits_four_rows() {
        let old = meta("23161", "25407", "Beveiliger", "2016");
        let new = meta("23262", "25690", "Beveiliger 2", "2021");
        let mut out = Vec::new();
        compare_metadata(&old, &new, &CompareConfig::default(), &mut out);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|r| r.kind == ChangeKind::Metadata));
        assert_eq!(out[0].old_code, "23161");
        assert_eq!(out[0].new_code, "23262");
        assert!(out[1].impact.contains("Renamed from Beveiliger to Beveiliger 2"));
        assert_eq!(out[2].old_name, "Revised 2016");
        assert_eq!(out[3].new_name, "Valid from 2021-08-01");
    }

    #[test]
    fn missing_validity_date_prints_placeholder() {
        let mut old = meta("1", "2", "A", "2016");
        old.valid_from = None;
        let new = meta("1", "2", "A", "2016");
        let mut out = Vec::new();
        compare_metadata(&old, &new, &CompareConfig::default(), &mut out);
        assert_eq!(out[3].old_name, "Valid from -");
    }

    #[test]
    fn sections_computed_summary() {
        let old = vec![section("Context", "Werkt op vaste tijdstippen")];
        let new = vec![section("Context", "Werkt met flexibele tijdstippen")];
        let mut out = Vec::new();
        compare_sections(&old, &new, &CompareConfig::default(), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ChangeKind::Section);
        assert!(out[0].impact.contains("flexibele"));
        assert!(out[0].impact.contains("vaste"));
    }

    #[test]
    fn sections_annotated_summary_with_fallback() {
        let mut config = CompareConfig::default();
        config.sections.mode = SummaryMode::Annotated;
        config.sections.annotations.insert(
            "Context".into(),
            "Context broadened to cover 24/7 operations.".into(),
        );

        let old = vec![
            section("Context", "Werkt op vaste tijdstippen"),
            section("Resultaat", "Een veilig object"),
        ];
        let new = vec![
            section("Context", "24/7 inzetbaar"),
            section("Resultaat", "Een veilig object en terrein"),
        ];
        let mut out = Vec::new();
        compare_sections(&old, &new, &config, &mut out);
        assert_eq!(out[0].impact, "Context broadened to cover 24/7 operations.");
        // no annotation for Resultaat: computed summary kicks in
        assert!(out[1].impact.contains("terrein"));
    }

    #[test]
    fn sections_one_sided() {
        let old = vec![section("Context", "tekst")];
        let new = vec![section("Resultaat", "tekst")];
        let mut out = Vec::new();
        compare_sections(&old, &new, &CompareConfig::default(), &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].impact, "Section removed in the new revision");
        assert_eq!(out[0].old_name, "Context");
        assert_eq!(out[0].new_name, "-");
        assert_eq!(out[1].impact, "Section added in the new revision");
        assert_eq!(out[1].new_name, "Resultaat");
    }

    #[test]
    fn skills_keyword_terms_reported_in_vocabulary_order() {
        let mut config = CompareConfig::default();
        config.keywords = vec!["integriteit".into(), "conflict".into()];

        let old_items = vec!["Kan rapportages opstellen".to_string()];
        let new_items = vec![
            "Kan rapportages opstellen".to_string(),
            "Kan de-escalerend optreden bij conflict".to_string(),
            "Handelt volgens regels van integriteit".to_string(),
        ];
        let mut out = Vec::new();
        compare_skills(&old_items, &new_items, &config, &mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0]
            .impact
            .contains("covering: integriteit, conflict"));
    }

    #[test]
    fn skills_directional_fallbacks() {
        let config = CompareConfig::default();

        // removals only
        let old_items = vec!["Kan surveilleren in het donker".to_string()];
        let new_items: Vec<String> = vec![];
        let mut out = Vec::new();
        compare_skills(&old_items, &new_items, &config, &mut out);
        assert!(out[0].impact.contains("removed or reworded"));

        // no changes at all
        let same = vec!["Kan rapportages opstellen".to_string()];
        let mut out = Vec::new();
        compare_skills(&same, &same, &config, &mut out);
        assert_eq!(
            out[0].impact,
            "No significant changes in knowledge and skills."
        );
    }

    #[test]
    fn skills_near_duplicates_count_as_covered() {
        let config = CompareConfig::default();
        // one character apart over a long statement clears 0.8 easily
        let old_items = vec!["Kan werken met toegangscontrolesystemen".to_string()];
        let new_items = vec!["Kan werken met toegangscontrolesysteem".to_string()];
        let mut out = Vec::new();
        compare_skills(&old_items, &new_items, &config, &mut out);
        assert_eq!(
            out[0].impact,
            "No significant changes in knowledge and skills."
        );
    }
}
