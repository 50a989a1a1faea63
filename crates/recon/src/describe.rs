//! Short human-readable summaries of how a piece of text changed.

/// Word-level change summary between two texts.
///
/// Tokens longer than three characters count as content words; the first
/// three added and removed words are reported. When no content word changed,
/// a coarse length heuristic summarizes the drift. This is a summary aid,
/// not a semantic diff.
pub fn describe_change(old: &str, new: &str) -> String {
    let old_tokens = content_tokens(old);
    let new_tokens = content_tokens(new);

    let added = difference(&new_tokens, &old_tokens);
    let removed = difference(&old_tokens, &new_tokens);

    let mut clauses = Vec::new();
    if !added.is_empty() {
        let shown = &added[..added.len().min(3)];
        clauses.push(format!("addition of '{}'", shown.join(", ")));
    }
    if !removed.is_empty() {
        let shown = &removed[..removed.len().min(3)];
        clauses.push(format!("removal of '{}'", shown.join(", ")));
    }

    if clauses.is_empty() {
        return length_fallback(old, new).to_string();
    }

    clauses.join(" and ")
}

fn content_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .map(|w| w.to_lowercase())
        .collect()
}

/// Tokens of `a` absent from `b`, first occurrence only, order preserved.
fn difference(a: &[String], b: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in a {
        if !b.contains(token) && !out.contains(token) {
            out.push(token.clone());
        }
    }
    out
}

fn length_fallback(old: &str, new: &str) -> &'static str {
    let old_len = old.chars().count() as f64;
    let new_len = new.chars().count() as f64;

    if new_len > old_len * 1.2 {
        "expanded description"
    } else if new_len < old_len * 0.8 {
        "condensed description"
    } else {
        "rewording without substantive change"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_is_rewording() {
        assert_eq!(
            describe_change("Bewaakt object", "Bewaakt object"),
            "rewording without substantive change"
        );
    }

    #[test]
    fn addition_reported() {
        let summary = describe_change("Bewaakt object", "Bewaakt object en terrein");
        assert_eq!(summary, "addition of 'terrein'");
    }

    #[test]
    fn removal_reported() {
        let summary = describe_change("Bewaakt object en terrein", "Bewaakt object");
        assert_eq!(summary, "removal of 'terrein'");
    }

    #[test]
    fn both_clauses_joined_with_and() {
        let summary = describe_change("Controleert voertuigen grondig", "Controleert personen grondig");
        assert_eq!(summary, "addition of 'personen' and removal of 'voertuigen'");
    }

    #[test]
    fn at_most_three_words_named() {
        let summary = describe_change("", "alfa bravo charlie delta echo");
        assert_eq!(summary, "addition of 'alfa, bravo, charlie'");
    }

    #[test]
    fn short_tokens_ignored() {
        // every word is three characters or shorter, same length
        assert_eq!(
            describe_change("de een of", "het ene al"),
            "rewording without substantive change"
        );
    }

    #[test]
    fn duplicates_collapse() {
        let summary = describe_change("", "terrein terrein terrein nacht");
        assert_eq!(summary, "addition of 'terrein, nacht'");
    }

    #[test]
    fn growth_beyond_fifth_is_expansion() {
        // no content words on either side, new text well over 20% longer
        assert_eq!(describe_change("a b c d", "a b c d e f g h i j"), "expanded description");
    }

    #[test]
    fn shrink_beyond_fifth_is_condensation() {
        assert_eq!(describe_change("a b c d e f g h i j", "a b c"), "condensed description");
    }
}
