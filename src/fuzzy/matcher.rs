// File: src/fuzzy/matcher.rs
use crate::core::types::FormStage;
use crate::fuzzy::forms::CanonicalForms;
use std::ops::Range;

/// True when some candidate form contains some query form.
///
/// A query with no forms (blank input) matches everything, so a freshly
/// focused field lists the whole pool.
/// Cost is O(forms² × length); pools are small enough that no index is kept.
pub fn matches(query: &CanonicalForms, candidate: &CanonicalForms) -> bool {
    if query.is_empty() {
        return true;
    }
    query
        .iter()
        .any(|q| candidate.iter().any(|c| c.contains(q)))
}

/// True when some query form equals some candidate form. Blank queries never
/// match exactly.
pub fn exact_match(query: &CanonicalForms, candidate: &CanonicalForms) -> bool {
    exact_match_stages(query, candidate).is_some()
}

/// The first (query stage, candidate stage) pair whose forms are equal.
pub fn exact_match_stages(
    query: &CanonicalForms,
    candidate: &CanonicalForms,
) -> Option<(FormStage, FormStage)> {
    query.stages().find_map(|(qs, q)| {
        candidate
            .stages()
            .find(|(_, c)| *c == q)
            .map(|(cs, _)| (qs, cs))
    })
}

/// Byte range of the first case-insensitive literal occurrence of `query` in
/// `label`, for highlighting a dropdown option.
///
/// This only looks at the raw text: a record found through a folded or
/// transliterated form usually has nothing to highlight.
pub fn highlight(query: &str, label: &str) -> Option<Range<usize>> {
    let needle: Vec<char> = query.trim().chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }
    // Keep each lowered char tied to the byte span of its source char.
    let hay: Vec<(Range<usize>, char)> = label
        .char_indices()
        .flat_map(|(i, ch)| {
            let span = i..i + ch.len_utf8();
            ch.to_lowercase().map(move |lc| (span.clone(), lc))
        })
        .collect();
    if hay.len() < needle.len() {
        return None;
    }
    hay.windows(needle.len())
        .find(|window| window.iter().map(|(_, c)| *c).eq(needle.iter().copied()))
        .map(|window| window[0].0.start..window[window.len() - 1].0.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> CanonicalForms {
        CanonicalForms::for_query(s)
    }

    fn r(s: &str) -> CanonicalForms {
        CanonicalForms::for_record(s)
    }

    #[test]
    fn tanglish_query_finds_tamil_record() {
        assert!(matches(&q("murugan"), &r("முருகன்")));
        assert!(matches(&q("muru"), &r("முருகன்")));
    }

    #[test]
    fn tamil_query_finds_english_record() {
        assert!(matches(&q("சரவணன்"), &r("Saravanan")));
    }

    #[test]
    fn blank_query_matches_anything() {
        assert!(matches(&q(""), &r("anything")));
        assert!(matches(&q(" "), &CanonicalForms::default()));
    }

    #[test]
    fn unrelated_query_does_not_match() {
        assert!(!matches(&q("xyz123notfound"), &r("Saravanan")));
        assert!(!matches(&q("salem"), &r("முருகன்")));
    }

    #[test]
    fn exact_match_needs_equality() {
        assert!(exact_match(&q("Murugan"), &r("murukan")));
        assert!(!exact_match(&q("muru"), &r("murukan")));
        assert!(!exact_match(&q(""), &r("murukan")));
    }

    #[test]
    fn exact_match_reports_stages() {
        let stages = exact_match_stages(&q("Murugan"), &r("murukan"));
        assert_eq!(stages, Some((FormStage::PhoneticFolded, FormStage::Raw)));
    }

    #[test]
    fn highlight_is_case_insensitive_and_byte_accurate() {
        assert_eq!(highlight("RUGA", "Murugan Stores"), Some(2..6));
        let label = "ஸ்ரீ முருகன்";
        let start = label.find("முரு").unwrap();
        assert_eq!(highlight("முரு", label), Some(start..start + "முரு".len()));
    }

    #[test]
    fn highlight_misses_folded_matches() {
        assert_eq!(highlight("murugan", "முருகன்"), None);
        assert_eq!(highlight("", "Murugan"), None);
        assert_eq!(highlight("longer than label", "abc"), None);
    }
}
