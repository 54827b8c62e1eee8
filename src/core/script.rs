// File: src/core/script.rs
use crate::core::types::Glyph;
use unicode_normalization::UnicodeNormalization;

/// Punctuation removed from every canonical form, in addition to whitespace.
const SEPARATORS: [char; 5] = ['-', '_', '/', '.', ','];

pub(crate) fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

/// Lower-cases `s` and drops whitespace and the separator punctuation.
pub fn strip_separators(s: &str) -> String {
    s.chars()
        .filter(|&c| !is_separator(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Folds Tamil letters that users commonly confuse onto one representative.
fn fold_confusable(c: char) -> char {
    match c {
        'ண' | 'ன' => 'ந',
        'ள' | 'ழ' => 'ல',
        'ற' => 'ர',
        'ஶ' | 'ஷ' => 'ச',
        other => other,
    }
}

fn is_combining_mark(c: char) -> bool {
    // Tamil anusvara and the au length mark are not in the glyph table but
    // modify the preceding letter all the same.
    matches!(c, '\u{0B82}' | '\u{0BD7}') || Glyph::classify(c).is_some_and(|g| g.is_mark())
}

/// Canonicalizes raw Tamil text so that spellings differing only in
/// confusable consonants, vowel signs or punctuation compare equal.
///
/// Total: non-Tamil input comes back lower-cased with separators removed.
pub fn normalize_script(s: &str) -> String {
    s.nfc()
        .filter(|&c| !is_separator(c) && !is_combining_mark(c))
        .map(fold_confusable)
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_confusable_consonants() {
        assert_eq!(normalize_script("ண"), "ந");
        assert_eq!(normalize_script("ன"), "ந");
        assert_eq!(normalize_script("ழ"), "ல");
        assert_eq!(normalize_script("ள"), "ல");
        assert_eq!(normalize_script("ற"), "ர");
        assert_eq!(normalize_script("ஷ"), "ச");
    }

    #[test]
    fn strips_signs_and_pulli() {
        // சரவணன் -> ச ர வ ந ந
        assert_eq!(normalize_script("சரவணன்"), "சரவநந");
        assert_eq!(normalize_script("முருகன்"), "மரகந");
    }

    #[test]
    fn spelling_variants_converge() {
        assert_eq!(normalize_script("வள்ளி"), normalize_script("வழ்ழி"));
    }

    #[test]
    fn non_tamil_is_lowercased_and_stripped() {
        assert_eq!(normalize_script("Sri. Murugan-Stores"), "srimuruganstores");
        assert_eq!(normalize_script(""), "");
        assert_eq!(normalize_script(" _/., "), "");
    }

    #[test]
    fn decomposed_au_sign_is_stripped() {
        // க + ெ + ௗ composes to கௌ, whose sign is removed.
        assert_eq!(normalize_script("க\u{0BC6}\u{0BD7}"), "க");
    }

    #[test]
    fn strip_separators_keeps_tamil() {
        assert_eq!(strip_separators("Sri Murugan"), "srimurugan");
        assert_eq!(strip_separators("முருகன்"), "முருகன்");
    }
}
