// File: src/core/converter.rs
use crate::core::script::is_separator;
use crate::core::types::{Cluster, Glyph, GlyphKind};
use std::iter::Peekable;
use unicode_normalization::{Recompositions, UnicodeNormalization};

/// Tamil consonants carry this vowel unless a sign or the pulli follows.
const INHERENT_VOWEL: &str = "a";

/// Splits text into transliteration clusters, left to right.
///
/// Every input character ends up in exactly one cluster. A consonant absorbs
/// at most one following sign or virama; marks with no consonant before them
/// come out as `Cluster::Literal`.
pub struct Clusters<'a> {
    chars: Peekable<Recompositions<std::str::Chars<'a>>>,
}

impl<'a> Clusters<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { chars: s.nfc().peekable() }
    }
}

impl Iterator for Clusters<'_> {
    type Item = Cluster;

    fn next(&mut self) -> Option<Cluster> {
        let c = self.chars.next()?;
        let Some(glyph) = Glyph::classify(c) else {
            return Some(Cluster::Literal(c));
        };
        Some(match glyph.kind {
            GlyphKind::Vowel => Cluster::Vowel(glyph),
            GlyphKind::Consonant => {
                let mark = self
                    .chars
                    .peek()
                    .and_then(|&next| Glyph::classify(next))
                    .filter(Glyph::is_mark);
                if mark.is_some() {
                    self.chars.next();
                }
                Cluster::Syllable { consonant: glyph, mark }
            }
            GlyphKind::VowelSign | GlyphKind::Virama => Cluster::Literal(c),
        })
    }
}

pub fn clusters(s: &str) -> Clusters<'_> {
    Clusters::new(s)
}

fn push_cluster(out: &mut String, cluster: Cluster) {
    match cluster {
        Cluster::Vowel(v) => out.push_str(v.latin),
        Cluster::Syllable { consonant, mark } => {
            out.push_str(consonant.latin);
            match mark {
                None => out.push_str(INHERENT_VOWEL),
                // The virama's Latin string is empty; a sign replaces the inherent vowel.
                Some(m) => out.push_str(m.latin),
            }
        }
        Cluster::Literal(c) => out.extend(c.to_lowercase()),
    }
}

/// Converts Tamil text to a Latin phonetic string, the way the name would be
/// romanized by ear. Non-Tamil characters pass through lower-cased and
/// separators are removed from the result.
pub fn latinize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for cluster in clusters(s) {
        push_cluster(&mut out, cluster);
    }
    out.retain(|c| !is_separator(c));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consonant_forms() {
        assert_eq!(latinize("க"), "ka");
        assert_eq!(latinize("கா"), "kaa");
        assert_eq!(latinize("க்"), "k");
        assert_eq!(latinize("கை"), "kai");
    }

    #[test]
    fn standalone_vowels() {
        assert_eq!(latinize("அம்மா"), "ammaa");
        assert_eq!(latinize("ஊர்"), "uur");
        assert_eq!(latinize("ஔ"), "au");
    }

    #[test]
    fn names() {
        assert_eq!(latinize("முருகன்"), "murukan");
        assert_eq!(latinize("சரவணன்"), "charavanan");
        assert_eq!(latinize("தமிழ்"), "thamizh");
    }

    #[test]
    fn mixed_script_passes_latin_through() {
        assert_eq!(latinize("Sri முருகன் Stores"), "srimurukanstores");
        assert_eq!(latinize("Bill-42"), "bill42");
    }

    #[test]
    fn dangling_marks_are_copied_literally() {
        assert_eq!(latinize("\u{0BCD}க"), "\u{0BCD}ka");
        assert_eq!(latinize("\u{0BBF}"), "\u{0BBF}");
    }

    #[test]
    fn cluster_takes_at_most_one_mark() {
        let got: Vec<Cluster> = clusters("கி\u{0BCD}").collect();
        assert_eq!(got.len(), 2);
        assert!(matches!(got[0], Cluster::Syllable { mark: Some(_), .. }));
        assert_eq!(got[1], Cluster::Literal('\u{0BCD}'));
    }

    #[test]
    fn decomposed_vowel_sign_is_one_cluster() {
        // கொ written as க + ெ + ா
        assert_eq!(latinize("க\u{0BC6}\u{0BBE}"), "ko");
    }
}
