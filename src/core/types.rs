// File: src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The role a Tamil character plays inside a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    Vowel,
    Consonant,
    /// A matra: replaces the inherent "a" of the preceding consonant.
    VowelSign,
    /// The pulli: suppresses the inherent vowel.
    Virama,
}

/// One classified Tamil character together with its Latin rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub kind: GlyphKind,
    /// Base Latin string. Empty for the virama.
    pub latin: &'static str,
}

impl Glyph {
    /// Classifies `ch` against the fixed Tamil table. Anything outside the
    /// table (including unassigned code points in the Tamil block) is `None`.
    pub fn classify(ch: char) -> Option<Glyph> {
        use GlyphKind::*;
        let (kind, latin) = match ch {
            'அ' => (Vowel, "a"),
            'ஆ' => (Vowel, "aa"),
            'இ' => (Vowel, "i"),
            'ஈ' => (Vowel, "ii"),
            'உ' => (Vowel, "u"),
            'ஊ' => (Vowel, "uu"),
            'எ' => (Vowel, "e"),
            'ஏ' => (Vowel, "ee"),
            'ஐ' => (Vowel, "ai"),
            'ஒ' => (Vowel, "o"),
            'ஓ' => (Vowel, "oo"),
            'ஔ' => (Vowel, "au"),

            'க' => (Consonant, "k"),
            'ங' => (Consonant, "ng"),
            'ச' => (Consonant, "ch"),
            'ஜ' => (Consonant, "j"),
            'ஞ' => (Consonant, "nj"),
            'ட' => (Consonant, "t"),
            'ண' => (Consonant, "n"),
            'த' => (Consonant, "th"),
            'ந' => (Consonant, "n"),
            'ன' => (Consonant, "n"),
            'ப' => (Consonant, "p"),
            'ம' => (Consonant, "m"),
            'ய' => (Consonant, "y"),
            'ர' => (Consonant, "r"),
            'ற' => (Consonant, "r"),
            'ல' => (Consonant, "l"),
            'ள' => (Consonant, "l"),
            'ழ' => (Consonant, "zh"),
            'வ' => (Consonant, "v"),
            'ஶ' => (Consonant, "sh"),
            'ஷ' => (Consonant, "sh"),
            'ஸ' => (Consonant, "s"),
            'ஹ' => (Consonant, "h"),

            '\u{0BBE}' => (VowelSign, "aa"),
            '\u{0BBF}' => (VowelSign, "i"),
            '\u{0BC0}' => (VowelSign, "ii"),
            '\u{0BC1}' => (VowelSign, "u"),
            '\u{0BC2}' => (VowelSign, "uu"),
            '\u{0BC6}' => (VowelSign, "e"),
            '\u{0BC7}' => (VowelSign, "ee"),
            '\u{0BC8}' => (VowelSign, "ai"),
            '\u{0BCA}' => (VowelSign, "o"),
            '\u{0BCB}' => (VowelSign, "oo"),
            '\u{0BCC}' => (VowelSign, "au"),

            '\u{0BCD}' => (Virama, ""),
            _ => return None,
        };
        Some(Glyph { ch, kind, latin })
    }

    pub fn is_mark(&self) -> bool {
        matches!(self.kind, GlyphKind::VowelSign | GlyphKind::Virama)
    }
}

/// A transliteration unit produced by scanning text left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    /// A standalone vowel letter.
    Vowel(Glyph),
    /// A consonant with at most one following sign or virama.
    Syllable { consonant: Glyph, mark: Option<Glyph> },
    /// A character with no Tamil mapping (including dangling marks).
    Literal(char),
}

/// Which canonicalization stage produced a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormStage {
    Raw,
    ScriptNormalized,
    Latinized,
    PhoneticFolded,
    Skeleton,
    /// Query only: the raw query folded without transliteration.
    QueryFolded,
    /// Query only: skeleton of the raw query.
    QuerySkeleton,
}

/// Anything that exposes named, optional string fields.
///
/// The engine never looks at a record through anything but this accessor.
pub trait Record {
    fn field(&self, name: &str) -> Option<&str>;
}

/// A record with an arbitrary set of string fields, as loaded from a pool file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRecord {
    fields: BTreeMap<String, String>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Record for FieldRecord {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
