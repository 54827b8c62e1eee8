// File: src/fuzzy/forms.rs
use crate::core::converter::latinize;
use crate::core::script::{normalize_script, strip_separators};
use crate::core::types::FormStage;
use crate::fuzzy::phonetic::{fold_phonetic, skeleton};

/// The canonical representations of one source string.
///
/// Empty forms are never stored. Duplicates across stages are kept; matching
/// treats the collection as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalForms {
    forms: Vec<(FormStage, String)>,
}

impl CanonicalForms {
    /// Forms for a stored record field: the phonetic stages always start from
    /// the latinized text, so Tamil and Tanglish converge.
    pub fn for_record(s: &str) -> Self {
        let latin = latinize(s);
        let mut forms = Self::default();
        forms.push(FormStage::Raw, s.to_lowercase());
        forms.push(FormStage::ScriptNormalized, normalize_script(s));
        forms.push(FormStage::Latinized, latin.clone());
        forms.push(FormStage::PhoneticFolded, fold_phonetic(&latin));
        forms.push(FormStage::Skeleton, skeleton(&latin));
        forms
    }

    /// Forms for user input: the record stages plus a fold of the query as
    /// typed, for queries that are already Latin and need no transliteration.
    pub fn for_query(s: &str) -> Self {
        let mut forms = Self::for_record(s);
        let typed = strip_separators(s);
        forms.push(FormStage::QueryFolded, fold_phonetic(&typed));
        forms.push(FormStage::QuerySkeleton, skeleton(&typed));
        forms
    }

    fn push(&mut self, stage: FormStage, text: String) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        let text = if trimmed.len() == text.len() { text } else { trimmed.to_string() };
        self.forms.push((stage, text));
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.forms.iter().map(|(_, text)| text.as_str())
    }

    pub fn stages(&self) -> impl Iterator<Item = (FormStage, &str)> + '_ {
        self.forms.iter().map(|(stage, text)| (*stage, text.as_str()))
    }

    pub fn get(&self, stage: FormStage) -> Option<&str> {
        self.stages().find(|(s, _)| *s == stage).map(|(_, text)| text)
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }
}
