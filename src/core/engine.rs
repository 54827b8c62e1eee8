// File: src/core/engine.rs
use crate::core::types::Record;
use crate::fuzzy::forms::CanonicalForms;
use crate::fuzzy::matcher::{exact_match_stages, matches};
use tracing::debug;

/// Precomputed canonical forms for one record: one entry per searched field
/// that is present and non-blank.
#[derive(Debug, Clone, Default)]
pub struct RecordForms {
    fields: Vec<CanonicalForms>,
}

impl RecordForms {
    pub fn build<R: Record + ?Sized, S: AsRef<str>>(record: &R, fields: &[S]) -> Self {
        let fields = fields
            .iter()
            .filter_map(|name| record.field(name.as_ref()))
            .map(CanonicalForms::for_record)
            .filter(|forms| !forms.is_empty())
            .collect();
        Self { fields }
    }

    /// Substring match against any field. A blank query matches every record,
    /// even one with no searchable text.
    pub fn matches(&self, query: &CanonicalForms) -> bool {
        query.is_empty() || self.fields.iter().any(|field| matches(query, field))
    }

    pub fn exact_match(&self, query: &CanonicalForms) -> bool {
        self.fields
            .iter()
            .any(|field| exact_match_stages(query, field).is_some())
    }
}

/// The candidate pool behind every search surface: records in their original
/// order, each with its forms computed once at load time.
pub struct CandidatePool<R> {
    records: Vec<R>,
    forms: Vec<RecordForms>,
    search_fields: Vec<String>,
}

impl<R: Record> CandidatePool<R> {
    pub fn new<S: AsRef<str>>(records: Vec<R>, search_fields: &[S]) -> Self {
        let search_fields: Vec<String> = search_fields
            .iter()
            .map(|f| f.as_ref().to_string())
            .collect();
        let forms = records
            .iter()
            .map(|record| RecordForms::build(record, search_fields.as_slice()))
            .collect();
        debug!(
            records = records.len(),
            fields = search_fields.len(),
            "built candidate pool"
        );
        Self { records, forms, search_fields }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Indices of matching records, in pool order. Nothing is re-ranked.
    pub fn filter_forms(&self, query: &CanonicalForms) -> Vec<usize> {
        self.forms
            .iter()
            .enumerate()
            .filter(|(_, forms)| forms.matches(query))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn filter(&self, query: &str) -> Vec<usize> {
        self.filter_forms(&CanonicalForms::for_query(query))
    }

    /// The first record, in pool order, with a form exactly equal to a query form.
    pub fn find_exact(&self, query: &CanonicalForms) -> Option<usize> {
        if query.is_empty() {
            return None;
        }
        self.forms.iter().position(|forms| forms.exact_match(query))
    }
}

/// Filters an arbitrary slice without a precomputed pool, for one-off lists
/// such as the dashboard's bill search. Order is preserved.
pub fn filter_records<'r, R: Record, S: AsRef<str>>(
    records: &'r [R],
    fields: &[S],
    query: &str,
) -> Vec<&'r R> {
    let query = CanonicalForms::for_query(query);
    records
        .iter()
        .filter(|record| RecordForms::build(*record, fields).matches(&query))
        .collect()
}
