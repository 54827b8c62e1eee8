// File: src/bilingual.rs
use crate::core::types::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Two fields of the same record holding one value in two scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPair {
    pub english: String,
    pub tamil: String,
}

impl FieldPair {
    pub fn new(english: &str, tamil: &str) -> Self {
        Self {
            english: english.to_string(),
            tamil: tamil.to_string(),
        }
    }
}

/// Maps a value in one script to its counterpart in the other, for showing
/// an opposite-script subtitle next to a matched value.
///
/// Built once per dataset load and read-only afterwards; rebuilding replaces
/// the whole map.
#[derive(Debug, Clone, Default)]
pub struct BilingualIndex {
    entries: HashMap<String, String>,
}

impl BilingualIndex {
    /// Keys are case-folded and trimmed. This index is for display, not search,
    /// so the full canonical forms are not used.
    pub fn normalize_key(s: &str) -> String {
        s.trim().to_lowercase()
    }

    /// Links both directions of every pair whose sides are both non-blank.
    /// Later records overwrite earlier ones on a colliding key.
    pub fn build<R: Record>(records: &[R], pairs: &[FieldPair]) -> Self {
        let mut index = Self::default();
        let mut overwritten = 0usize;
        for record in records {
            for pair in pairs {
                let (Some(english), Some(tamil)) =
                    (record.field(&pair.english), record.field(&pair.tamil))
                else {
                    continue;
                };
                if english.trim().is_empty() || tamil.trim().is_empty() {
                    continue;
                }
                overwritten += usize::from(index.link(english, tamil));
                overwritten += usize::from(index.link(tamil, english));
            }
        }
        debug!(entries = index.len(), overwritten, "built bilingual index");
        index
    }

    /// Returns true when an existing, different value was replaced.
    fn link(&mut self, from: &str, to: &str) -> bool {
        let key = Self::normalize_key(from);
        match self.entries.insert(key, to.to_string()) {
            Some(previous) if previous != to => {
                // Which record should win is undecided; last write wins for now.
                warn!(key = from, previous = %previous, replacement = to, "bilingual key collision");
                true
            }
            _ => false,
        }
    }

    /// Exact-key lookup. The key is normalized the same way entries were.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&Self::normalize_key(key))
            .map(String::as_str)
    }

    pub fn rebuild<R: Record>(&mut self, records: &[R], pairs: &[FieldPair]) {
        *self = Self::build(records, pairs);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldRecord;

    fn pairs() -> Vec<FieldPair> {
        vec![FieldPair::new("name", "nameTamil"), FieldPair::new("city", "cityTamil")]
    }

    #[test]
    fn links_both_directions() {
        let records = vec![FieldRecord::new()
            .with("name", "Murugan")
            .with("nameTamil", "முருகன்")
            .with("city", "Madurai")
            .with("cityTamil", "மதுரை")];
        let index = BilingualIndex::build(&records, &pairs());
        assert_eq!(index.lookup("murugan"), Some("முருகன்"));
        assert_eq!(index.lookup("  MURUGAN "), Some("முருகன்"));
        assert_eq!(index.lookup("முருகன்"), Some("Murugan"));
        assert_eq!(index.lookup("மதுரை"), Some("Madurai"));
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn skips_half_filled_pairs() {
        let records = vec![
            FieldRecord::new().with("name", "Kumar"),
            FieldRecord::new().with("name", "Ravi").with("nameTamil", "  "),
        ];
        let index = BilingualIndex::build(&records, &pairs());
        assert!(index.is_empty());
        assert_eq!(index.lookup("kumar"), None);
    }

    #[test]
    fn last_write_wins_on_collision() {
        let records = vec![
            FieldRecord::new().with("name", "Selvi").with("nameTamil", "செல்வி"),
            FieldRecord::new().with("name", "selvi").with("nameTamil", "சேல்வி"),
        ];
        let index = BilingualIndex::build(&records, &pairs());
        assert_eq!(index.lookup("selvi"), Some("சேல்வி"));
        assert_eq!(index.lookup("செல்வி"), Some("Selvi"));
    }

    #[test]
    fn rebuild_replaces_everything() {
        let first = vec![FieldRecord::new().with("name", "A").with("nameTamil", "அ")];
        let second = vec![FieldRecord::new().with("name", "B").with("nameTamil", "ப")];
        let mut index = BilingualIndex::build(&first, &pairs());
        index.rebuild(&second, &pairs());
        assert_eq!(index.lookup("a"), None);
        assert_eq!(index.lookup("b"), Some("ப"));
    }
}
