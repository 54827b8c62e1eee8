// File: src/lib.rs

pub mod bilingual;
pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod persistence;
pub mod session;

pub use crate::bilingual::{BilingualIndex, FieldPair};
pub use crate::core::converter::latinize;
pub use crate::core::engine::{filter_records, CandidatePool};
pub use crate::core::script::normalize_script;
pub use crate::core::types::{FieldRecord, Record};
pub use crate::error::{Error, Result};
pub use crate::fuzzy::forms::CanonicalForms;
pub use crate::fuzzy::matcher::{exact_match, highlight, matches};
pub use crate::fuzzy::phonetic::{fold_phonetic, skeleton};
pub use crate::session::{Commit, CommitKind, SearchSession};
