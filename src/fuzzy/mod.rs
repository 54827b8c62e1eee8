// File: src/fuzzy/mod.rs
pub mod forms;
pub mod matcher;
pub mod phonetic;
