// File: src/core/mod.rs
pub mod converter;
pub mod engine;
pub mod script;
pub mod types;
