//! Storage layer for user preferences.
//!
//! The firm corpus is read-only and lives in [`crate::domain::Corpus`]; this
//! layer only persists preferences such as the theme.
//!
//! # Modules
//!
//! - `backend`: the [`PreferenceStore`] trait
//! - `json`: JSON file implementation with atomic writes, plus an in-memory fallback

pub mod backend;
pub mod json;

pub use backend::PreferenceStore;
pub use json::{JsonPreferences, MemoryPreferences};
