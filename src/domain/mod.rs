//! Domain layer for VCFinder.
//!
//! Core data types, independent of the terminal, the worker thread, and the
//! filesystem layout.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`firm`]: The firm record
//! - [`corpus`]: The immutable collection of firms and its derived tag universe
//!
//! # Examples
//!
//! ```
//! use vcfinder::domain::{Corpus, Result};
//!
//! fn industries() -> Result<usize> {
//!     let corpus = Corpus::embedded()?;
//!     Ok(corpus.industry_universe().len())
//! }
//! # assert!(industries().unwrap() > 0);
//! ```

pub mod corpus;
pub mod error;
pub mod firm;

pub use corpus::Corpus;
pub use error::{Result, VcFinderError};
pub use firm::Firm;
