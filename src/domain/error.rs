//! Error types for VCFinder.
//!
//! This module defines the centralized error type [`VcFinderError`] and a type alias
//! [`Result`] used across the crate. The search engine itself never fails; every
//! variant here belongs to an edge of the application (files, the clipboard, the
//! background worker, configuration).

use thiserror::Error;

/// The main error type for VCFinder operations.
///
/// Most variants carry a description of what went wrong. I/O failures convert
/// automatically from `std::io::Error` through `#[from]`.
///
/// # Examples
///
/// ```
/// use vcfinder::VcFinderError;
///
/// fn load_corpus() -> Result<(), VcFinderError> {
///     Err(VcFinderError::Corpus("expected a JSON array".to_string()))
/// }
///
/// assert!(load_corpus().is_err());
/// ```
#[derive(Debug, Error)]
pub enum VcFinderError {
    /// Reading or writing the preference store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or process I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The firm corpus could not be parsed.
    ///
    /// Raised at startup only; the corpus is never reloaded.
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// A theme could not be found or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The search worker thread is unreachable.
    ///
    /// Occurs when the request channel is closed, typically because the worker
    /// thread exited.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing to the system clipboard failed.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Handing a URL to the platform opener failed.
    #[error("Launcher error: {0}")]
    Launcher(String),
}

/// A specialized `Result` type for VCFinder operations.
pub type Result<T> = std::result::Result<T, VcFinderError>;
