//! The read-only firm corpus.
//!
//! The corpus is loaded once at startup, either from the dataset embedded in
//! the binary or from a JSON file named in configuration, and is shared
//! immutably between the UI thread and the search worker.

use crate::domain::error::{Result, VcFinderError};
use crate::domain::firm::Firm;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// Dataset compiled into the binary, used when no `corpus_file` is configured.
const EMBEDDED_CORPUS: &str = include_str!("../../data/firms.json");

/// Immutable, cheaply cloneable collection of firm records.
///
/// Cloning shares the underlying slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    firms: Arc<[Firm]>,
}

impl Corpus {
    /// Wraps an already-built list of firms.
    #[must_use]
    pub fn new(firms: Vec<Firm>) -> Self {
        Self {
            firms: firms.into(),
        }
    }

    /// Parses a corpus from a JSON array of firm records.
    ///
    /// # Errors
    ///
    /// Returns [`VcFinderError::Corpus`] if the document is not an array of
    /// well-shaped records.
    pub fn from_json(json: &str) -> Result<Self> {
        let firms: Vec<Firm> = serde_json::from_str(json)
            .map_err(|e| VcFinderError::Corpus(format!("failed to parse corpus JSON: {e}")))?;

        tracing::debug!(firm_count = firms.len(), "corpus parsed");
        Ok(Self::new(firms))
    }

    /// Reads and parses a corpus file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a corpus error if it
    /// cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading corpus file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Loads the dataset bundled with the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled dataset is malformed.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CORPUS)
    }

    /// All firms in corpus order.
    #[must_use]
    pub fn firms(&self) -> &[Firm] {
        &self.firms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.firms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.firms.is_empty()
    }

    /// Looks up a firm by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Firm> {
        self.firms.iter().find(|firm| firm.id == id)
    }

    /// The industry tag universe: every distinct tag, sorted.
    ///
    /// Derived on each call, never stored. Ordering is plain string ordering,
    /// so `"FinOps"` sorts before `"fintech"`.
    #[must_use]
    pub fn industry_universe(&self) -> Vec<&str> {
        self.firms
            .iter()
            .flat_map(|firm| firm.industries.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::firm::tests_support::sample;

    #[test]
    fn embedded_corpus_parses() {
        let corpus = Corpus::embedded().unwrap();
        assert!(!corpus.is_empty());
        assert!(corpus.firms().iter().all(|f| !f.industries.is_empty()));
    }

    #[test]
    fn embedded_corpus_ids_are_unique() {
        let corpus = Corpus::embedded().unwrap();
        let ids: BTreeSet<&str> = corpus.firms().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), corpus.len());
    }

    #[test]
    fn universe_is_sorted_and_deduplicated() {
        let corpus = Corpus::new(vec![
            sample("1", &["fintech", "SaaS"]),
            sample("2", &["fintech", "FinOps"]),
        ]);

        assert_eq!(corpus.industry_universe(), vec!["FinOps", "SaaS", "fintech"]);
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = Corpus::from_json(r#"{"firms": []}"#).unwrap_err();
        assert!(matches!(err, VcFinderError::Corpus(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("firms.json");
        let json = serde_json::to_string(&vec![sample("a", &["AI"])]).unwrap();
        std::fs::write(&path, json).unwrap();

        let corpus = Corpus::from_file(&path).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get("a").map(|f| f.name.as_str()), Some("Firm a"));
    }
}
