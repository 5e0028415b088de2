//! Search & suggest engine.
//!
//! Two pure functions over a [`Corpus`]:
//!
//! - [`suggest`]: industry tags matching partial input, for the suggestion panel
//! - [`search`]: firms with at least one industry tag matching the query
//!
//! Matching is case-insensitive substring containment everywhere. There is no
//! ranking: results keep corpus order and suggestions keep sorted tag order.
//! The engine holds no state; the application layer decides when to call it.
//!
//! # Example
//!
//! ```rust
//! use vcfinder::domain::Corpus;
//! use vcfinder::engine;
//!
//! let corpus = Corpus::embedded()?;
//! let tags = engine::suggest("fin", &corpus);
//! assert!(tags.len() <= engine::MAX_SUGGESTIONS);
//!
//! let firms = engine::search("fintech", &corpus);
//! assert!(firms.iter().all(|f| f.has_industry_matching("fintech")));
//! # Ok::<(), vcfinder::VcFinderError>(())
//! ```

use crate::domain::{Corpus, Firm};

/// Maximum number of suggestions offered for one query.
pub const MAX_SUGGESTIONS: usize = 8;

/// Returns up to [`MAX_SUGGESTIONS`] industry tags containing `query`.
///
/// Tags come from the sorted, deduplicated tag universe and keep that order.
/// An empty query yields no suggestions. When more than eight tags match, the
/// list is a plain slice of the sorted matches.
#[must_use]
pub fn suggest(query: &str, corpus: &Corpus) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let suggestions: Vec<String> = corpus
        .industry_universe()
        .into_iter()
        .filter(|industry| industry.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(String::from)
        .collect();

    tracing::trace!(query = %query, suggestion_count = suggestions.len(), "suggestions computed");
    suggestions
}

/// Returns every firm with an industry tag containing `query`, in corpus order.
///
/// Callers are expected to pass a trimmed, non-empty query; the application
/// layer never searches for blank input. An empty `query` here would match
/// every firm.
#[must_use]
pub fn search(query: &str, corpus: &Corpus) -> Vec<Firm> {
    let _span = tracing::debug_span!("engine_search", query = %query, corpus_size = corpus.len()).entered();

    let needle = query.to_lowercase();
    let results: Vec<Firm> = corpus
        .firms()
        .iter()
        .filter(|firm| firm.has_industry_matching(&needle))
        .cloned()
        .collect();

    tracing::debug!(result_count = results.len(), "search completed");
    results
}

/// Computes character ranges of `text` to highlight for `query`.
///
/// Every non-overlapping, case-insensitive occurrence of `query` becomes one
/// `(start, end)` range of character indices (exclusive end). Adjacent
/// occurrences are merged into a single range.
///
/// # Example
///
/// ```rust
/// use vcfinder::engine::highlight_ranges;
///
/// assert_eq!(highlight_ranges("FinTech fintech", "fin"), vec![(0, 3), (8, 11)]);
/// assert!(highlight_ranges("SaaS", "").is_empty());
/// ```
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.chars().map(fold_char).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let haystack: Vec<char> = text.chars().map(fold_char).collect();
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut idx = 0;

    while idx + needle.len() <= haystack.len() {
        if haystack[idx..idx + needle.len()] == needle[..] {
            let end = idx + needle.len();
            match ranges.last_mut() {
                Some(last) if last.1 == idx => last.1 = end,
                _ => ranges.push((idx, end)),
            }
            idx = end;
        } else {
            idx += 1;
        }
    }

    ranges
}

/// Lowercases a single character while keeping a one-to-one index mapping.
fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}
