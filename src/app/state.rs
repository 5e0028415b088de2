//! Application state management and view model computation.
//!
//! [`AppState`] is the single search-state record owned by the UI thread: the
//! query, the suggestion list and its cursor, the result list, the loading
//! and has-searched flags, card selection, and the theme preference. It is
//! mutated only by the event handler and by worker responses.
//!
//! # Search lifecycle
//!
//! ```text
//!  pre-search ──begin_search──▶ loading ──complete_search──▶ results / no results
//!      ▲                          │                               │
//!      └──────── clear query ─────┴───────────────────────────────┘
//! ```
//!
//! Every [`begin_search`](AppState::begin_search) issues a new generation
//! number. A completion carrying any other generation is stale and ignored,
//! and clearing the query bumps the generation so an in-flight search can no
//! longer land.
//!
//! # Example
//!
//! ```rust
//! use vcfinder::app::AppState;
//! use vcfinder::domain::Corpus;
//! use vcfinder::preferences::ThemePreference;
//!
//! let mut state = AppState::new(Corpus::embedded()?, ThemePreference::default());
//! state.set_query("fin".to_string());
//! assert!(state.show_suggestions);
//!
//! let request = state.begin_search("fintech");
//! assert!(request.is_some());
//! assert!(state.is_loading);
//! # Ok::<(), vcfinder::VcFinderError>(())
//! ```

use super::modes::{Focus, SuggestionCursor};
use crate::domain::{Corpus, Firm};
use crate::engine;
use crate::preferences::ThemePreference;
use crate::ui::components::{CARD_HEIGHT, RESULTS_CHROME_ROWS};
use crate::ui::viewmodel::{
    Body, CardItem, EmptyKind, EmptyState, FooterInfo, HeaderInfo, ResultList, SearchBarInfo, SuggestionItem,
    SuggestionPanel, TagItem, UIViewModel,
};
use crate::worker::WorkerMessage;

/// Industries offered before the first search.
pub const POPULAR_INDUSTRIES: [&str; 8] = [
    "fintech",
    "healthcare",
    "SaaS",
    "consumer",
    "enterprise",
    "AI",
    "automotive",
    "fashion",
];

const SEARCH_PLACEHOLDER: &str = "Search for an industry (e.g., fintech, healthcare, automotive, fashion)";

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Firms searched against; never mutated.
    pub corpus: Corpus,

    /// Text in the search input.
    pub query: String,

    /// Results of the last completed search, in corpus order.
    pub results: Vec<Firm>,

    /// A search has been issued and has not completed.
    pub is_loading: bool,

    /// At most [`engine::MAX_SUGGESTIONS`] tags matching `query`.
    pub suggestions: Vec<String>,

    /// The suggestion panel is open.
    ///
    /// Set whenever the query is edited to something non-empty; cleared by
    /// confirm, fill, dismiss, and search completion.
    pub show_suggestions: bool,

    pub suggestion_cursor: SuggestionCursor,

    /// Distinguishes "never searched" from "searched, nothing found".
    pub has_searched: bool,

    /// Query of the most recently issued search.
    pub searched_query: String,

    pub focus: Focus,

    /// Highlighted card while browsing.
    pub selected_card: usize,

    /// Card to return to after jumping to the top.
    pub previous_card: Option<usize>,

    /// Firm whose email was just copied.
    pub copied_firm: Option<String>,

    pub theme: ThemePreference,

    /// Generation of the most recently issued search.
    generation: u64,
}

impl AppState {
    #[must_use]
    pub fn new(corpus: Corpus, theme: ThemePreference) -> Self {
        Self {
            corpus,
            query: String::new(),
            results: Vec::new(),
            is_loading: false,
            suggestions: Vec::new(),
            show_suggestions: false,
            suggestion_cursor: SuggestionCursor::NoSelection,
            has_searched: false,
            searched_query: String::new(),
            focus: Focus::Typing,
            selected_card: 0,
            previous_card: None,
            copied_firm: None,
            theme,
            generation: 0,
        }
    }

    /// Generation of the most recently issued search.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// `true` when the suggestion panel is open and has entries to navigate.
    #[must_use]
    pub fn suggestions_visible(&self) -> bool {
        self.show_suggestions && !self.suggestions.is_empty()
    }

    /// Replaces the query text.
    ///
    /// Suggestions are recomputed. An empty query returns to the pre-search
    /// state immediately and supersedes any search still in flight.
    pub fn set_query(&mut self, query: String) {
        self.query = query;

        if self.query.is_empty() {
            self.reset_search();
        }

        self.update_suggestions();
    }

    pub fn push_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_char(&mut self) {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.set_query(query);
    }

    /// Recomputes suggestions for the current query.
    ///
    /// The cursor always returns to no-selection because the list was replaced.
    pub fn update_suggestions(&mut self) {
        self.suggestions = engine::suggest(&self.query, &self.corpus);
        self.show_suggestions = !self.query.is_empty();
        self.suggestion_cursor.reset();
    }

    fn reset_search(&mut self) {
        if self.is_loading {
            tracing::debug!(generation = self.generation, "query cleared, superseding pending search");
        }
        self.generation += 1;
        self.results.clear();
        self.has_searched = false;
        self.is_loading = false;
        self.searched_query.clear();
        self.selected_card = 0;
        self.previous_card = None;
        self.copied_firm = None;
    }

    pub fn hide_suggestions(&mut self) {
        self.show_suggestions = false;
        self.suggestion_cursor.reset();
    }

    pub fn next_suggestion(&mut self) {
        if self.suggestions_visible() {
            self.suggestion_cursor.advance(self.suggestions.len());
        }
    }

    pub fn previous_suggestion(&mut self) {
        if self.suggestions_visible() {
            self.suggestion_cursor.retreat(self.suggestions.len());
        }
    }

    /// The highlighted suggestion, if the panel is visible and one is selected.
    #[must_use]
    pub fn selected_suggestion(&self) -> Option<&str> {
        if !self.suggestions_visible() {
            return None;
        }
        self.suggestion_cursor
            .index()
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }

    /// Copies the selected (or first) suggestion into the query without searching.
    ///
    /// Returns `false` when the panel has nothing to fill from.
    pub fn fill_suggestion(&mut self) -> bool {
        if !self.suggestions_visible() {
            return false;
        }

        let index = self.suggestion_cursor.index().unwrap_or(0);
        let Some(fill) = self.suggestions.get(index).cloned() else {
            return false;
        };

        self.set_query(fill);
        self.hide_suggestions();
        true
    }

    /// Marks a search as pending and returns the worker request for it.
    ///
    /// Returns `None` for empty or whitespace-only input; nothing changes.
    pub fn begin_search(&mut self, query: &str) -> Option<WorkerMessage> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("ignoring blank search");
            return None;
        }

        self.generation += 1;
        self.is_loading = true;
        self.searched_query = query.to_string();
        self.selected_card = 0;
        self.previous_card = None;
        self.copied_firm = None;
        self.hide_suggestions();

        tracing::debug!(generation = self.generation, query = %query, "search started");
        Some(WorkerMessage::search(self.generation, query.to_string()))
    }

    /// Applies a search result.
    ///
    /// Returns `false` and changes nothing if `generation` is stale.
    pub fn complete_search(&mut self, generation: u64, results: Vec<Firm>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale search result");
            return false;
        }

        tracing::debug!(generation, result_count = results.len(), "search completed");
        self.results = results;
        self.is_loading = false;
        self.has_searched = true;
        self.selected_card = 0;
        self.hide_suggestions();
        true
    }

    /// Settles a failed search as an empty result.
    ///
    /// Returns `false` if `generation` is stale.
    pub fn fail_search(&mut self, generation: u64) -> bool {
        self.complete_search(generation, Vec::new())
    }

    /// Moves the card cursor down, wrapping to the first card.
    pub fn move_card_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_card = (self.selected_card + 1) % self.results.len();
    }

    /// Moves the card cursor up, wrapping to the last card.
    pub fn move_card_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_card = if self.selected_card == 0 {
            self.results.len() - 1
        } else {
            self.selected_card - 1
        };
    }

    /// Jumps to the first card, remembering where the cursor was.
    pub fn scroll_to_top(&mut self) {
        if self.selected_card > 0 {
            self.previous_card = Some(self.selected_card);
        }
        self.selected_card = 0;
    }

    /// Returns to the card remembered by [`scroll_to_top`](Self::scroll_to_top).
    pub fn scroll_to_previous(&mut self) {
        if let Some(previous) = self.previous_card {
            if previous < self.results.len() {
                self.selected_card = previous;
            }
        }
    }

    #[must_use]
    pub fn selected_firm(&self) -> Option<&Firm> {
        self.results.get(self.selected_card)
    }

    /// Computes a renderable view model for a terminal of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            suggestions: self.compute_suggestions(),
            body: self.compute_body(rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: "VCFinder".to_string(),
            theme_label: format!("{} mode", self.theme.mode()),
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.query.clone(),
            placeholder: SEARCH_PLACEHOLDER.to_string(),
            is_loading: self.is_loading,
            is_focused: self.focus == Focus::Typing,
        }
    }

    fn compute_suggestions(&self) -> Option<SuggestionPanel> {
        if self.focus != Focus::Typing || !self.suggestions_visible() {
            return None;
        }

        let selected = self.suggestion_cursor.index();
        let items = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(idx, text)| SuggestionItem {
                text: text.clone(),
                highlight_ranges: engine::highlight_ranges(text, &self.query),
                is_selected: selected == Some(idx),
            })
            .collect();

        Some(SuggestionPanel { items })
    }

    fn compute_body(&self, rows: usize, cols: usize) -> Body {
        if self.is_loading {
            return Body::Message(EmptyState {
                kind: EmptyKind::Loading,
                message: format!("Searching for VCs in {}...", self.searched_query),
                subtitle: String::new(),
                choices: vec![],
            });
        }

        if !self.has_searched {
            return Body::Message(EmptyState {
                kind: EmptyKind::Welcome,
                message: "Ready to find your perfect VC match?".to_string(),
                subtitle: "Try searching for different industries like \"fintech\", \"healthcare\", \"SaaS\", \
                           \"consumer\", \"automotive\", or \"fashion\""
                    .to_string(),
                choices: POPULAR_INDUSTRIES.iter().map(|s| (*s).to_string()).collect(),
            });
        }

        if self.results.is_empty() {
            return Body::Message(EmptyState {
                kind: EmptyKind::NoResults,
                message: format!("No VCs found for \"{}\"", self.searched_query),
                subtitle: "Try searching for different industries like \"fintech\", \"healthcare\", \"SaaS\", \
                           or \"consumer\""
                    .to_string(),
                choices: vec![],
            });
        }

        Body::Results(self.compute_result_list(rows, cols))
    }

    /// Windows the result list around the selected card.
    fn compute_result_list(&self, rows: usize, cols: usize) -> ResultList {
        let total = self.results.len();
        let capacity = (rows.saturating_sub(RESULTS_CHROME_ROWS) / CARD_HEIGHT).max(1);

        let mut first = self.selected_card.saturating_sub(capacity / 2);
        let last = (first + capacity).min(total);
        if last - first < capacity {
            first = last.saturating_sub(capacity);
        }

        let cards = self.results[first..last]
            .iter()
            .enumerate()
            .map(|(offset, firm)| self.compute_card(firm, first + offset, cols))
            .collect();

        let plural = if total == 1 { "" } else { "s" };
        ResultList {
            summary: format!("{total} Venture Capital Firm{plural} found for \"{}\"", self.searched_query),
            cards,
            first_index: first,
            total,
        }
    }

    fn compute_card(&self, firm: &Firm, index: usize, cols: usize) -> CardItem {
        // Card text starts at column 5 and keeps a 2-column right margin.
        const CARD_INDENT: usize = 7;

        let query = self.searched_query.as_str();
        let tags = firm
            .industries
            .iter()
            .map(|tag| {
                let highlight_ranges = engine::highlight_ranges(tag, query);
                TagItem {
                    is_match: !highlight_ranges.is_empty(),
                    text: tag.clone(),
                    highlight_ranges,
                }
            })
            .collect();

        CardItem {
            name: firm.name.clone(),
            name_highlights: engine::highlight_ranges(&firm.name, query),
            tags,
            badge: firm.validation_label().to_string(),
            is_verified: firm.email_validated,
            last_verified: firm
                .email_validated
                .then(|| format!("Last verified: {}", firm.last_validated_display())),
            description: truncate(&firm.description, cols.saturating_sub(CARD_INDENT)),
            facts: format!("Founded {}  ·  AUM {}  ·  {}", firm.founded, firm.aum, firm.country),
            email: firm.email.clone(),
            website: firm.website.clone(),
            is_selected: self.focus == Focus::Browsing && index == self.selected_card,
            is_copied: self.copied_firm.as_deref() == Some(firm.id.as_str()),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            Focus::Typing if self.suggestions_visible() => {
                "↑/↓: select  Tab: fill  Enter: search  Esc: close  Ctrl+T: theme  Ctrl+C: quit"
            }
            Focus::Typing => "Enter: search  Ctrl+U: clear  Esc/↓: browse  Ctrl+T: theme  Ctrl+C: quit",
            Focus::Browsing if !self.results.is_empty() => {
                "j/k: move  c: copy email  o: open site  g: top  b: back  /: edit  t: theme  q: quit"
            }
            Focus::Browsing if !self.has_searched && !self.is_loading => {
                "1-8: popular industry  /: edit query  t: theme  q: quit"
            }
            Focus::Browsing => "/: edit query  t: theme  q: quit",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Shortens `text` to `width` characters, ending with "..." when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
