//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! strings, highlight ranges, and selection flags; no business logic.
//!
//! # Example
//!
//! ```rust
//! use vcfinder::ui::viewmodel::{Body, EmptyKind, EmptyState};
//!
//! let body = Body::Message(EmptyState {
//!     kind: EmptyKind::Loading,
//!     message: "Searching for VCs in fintech...".to_string(),
//!     subtitle: String::new(),
//!     choices: vec![],
//! });
//! assert!(matches!(body, Body::Message(_)));
//! ```

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub search_bar: SearchBarInfo,

    /// Suggestion panel; `None` when hidden or empty.
    pub suggestions: Option<SuggestionPanel>,

    /// Main area below the search bar.
    pub body: Body,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Active theme mode, shown at the right edge.
    pub theme_label: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help for the current focus.
    pub keybindings: String,
}

/// Search input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// Shown in place of the query while it is empty.
    pub placeholder: String,

    /// A search is pending.
    pub is_loading: bool,

    /// Keys currently edit the query.
    pub is_focused: bool,
}

/// Dropdown of industry suggestions under the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionPanel {
    pub items: Vec<SuggestionItem>,
}

/// One suggestion row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    pub text: String,

    /// Character ranges of the query inside `text`.
    pub highlight_ranges: Vec<(usize, usize)>,

    pub is_selected: bool,
}

/// What fills the area below the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Centered message: loading, no results, or the pre-search welcome.
    Message(EmptyState),

    /// A window of result cards.
    Results(ResultList),
}

/// Which centered message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// Before the first search.
    Welcome,
    /// A search is pending.
    Loading,
    /// The last search matched nothing.
    NoResults,
}

/// Centered message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub kind: EmptyKind,

    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,

    /// Numbered options listed under the message (popular industries).
    pub choices: Vec<String>,
}

/// Visible slice of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultList {
    /// e.g. `2 Venture Capital Firms found for "fin"`.
    pub summary: String,

    pub cards: Vec<CardItem>,

    /// Position of `cards[0]` in the full result list.
    pub first_index: usize,

    pub total: usize,
}

/// One firm card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub name: String,
    pub name_highlights: Vec<(usize, usize)>,

    pub tags: Vec<TagItem>,

    /// "Verified Email" or "Pending".
    pub badge: String,
    pub is_verified: bool,

    /// "Last verified: ..." line, only for verified emails.
    pub last_verified: Option<String>,

    pub description: String,

    /// Founded year, AUM, and country joined for display.
    pub facts: String,

    pub email: String,
    pub website: String,

    pub is_selected: bool,

    /// The email was just copied; show the confirmation.
    pub is_copied: bool,
}

/// One industry tag on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagItem {
    pub text: String,
    pub highlight_ranges: Vec<(usize, usize)>,

    /// The tag contains the searched query.
    pub is_match: bool,
}
