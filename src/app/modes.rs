//! Focus and suggestion-navigation state types.
//!
//! # State Machines
//!
//! Input focus decides how keys are interpreted:
//! - **Typing**: keys edit the query and drive the suggestion panel
//! - **Browsing**: keys move between result cards and trigger card actions
//!
//! The suggestion cursor tracks keyboard selection inside the suggestion panel:
//!
//! ```text
//!                advance / retreat (wraps)
//!   NoSelection ──────────────────────────▶ Selected(i)
//!        ▲                                      │
//!        └──── confirm / fill / dismiss / ──────┘
//!              suggestion list replaced
//! ```
//!
//! # Example
//!
//! ```rust
//! use vcfinder::app::modes::SuggestionCursor;
//!
//! let mut cursor = SuggestionCursor::NoSelection;
//! cursor.advance(3);
//! assert_eq!(cursor, SuggestionCursor::Selected(0));
//! cursor.retreat(3);
//! assert_eq!(cursor, SuggestionCursor::Selected(2));
//! ```

/// Which part of the screen receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The query input has focus.
    ///
    /// Printable keys edit the query; arrows, Tab, Enter and Esc drive the
    /// suggestion panel.
    Typing,

    /// The result list has focus.
    ///
    /// Keys move the card cursor, copy emails, open websites, and pick popular
    /// industries before the first search.
    Browsing,
}

/// Keyboard selection within the suggestion panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionCursor {
    /// No suggestion is highlighted.
    #[default]
    NoSelection,

    /// The suggestion at this index is highlighted.
    Selected(usize),
}

impl SuggestionCursor {
    /// Moves forward through a list of `len` suggestions, wrapping to the first.
    ///
    /// From `NoSelection` the first suggestion is selected. No-op when `len` is 0.
    pub fn advance(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        *self = match *self {
            Self::NoSelection => Self::Selected(0),
            Self::Selected(i) if i + 1 < len => Self::Selected(i + 1),
            Self::Selected(_) => Self::Selected(0),
        };
    }

    /// Moves backward through a list of `len` suggestions, wrapping to the last.
    ///
    /// From `NoSelection` the last suggestion is selected. No-op when `len` is 0.
    pub fn retreat(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        *self = match *self {
            Self::Selected(i) if i > 0 && i < len => Self::Selected(i - 1),
            Self::NoSelection | Self::Selected(_) => Self::Selected(len - 1),
        };
    }

    /// Returns to `NoSelection`.
    pub fn reset(&mut self) {
        *self = Self::NoSelection;
    }

    /// Index of the highlighted suggestion, if any.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::NoSelection => None,
            Self::Selected(i) => Some(i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SuggestionCursor;

    #[test]
    fn advancing_visits_every_index_then_wraps() {
        let mut cursor = SuggestionCursor::NoSelection;
        let mut visited = Vec::new();
        for _ in 0..4 {
            cursor.advance(3);
            visited.push(cursor.index().unwrap());
        }
        assert_eq!(visited, vec![0, 1, 2, 0]);
    }

    #[test]
    fn retreating_from_first_wraps_to_last() {
        let mut cursor = SuggestionCursor::Selected(0);
        cursor.retreat(3);
        assert_eq!(cursor, SuggestionCursor::Selected(2));
        cursor.retreat(3);
        assert_eq!(cursor, SuggestionCursor::Selected(1));
    }

    #[test]
    fn retreating_from_no_selection_selects_last() {
        let mut cursor = SuggestionCursor::NoSelection;
        cursor.retreat(5);
        assert_eq!(cursor, SuggestionCursor::Selected(4));
    }

    #[test]
    fn empty_list_leaves_cursor_untouched() {
        let mut cursor = SuggestionCursor::NoSelection;
        cursor.advance(0);
        cursor.retreat(0);
        assert_eq!(cursor, SuggestionCursor::NoSelection);
    }

    #[test]
    fn reset_clears_selection() {
        let mut cursor = SuggestionCursor::Selected(3);
        cursor.reset();
        assert_eq!(cursor.index(), None);
    }
}
