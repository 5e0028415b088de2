//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where input turns into state changes.
//! It returns whether the screen needs redrawing plus the side effects the
//! shell must perform.
//!
//! # Event Types
//!
//! - **Query editing**: `Char`, `Backspace`, `ClearQuery`
//! - **Suggestion panel**: `SuggestionNext`, `SuggestionPrevious`, `FillSuggestion`, `Confirm`, `Dismiss`
//! - **Focus**: `FocusInput`, `FocusResults`
//! - **Result browsing**: `CardDown`, `CardUp`, `ScrollToTop`, `ScrollToPrevious`, `PickPopular`
//! - **Card actions**: `CopyEmail`, `OpenWebsite`, `EmailCopied`, `CopiedExpired`
//! - **Global**: `ToggleTheme`, `Quit`
//! - **Worker**: `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use vcfinder::app::{handle_event, Action, AppState, Event};
//! use vcfinder::domain::Corpus;
//! use vcfinder::preferences::ThemePreference;
//!
//! let mut state = AppState::new(Corpus::embedded()?, ThemePreference::default());
//! for c in "fintech".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (render, actions) = handle_event(&mut state, &Event::Confirm)?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), vcfinder::VcFinderError>(())
//! ```

use crate::app::modes::Focus;
use crate::app::state::POPULAR_INDUSTRIES;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::WorkerResponse;

/// Events triggered by key input, timers, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Empties the query.
    ClearQuery,

    /// Highlights the next suggestion (wraps).
    SuggestionNext,
    /// Highlights the previous suggestion (wraps).
    SuggestionPrevious,
    /// Copies the highlighted or first suggestion into the query.
    FillSuggestion,
    /// Searches for the highlighted suggestion, or for the query if none is highlighted.
    Confirm,
    /// Closes the suggestion panel, or leaves the input if it is already closed.
    Dismiss,

    FocusInput,
    FocusResults,

    CardDown,
    CardUp,
    ScrollToTop,
    ScrollToPrevious,

    /// Searches for the popular industry at this index (pre-search only).
    PickPopular(usize),

    /// Copies the selected card's email.
    CopyEmail,
    /// Opens the selected card's website.
    OpenWebsite,
    /// The clipboard accepted a firm's email.
    EmailCopied { firm_id: String },
    /// The "Copied!" confirmation for a firm timed out.
    CopiedExpired { firm_id: String },

    ToggleTheme,
    Quit,

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions must be executed in order.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that need to
/// propagate failures.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Char(c) => {
            state.push_char(*c);
            tracing::trace!(query = %state.query, "query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.query.is_empty() {
                return Ok((false, vec![]));
            }
            state.pop_char();
            Ok((true, vec![]))
        }
        Event::ClearQuery => {
            if state.query.is_empty() {
                return Ok((false, vec![]));
            }
            state.set_query(String::new());
            Ok((true, vec![]))
        }
        Event::SuggestionNext => {
            if !state.suggestions_visible() {
                return Ok((false, vec![]));
            }
            state.next_suggestion();
            Ok((true, vec![]))
        }
        Event::SuggestionPrevious => {
            if !state.suggestions_visible() {
                return Ok((false, vec![]));
            }
            state.previous_suggestion();
            Ok((true, vec![]))
        }
        Event::FillSuggestion => Ok((state.fill_suggestion(), vec![])),
        Event::Confirm => {
            let query = match state.selected_suggestion() {
                Some(suggestion) => {
                    let suggestion = suggestion.to_string();
                    tracing::debug!(suggestion = %suggestion, "suggestion confirmed");
                    state.set_query(suggestion.clone());
                    suggestion
                }
                None => state.query.clone(),
            };

            match state.begin_search(&query) {
                Some(request) => Ok((true, vec![Action::PostToWorker(request)])),
                None => {
                    state.hide_suggestions();
                    Ok((true, vec![]))
                }
            }
        }
        Event::Dismiss => {
            if state.show_suggestions {
                state.hide_suggestions();
            } else {
                state.focus = Focus::Browsing;
            }
            Ok((true, vec![]))
        }
        Event::FocusInput => {
            if state.focus == Focus::Typing {
                return Ok((false, vec![]));
            }
            state.focus = Focus::Typing;
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.focus == Focus::Browsing {
                return Ok((false, vec![]));
            }
            state.hide_suggestions();
            state.focus = Focus::Browsing;
            Ok((true, vec![]))
        }
        Event::CardDown => {
            state.move_card_down();
            Ok((!state.results.is_empty(), vec![]))
        }
        Event::CardUp => {
            state.move_card_up();
            Ok((!state.results.is_empty(), vec![]))
        }
        Event::ScrollToTop => {
            state.scroll_to_top();
            Ok((true, vec![]))
        }
        Event::ScrollToPrevious => {
            state.scroll_to_previous();
            Ok((true, vec![]))
        }
        Event::PickPopular(index) => {
            if state.has_searched || state.is_loading {
                return Ok((false, vec![]));
            }
            let Some(industry) = POPULAR_INDUSTRIES.get(*index) else {
                return Ok((false, vec![]));
            };

            tracing::debug!(industry = %industry, "popular industry picked");
            state.set_query((*industry).to_string());
            let actions: Vec<Action> = state.begin_search(industry).map(Action::PostToWorker).into_iter().collect();
            Ok((true, actions))
        }
        Event::CopyEmail => state.selected_firm().map_or_else(
            || {
                tracing::debug!("no card selected to copy from");
                Ok((false, vec![]))
            },
            |firm| {
                Ok((
                    false,
                    vec![Action::CopyToClipboard {
                        firm_id: firm.id.clone(),
                        email: firm.email.clone(),
                    }],
                ))
            },
        ),
        Event::OpenWebsite => state.selected_firm().map_or_else(
            || Ok((false, vec![])),
            |firm| {
                tracing::debug!(firm_id = %firm.id, url = %firm.website, "opening website");
                Ok((false, vec![Action::OpenUrl { url: firm.website.clone() }]))
            },
        ),
        Event::EmailCopied { firm_id } => {
            state.copied_firm = Some(firm_id.clone());
            Ok((true, vec![]))
        }
        Event::CopiedExpired { firm_id } => {
            if state.copied_firm.as_ref() != Some(firm_id) {
                return Ok((false, vec![]));
            }
            state.copied_firm = None;
            Ok((true, vec![]))
        }
        Event::ToggleTheme => {
            let persist = state.theme.toggle();
            Ok((true, vec![Action::PostToWorker(persist)]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::WorkerResponse(response) => match response {
            WorkerResponse::SearchCompleted {
                generation, results, ..
            } => Ok((state.complete_search(*generation, results.clone()), vec![])),
            WorkerResponse::SearchFailed { generation, message } => {
                tracing::warn!(generation = generation, error = %message, "search failed");
                Ok((state.fail_search(*generation), vec![]))
            }
            WorkerResponse::PreferenceSaved { key } => {
                tracing::debug!(key = %key, "preference saved");
                Ok((false, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                Ok((false, vec![]))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::firm::tests_support::sample;
    use crate::domain::Corpus;
    use crate::preferences::{ThemeMode, ThemePreference};
    use crate::worker::WorkerMessage;

    fn state() -> AppState {
        let corpus = Corpus::new(vec![
            sample("1", &["fintech", "SaaS"]),
            sample("2", &["healthcare"]),
            sample("3", &["FinOps"]),
        ]);
        AppState::new(corpus, ThemePreference::default())
    }

    fn type_query(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn search_request(actions: &[Action]) -> (u64, String) {
        match actions {
            [Action::PostToWorker(WorkerMessage::Search { generation, query, .. })] => (*generation, query.clone()),
            other => panic!("expected one search request, got {other:?}"),
        }
    }

    #[test]
    fn confirm_with_selection_searches_suggestion() {
        let mut state = state();
        type_query(&mut state, "fin");
        handle_event(&mut state, &Event::SuggestionNext).unwrap();
        handle_event(&mut state, &Event::SuggestionNext).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
        let (_, query) = search_request(&actions);

        assert_eq!(query, "fintech");
        assert_eq!(state.query, "fintech");
        assert!(state.is_loading);
        assert!(!state.show_suggestions);
    }

    #[test]
    fn confirm_without_selection_searches_trimmed_query() {
        let mut state = state();
        type_query(&mut state, " health ");

        let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
        assert_eq!(search_request(&actions).1, "health");
    }

    #[test]
    fn confirm_on_blank_query_does_nothing() {
        let mut state = state();
        type_query(&mut state, "  ");

        let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
        assert!(actions.is_empty());
        assert!(!state.is_loading);
    }

    #[test]
    fn dismiss_keeps_query() {
        let mut state = state();
        type_query(&mut state, "fin");
        handle_event(&mut state, &Event::SuggestionNext).unwrap();

        handle_event(&mut state, &Event::Dismiss).unwrap();
        assert_eq!(state.query, "fin");
        assert!(!state.show_suggestions);
        assert_eq!(state.selected_suggestion(), None);
        assert_eq!(state.focus, Focus::Typing);

        handle_event(&mut state, &Event::Dismiss).unwrap();
        assert_eq!(state.focus, Focus::Browsing);
    }

    #[test]
    fn navigation_without_panel_is_a_no_op() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::SuggestionNext).unwrap();
        assert!(!render);
    }

    #[test]
    fn worker_completion_settles_search() {
        let mut state = state();
        type_query(&mut state, "fin");
        let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
        let (generation, query) = search_request(&actions);

        let response = WorkerResponse::SearchCompleted {
            generation,
            query,
            results: vec![sample("1", &["fintech"])],
        };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

        assert!(render);
        assert!(state.has_searched);
        assert_eq!(state.results.len(), 1);
    }

    #[test]
    fn popular_pick_only_before_first_search() {
        let mut state = state();
        state.focus = Focus::Browsing;

        let (_, actions) = handle_event(&mut state, &Event::PickPopular(1)).unwrap();
        let (generation, query) = search_request(&actions);
        assert_eq!(query, "healthcare");
        assert_eq!(state.query, "healthcare");

        state.complete_search(generation, vec![]);
        let (_, actions) = handle_event(&mut state, &Event::PickPopular(0)).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn copy_and_expiry_round_trip() {
        let mut state = state();
        let generation = state.begin_search("fin").map(|_| state.generation()).unwrap();
        state.complete_search(generation, vec![sample("1", &["fintech"])]);
        state.focus = Focus::Browsing;

        let (_, actions) = handle_event(&mut state, &Event::CopyEmail).unwrap();
        assert_eq!(
            actions,
            vec![Action::CopyToClipboard {
                firm_id: "1".into(),
                email: "deals@firm1.example.com".into(),
            }]
        );

        handle_event(&mut state, &Event::EmailCopied { firm_id: "1".into() }).unwrap();
        assert_eq!(state.copied_firm.as_deref(), Some("1"));

        let (render, _) = handle_event(&mut state, &Event::CopiedExpired { firm_id: "2".into() }).unwrap();
        assert!(!render);
        handle_event(&mut state, &Event::CopiedExpired { firm_id: "1".into() }).unwrap();
        assert_eq!(state.copied_firm, None);
    }

    #[test]
    fn open_website_passes_url_through() {
        let mut state = state();
        let generation = state.begin_search("health").map(|_| state.generation()).unwrap();
        state.complete_search(generation, vec![sample("2", &["healthcare"])]);

        let (_, actions) = handle_event(&mut state, &Event::OpenWebsite).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                url: "https://firm2.example.com".into()
            }]
        );
    }

    #[test]
    fn toggle_theme_persists() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::ToggleTheme).unwrap();

        assert_eq!(state.theme.mode(), ThemeMode::Dark);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::SavePreference { value, .. })] if value == "dark"
        ));
    }
}
