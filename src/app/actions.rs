//! Actions representing side effects to be executed by the terminal shell.
//!
//! The event handler never touches the clipboard, the browser, or the worker
//! channel itself. It returns a `Vec<Action>` and the shell executes them in
//! order after the state update.
//!
//! # Example
//!
//! ```rust
//! use vcfinder::app::Action;
//! use vcfinder::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::search(1, "fintech".to_string())),
//!     Action::OpenUrl { url: "https://example.com".to_string() },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;
use std::time::Duration;

/// How long the "Copied!" confirmation stays on a card.
pub const COPIED_CONFIRMATION: Duration = Duration::from_secs(2);

/// Commands produced by the event handler for the shell to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Writes a firm's contact email to the system clipboard.
    ///
    /// On success the shell feeds back `Event::EmailCopied` and schedules
    /// `Event::CopiedExpired` after [`COPIED_CONFIRMATION`].
    CopyToClipboard {
        firm_id: String,
        email: String,
    },

    /// Hands a website URL to the platform opener, unmodified.
    OpenUrl { url: String },

    /// Restores the terminal and exits.
    Quit,
}
