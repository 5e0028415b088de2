//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Cursor positioning, centering, and match highlighting
//! - [`theme`]: Color palettes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    Body, CardItem, EmptyKind, EmptyState, FooterInfo, HeaderInfo, ResultList, SearchBarInfo, SuggestionItem,
    SuggestionPanel, TagItem, UIViewModel,
};
