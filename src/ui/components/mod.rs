//! Composable UI component renderers.
//!
//! Each component writes one part of the screen into the frame buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - `header`: Title bar with the theme mode
//! - `search`: Query input box with loading indicator
//! - `suggestions`: Industry suggestion dropdown
//! - `cards`: Result summary and firm cards
//! - `empty`: Welcome, loading, and no-results messages
//! - `footer`: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! row 1       [blank]
//! row 2       [Header]
//! row 3       [Border]
//! rows 4-6    [Search Bar]
//! row 7       [blank]
//! row 8       [Summary | Message]
//! row 9       [blank]
//! rows 10..   [Cards]              ← suggestion panel overlays from row 7
//! rows-1      [Border]
//! rows        [Footer]
//! ```

mod cards;
mod empty;
mod footer;
mod header;
mod search;
mod suggestions;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use cards::render_result_list;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use suggestions::render_suggestions;

/// Rows taken by one card, including the blank line after it.
pub const CARD_HEIGHT: usize = 7;

/// Rows around the card list: everything above row 10 plus border and footer.
pub const RESULTS_CHROME_ROWS: usize = 11;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the full screen layout.
pub fn render_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Row 1 stays blank.

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    let panel_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);

    let body_row = panel_row + 1;
    match &vm.body {
        Body::Message(empty) => {
            render_empty_state(out, body_row + 1, empty, theme, cols);
        }
        Body::Results(list) => {
            render_result_list(out, body_row, list, theme, cols);
        }
    }

    if let Some(panel) = &vm.suggestions {
        render_suggestions(out, panel_row, panel, theme, cols);
    }

    let footer_row = rows.max(body_row + 2);
    let border_row = footer_row - 1;

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}
