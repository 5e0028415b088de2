//! Search bar component renderer.
//!
//! Renders the query input as a bordered box. While a search is pending the
//! right side of the box shows "Searching...".

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box and the suggestion panel.
pub const SEARCH_BOX_MARGIN: usize = 5;

const LOADING_LABEL: &str = "Searching... ";
const CARET: char = '▏';

/// Renders the 3-line search box at `row` and returns the next free row.
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────┐ [margin]
/// [margin] │ Search: fintech▏ Searching... │ [margin]
/// [margin] └──────────────────────────────┘ [margin]
/// ```
///
/// The border uses `search_bar_border` while the input has focus and `border`
/// otherwise. An empty query shows the dimmed placeholder.
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border_color));
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let prefix = " Search: ";
    let status = if search.is_loading { LOADING_LABEL } else { "" };
    let text_room = inner_width.saturating_sub(text_width(prefix) + text_width(status) + 1);

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border_color));
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(prefix);

    let mut used = text_width(prefix);
    if search.query.is_empty() {
        let placeholder: String = search.placeholder.chars().take(text_room).collect();
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&placeholder);
        out.push_str(Theme::reset());
        used += text_width(&placeholder);
    } else {
        // Keep the end of a long query visible.
        let query_width = text_width(&search.query);
        let visible: String = search.query.chars().skip(query_width.saturating_sub(text_room)).collect();
        out.push_str(&visible);
        used += text_width(&visible);
    }

    if search.is_focused {
        out.push_str(&Theme::fg(&theme.colors.search_bar_border));
        out.push(CARET);
        used += 1;
    }

    out.push_str(&" ".repeat(inner_width.saturating_sub(used + text_width(status))));
    if search.is_loading {
        out.push_str(&Theme::fg(&theme.colors.accent));
        out.push_str(status);
    }

    out.push_str(&Theme::fg(border_color));
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border_color));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}
