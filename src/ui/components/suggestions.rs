//! Suggestion panel renderer.
//!
//! Drawn directly below the search box, on top of whatever the body put on
//! those rows.

use super::search::SEARCH_BOX_MARGIN;
use crate::ui::helpers::{self, clear_line, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SuggestionPanel;

/// Renders the panel starting at `row` and returns the next free row.
///
/// The highlighted entry uses selection colors across the full inner width and
/// drops match highlighting; the others highlight the typed query.
pub fn render_suggestions(out: &mut String, row: usize, panel: &SuggestionPanel, theme: &Theme, cols: usize) -> usize {
    let inner_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2).saturating_sub(2);
    let mut current_row = row;

    for item in &panel.items {
        position_cursor(out, current_row, 1);
        clear_line(out);
        out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
        out.push_str(&Theme::fg(&theme.colors.search_bar_border));
        out.push('│');

        let text: String = item.text.chars().take(inner_width.saturating_sub(3)).collect();
        let base = if item.is_selected {
            format!(
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )
        } else {
            Theme::fg(&theme.colors.text_normal)
        };

        out.push_str(&base);
        out.push_str(if item.is_selected { " ▸ " } else { "   " });
        if item.is_selected {
            out.push_str(&text);
        } else {
            helpers::render_highlighted_text(out, &text, &item.highlight_ranges, theme, &base);
        }
        out.push_str(&" ".repeat(inner_width.saturating_sub(3 + text_width(&text))));
        out.push_str(Theme::reset());

        out.push_str(&Theme::fg(&theme.colors.search_bar_border));
        out.push('│');
        out.push_str(Theme::reset());
        current_row += 1;
    }

    position_cursor(out, current_row, 1);
    clear_line(out);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(&theme.colors.search_bar_border));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    current_row + 1
}
