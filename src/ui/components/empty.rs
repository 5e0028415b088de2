//! Centered message renderer for the welcome, loading, and no-results states.

use crate::ui::helpers::{position_cursor, render_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyKind, EmptyState};

/// Renders a centered message block starting at `row`.
///
/// # Layout
///
/// ```text
/// MESSAGE
/// subtitle
///
/// Popular industries:
/// 1 fintech   2 healthcare   ...
/// ```
///
/// The choice list is only present before the first search. Choices are
/// numbered from 1 to match their keys.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    position_cursor(out, current_row, 1);
    match empty.kind {
        EmptyKind::Loading => out.push_str(&Theme::fg(&theme.colors.accent)),
        EmptyKind::Welcome | EmptyKind::NoResults => {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
        }
    }
    render_centered(out, &empty.message, cols);
    out.push_str(Theme::reset());
    current_row += 1;

    if !empty.subtitle.is_empty() {
        position_cursor(out, current_row, 1);
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        render_centered(out, &empty.subtitle, cols);
        out.push_str(Theme::reset());
        current_row += 1;
    }

    if empty.choices.is_empty() {
        return current_row;
    }

    current_row += 1;
    position_cursor(out, current_row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    render_centered(out, "Popular industries:", cols);
    out.push_str(Theme::reset());
    current_row += 1;

    let choices = empty
        .choices
        .iter()
        .enumerate()
        .map(|(idx, choice)| format!("{} {choice}", idx + 1))
        .collect::<Vec<_>>()
        .join("   ");

    position_cursor(out, current_row, 1);
    out.push_str(&Theme::fg(&theme.colors.accent));
    render_centered(out, &choices, cols);
    out.push_str(Theme::reset());

    current_row + 1
}
