//! Header component renderer.
//!
//! Renders the title bar: the application name centered, the active theme
//! mode at the right edge.

use crate::ui::helpers::{position_cursor, render_centered, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at `row` and returns the next free row.
///
/// # Layout
///
/// ```text
/// [padding] VCFinder [padding] light mode
/// ```
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let label_width = text_width(&header.theme_label) + 1;
    let title_cols = cols.saturating_sub(label_width);

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    render_centered(out, &header.title, title_cols);

    out.push_str(Theme::reset());
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    if cols > label_width {
        out.push_str(&header.theme_label);
        out.push(' ');
    }
    out.push_str(Theme::reset());
    row + 1
}
