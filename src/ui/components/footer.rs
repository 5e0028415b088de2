//! Footer component renderer.

use crate::ui::helpers::{position_cursor, render_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centered at `row`, truncated to `cols`.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    render_centered(out, &footer.keybindings, cols);
    out.push_str(Theme::reset());
    row + 1
}
