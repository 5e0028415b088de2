//! Shared rendering utilities.
//!
//! Components write ANSI-styled text into a frame buffer (`&mut String`) that
//! the shell flushes to the terminal in one write. Widths are counted in
//! characters; every glyph the UI draws is single-width.

use crate::ui::theme::Theme;

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Erases the whole line the cursor is on.
pub fn clear_line(out: &mut String) {
    out.push_str("\u{1b}[2K");
}

/// Display width of `text` in terminal cells.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Writes `text` with the character ranges in `ranges` highlighted.
///
/// `restore` is the escape sequence for the surrounding style; it is
/// re-applied after each highlighted section so the rest of the line keeps its
/// color. Ranges are `(start, end)` character indices, end exclusive, sorted
/// and non-overlapping. Ranges past the end of `text` are clipped.
///
/// # Example
///
/// ```rust
/// use vcfinder::ui::helpers::render_highlighted_text;
/// use vcfinder::ui::Theme;
///
/// let theme = Theme::default();
/// let mut out = String::new();
/// render_highlighted_text(&mut out, "fintech", &[(0, 3)], &theme, "");
/// assert!(out.ends_with("tech"));
/// ```
pub fn render_highlighted_text(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end;
    }

    if current_pos < chars.len() {
        out.extend(&chars[current_pos..]);
    }
}

/// Writes `text` centered in `cols` columns, padding both sides.
pub fn render_centered(out: &mut String, text: &str, cols: usize) {
    let len = text_width(text).min(cols);
    let padding = cols.saturating_sub(len) / 2;

    out.push_str(&" ".repeat(padding));
    out.extend(text.chars().take(len));
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
}
