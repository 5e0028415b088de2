//! Result list renderer.
//!
//! Each firm is a fixed-height card so the window computed by the state layer
//! maps directly onto screen rows.

use super::CARD_HEIGHT;
use crate::ui::helpers::{self, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, ResultList, TagItem};

/// Columns left of card content: outer margin plus the selection gutter.
const CARD_LEFT: usize = 5;
const RIGHT_MARGIN: usize = 2;

/// Renders the summary line and the visible cards starting at `row`.
///
/// Returns the next free row.
pub fn render_result_list(out: &mut String, row: usize, list: &ResultList, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 3);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&list.summary);
    out.push_str(Theme::reset());

    if list.cards.len() < list.total {
        let range = format!(
            "{}-{} of {}",
            list.first_index + 1,
            list.first_index + list.cards.len(),
            list.total
        );
        position_cursor(out, row, cols.saturating_sub(text_width(&range) + RIGHT_MARGIN - 1).max(1));
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&range);
        out.push_str(Theme::reset());
    }

    let mut current_row = row + 2;
    for card in &list.cards {
        render_card(out, current_row, card, theme, cols);
        current_row += CARD_HEIGHT;
    }
    current_row
}

/// Renders one card at `row`.
///
/// # Layout
///
/// ```text
/// ▌ Firm Name                          ✓ Verified Email
/// ▌ [fintech] [SaaS]
/// ▌ Description...
/// ▌ Founded 2010  ·  AUM $500M  ·  United States
/// ▌ ✉ deals@firm.example.com  Copied!   ↗ https://firm.example.com
/// ▌ Last verified: Jan 15, 2025
/// ```
fn render_card(out: &mut String, row: usize, card: &CardItem, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(CARD_LEFT + RIGHT_MARGIN);

    for line in 0..CARD_HEIGHT - 1 {
        position_cursor(out, row + line, 3);
        if card.is_selected {
            out.push_str(&Theme::fg(&theme.colors.selection_bg));
            out.push('▌');
            out.push_str(Theme::reset());
        }
    }

    render_title_line(out, row, card, theme, width);
    render_tags_line(out, row + 1, &card.tags, theme, width);

    position_cursor(out, row + 2, CARD_LEFT);
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&card.description);
    out.push_str(Theme::reset());

    position_cursor(out, row + 3, CARD_LEFT);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.extend(card.facts.chars().take(width));
    out.push_str(Theme::reset());

    render_contact_line(out, row + 4, card, theme);

    if let Some(last_verified) = &card.last_verified {
        position_cursor(out, row + 5, CARD_LEFT);
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(last_verified);
        out.push_str(Theme::reset());
    }
}

fn render_title_line(out: &mut String, row: usize, card: &CardItem, theme: &Theme, width: usize) {
    let (badge, badge_color) = if card.is_verified {
        (format!("✓ {}", card.badge), &theme.colors.verified_fg)
    } else {
        (format!("• {}", card.badge), &theme.colors.pending_fg)
    };

    position_cursor(out, row, CARD_LEFT);
    let base = if card.is_selected {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent))
    } else {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal))
    };
    out.push_str(&base);
    helpers::render_highlighted_text(out, &card.name, &card.name_highlights, theme, &base);
    out.push_str(Theme::reset());

    let gap = width.saturating_sub(text_width(&card.name) + text_width(&badge));
    if gap > 0 {
        out.push_str(&" ".repeat(gap));
        out.push_str(&Theme::fg(badge_color));
        out.push_str(&badge);
        out.push_str(Theme::reset());
    }
}

/// Renders tags left to right, stopping before one would overflow `width`.
fn render_tags_line(out: &mut String, row: usize, tags: &[TagItem], theme: &Theme, width: usize) {
    position_cursor(out, row, CARD_LEFT);
    let mut used = 0;

    for tag in tags {
        let tag_width = text_width(&tag.text) + 3;
        if used + tag_width > width {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            out.push('…');
            break;
        }

        let base = if tag.is_match {
            format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.tag_match_fg))
        } else {
            Theme::fg(&theme.colors.tag_fg)
        };
        out.push_str(&base);
        out.push('[');
        helpers::render_highlighted_text(out, &tag.text, &tag.highlight_ranges, theme, &base);
        out.push_str("] ");
        out.push_str(Theme::reset());
        used += tag_width;
    }
    out.push_str(Theme::reset());
}

fn render_contact_line(out: &mut String, row: usize, card: &CardItem, theme: &Theme) {
    position_cursor(out, row, CARD_LEFT);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str("✉ ");
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str(&card.email);
    out.push_str(Theme::reset());

    if card.is_copied {
        out.push_str("  ");
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.verified_fg));
        out.push_str("Copied!");
        out.push_str(Theme::reset());
    }

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str("   ↗ ");
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str(Theme::underline());
    out.push_str(&card.website);
    out.push_str(Theme::reset());
}
