//! Posting grid renderer.
//!
//! Each posting is a card of four text lines followed by a gap:
//!
//! ```text
//! ▌ Software Developer
//! ▌ TechCorp
//! ▌ Bangalore, India · Batch: 2025/2024
//! ▌ 3 days ago                             View Apply Link
//! ```
//!
//! The selected card is drawn in selection colors and carries the
//! "View Apply Link" hint. Search matches are highlighted in the designation
//! and company lines of unselected cards.

use crate::ui::helpers::{self, position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PostingCard;

const CARD_MARGIN: usize = 2;
const APPLY_HINT: &str = "View Apply Link";

/// Renders `cards` from `row` down. Returns the row after the last card.
pub fn render_cards(out: &mut String, row: usize, cards: &[PostingCard], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        current_row = render_card(out, current_row, card, theme, cols);
    }
    current_row
}

fn render_card(out: &mut String, row: usize, card: &PostingCard, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(CARD_MARGIN * 2 + 2);
    let base = if card.is_selected {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    let designation = truncate(&card.designation, inner);
    card_line(out, row, &base, theme, card.is_selected, cols, |out| {
        out.push_str(Theme::bold());
        helpers::render_highlighted_text(out, &designation, &card.designation_highlights, theme, card.is_selected);
        width(&designation)
    });

    let company = truncate(&card.company, inner);
    card_line(out, row + 1, &base, theme, card.is_selected, cols, |out| {
        if !card.is_selected {
            out.push_str(&Theme::fg(&theme.colors.accent));
        }
        helpers::render_highlighted_text(out, &company, &card.company_highlights, theme, card.is_selected);
        width(&company)
    });

    let details = truncate(&format!("{} · Batch: {}", card.location, card.batch), inner);
    card_line(out, row + 2, &base, theme, card.is_selected, cols, |out| {
        out.push_str(&details);
        width(&details)
    });

    let hint = if card.is_selected { APPLY_HINT } else { "" };
    let gap = inner.saturating_sub(width(&card.age) + width(hint));
    let footer = truncate(&format!("{}{}{hint}", card.age, " ".repeat(gap)), inner);
    card_line(out, row + 3, &base, theme, card.is_selected, cols, |out| {
        if !card.is_selected {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        out.push_str(&footer);
        width(&footer)
    });

    row + 5
}

/// Writes one card line: margin, accent bar, content, then padding to the card edge.
fn card_line(
    out: &mut String,
    row: usize,
    base: &str,
    theme: &Theme,
    is_selected: bool,
    cols: usize,
    content: impl FnOnce(&mut String) -> usize,
) {
    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(CARD_MARGIN));
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push('▌');
    out.push_str(Theme::reset());
    out.push_str(base);
    out.push(' ');

    let written = content(out);

    if is_selected {
        out.push_str(base);
    }
    let inner = cols.saturating_sub(CARD_MARGIN * 2 + 2);
    out.push_str(&" ".repeat(inner.saturating_sub(written)));
    out.push_str(Theme::reset());
}
