//! Search bar component renderer.
//!
//! This module renders the search input box with a bordered frame and query
//! text display.

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search input box at the specified row.
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────┐ [margin]
/// [margin] │ Search jobs: intern_         │ [margin]
/// [margin] └──────────────────────────────┘ [margin]
/// ```
///
/// A trailing `_` marks the insertion point while the box has focus.
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&border);
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let cursor = if search.focused { "_" } else { "" };
    let search_text = truncate(&format!(" Search jobs: {}{cursor}", search.query), inner_width);
    let padding = inner_width.saturating_sub(width(&search_text));

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&search_text);
    out.push_str(&" ".repeat(padding));
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}
