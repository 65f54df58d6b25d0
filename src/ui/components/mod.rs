//! Composable UI component renderers.
//!
//! Each component renders one part of the screen into a frame `String` and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Site title and per-view subtitle
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box (border, query text)
//! - [`grid`]: Posting cards
//! - [`empty`]: Empty state message for no postings
//! - [`detail`]: Posting detail, apply panel and not-found message
//! - [`page`]: Static About/Privacy/Terms text
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header - 2 lines]
//! [Border]
//! [Notice]            (fallback data only)
//! [Search Bar - 3 lines] (search mode only)
//! [Body]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod grid;
mod header;
mod page;
mod search;

pub use page::page_paragraphs;

use crate::ui::helpers::{centered_line, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{UIViewModel, ViewBody};

use detail::{render_detail, render_not_found};
use empty::render_empty_state;
use footer::render_footer;
use grid::render_cards;
use header::render_header;
use page::render_page;
use search::render_search_bar;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/body, body/footer).
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the full screen for `vm`.
///
/// The body is clipped by the caller's line accounting: the view model only
/// carries as many cards as fit between the chrome lines.
pub fn render_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_header(out, 2, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);

    if let Some(notice) = &vm.notice {
        let style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        centered_line(out, current_row, notice, &style, cols);
        current_row += 1;
    }

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(out, current_row, search, theme, cols);
    }

    render_body(out, current_row, &vm.body, theme, cols);

    let footer_start = rows.max(current_row + 1);
    let border_row = footer_start.saturating_sub(1);

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_start, &vm.footer, theme, cols);
}

fn render_body(out: &mut String, row: usize, body: &ViewBody, theme: &Theme, cols: usize) -> usize {
    match body {
        ViewBody::Loading => {
            centered_line(out, row + 2, "Loading...", &Theme::fg(&theme.colors.text_dim), cols);
            row + 3
        }
        ViewBody::Listings { empty_state: Some(empty), .. } => render_empty_state(out, row, empty, theme, cols),
        ViewBody::Listings { cards, .. } => render_cards(out, row, cards, theme, cols),
        ViewBody::Detail(card) => render_detail(out, row, card, theme, cols),
        ViewBody::NotFound { message, back_label } => render_not_found(out, row, message, back_label, theme, cols),
        ViewBody::Page(page) => render_page(out, row, *page, theme, cols),
    }
}
