//! Empty state component renderer.
//!
//! Shown in place of the grid when no posting is available or none matches the
//! search.

use crate::ui::helpers::centered_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centred two-line message starting two rows below `row`.
///
/// The message uses `empty_state_fg`, the subtitle `text_dim` with dim styling.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    centered_line(out, row + 2, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    centered_line(out, row + 3, &empty.subtitle, &subtitle_style, cols);

    row + 4
}
