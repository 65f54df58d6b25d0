//! Footer component renderer.
//!
//! This module renders the footer help bar with centered keybinding hints.

use crate::ui::helpers::centered_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at the specified row.
///
/// Keybinding hints are centred and dimmed. Text wider than the terminal is
/// truncated so it never wraps.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    centered_line(out, row, &footer.keybindings, &Theme::fg(&theme.colors.text_dim), cols);
    row + 1
}
