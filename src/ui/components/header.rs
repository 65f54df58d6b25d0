//! Header component renderer.
//!
//! Renders the site title and the per-view subtitle as two centred lines.

use crate::ui::helpers::centered_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row`.
///
/// # Returns
///
/// The next available row position (row + 2)
///
/// # Layout
///
/// ```text
/// [left padding] Hire Box [right padding]
/// [left padding] Discover your next career move [right padding]
/// ```
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let mut title_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        title_style.push_str(&Theme::bg(bg));
    }
    centered_line(out, row, &header.title, &title_style, cols);

    let subtitle_style = Theme::fg(&theme.colors.text_dim);
    centered_line(out, row + 1, &header.subtitle, &subtitle_style, cols);

    row + 2
}
