//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used across components: cursor positioning, centred and
//! padded lines, width-aware truncation and search-match highlighting. All of
//! them append to a frame `String` instead of printing, so a frame can be
//! built, inspected and written in one go.
//!
//! Widths are measured in characters, not bytes.
//!
//! # Example
//!
//! ```rust
//! use hirebox::ui::helpers::render_highlighted_text;
//! use hirebox::ui::Theme;
//!
//! let theme = Theme::default();
//! let mut out = String::new();
//! render_highlighted_text(&mut out, "Intern", &[(0, 3)], &theme, false);
//! assert!(out.contains("Int"));
//! ```

use crate::ui::theme::Theme;

/// Appends the ANSI sequence that moves the cursor to `row`, `col` (1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Character count of `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Writes `text` centred in a line of `cols` characters, styled with `style`.
pub fn centered_line(out: &mut String, row: usize, text: &str, style: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = width(&text);
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(out, row, 1);
    out.push_str(style);
    out.push_str(&" ".repeat(padding));
    out.push_str(&text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
    out.push_str(Theme::reset());
}

/// Renders text with highlighted character ranges for search matches.
///
/// Ranges are `(start, end)` character indices, exclusive end. When
/// `is_selected` is true, highlighting is skipped so the selection colors stay
/// intact.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            out.extend(&chars[current_pos..start]);
        }

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        out.extend(&chars[current_pos..]);
    }
}
