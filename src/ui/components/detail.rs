//! Detail card and apply panel renderer.
//!
//! ```text
//!   Software Developer
//!   TechCorp
//!   Location: Bangalore, India
//!   Batch:    2025/2024
//!   Posted:   3 days ago
//!
//!   [ Apply Now ]
//! ```
//!
//! While the gate is pending the button is replaced by a progress bar and the
//! rotating status phrase. Once ready the apply link is shown in the success
//! color.

use crate::ui::helpers::{centered_line, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ApplyPanel, DetailCard};

const INDENT: usize = 4;
const APPLY_BUTTON: &str = "[ Apply Now ]";

/// Renders the posting card followed by its apply panel.
pub fn render_detail(out: &mut String, row: usize, card: &DetailCard, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(INDENT * 2);
    let normal = Theme::fg(&theme.colors.text_normal);
    let dim = Theme::fg(&theme.colors.text_dim);

    let title_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    indented_line(out, row + 1, &card.designation, &title_style, inner);
    indented_line(out, row + 2, &card.company, &Theme::fg(&theme.colors.accent), inner);

    let fields = [("Location", &card.location), ("Batch", &card.batch), ("Posted", &card.posted)];
    let mut current_row = row + 4;
    for (label, value) in fields {
        position_cursor(out, current_row, 1);
        out.push_str(&" ".repeat(INDENT));
        out.push_str(&dim);
        out.push_str(&format!("{label:<10}"));
        out.push_str(&normal);
        out.push_str(&truncate(value, inner.saturating_sub(10)));
        out.push_str(Theme::reset());
        current_row += 1;
    }

    render_apply_panel(out, current_row + 1, &card.apply, theme, cols)
}

/// Renders the apply section for the current gate state.
pub fn render_apply_panel(out: &mut String, row: usize, panel: &ApplyPanel, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(INDENT * 2);

    match panel {
        ApplyPanel::Idle => {
            let style = format!(
                "{}{}{}",
                Theme::bold(),
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.accent)
            );
            indented_line(out, row, APPLY_BUTTON, &style, inner);
            row + 1
        }
        ApplyPanel::Pending { progress, status } => {
            render_progress_bar(out, row, *progress, theme, inner);
            indented_line(out, row + 1, &format!("{progress}% complete"), &Theme::fg(&theme.colors.text_normal), inner);
            indented_line(out, row + 2, status, &Theme::fg(&theme.colors.text_dim), inner);
            row + 3
        }
        ApplyPanel::Ready { link } => {
            let style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.success));
            indented_line(out, row, "Your apply link is ready:", &style, inner);
            let link_style = format!("{}{}", Theme::underline(), Theme::fg(&theme.colors.success));
            indented_line(out, row + 1, link, &link_style, inner);
            row + 2
        }
    }
}

fn render_progress_bar(out: &mut String, row: usize, progress: u8, theme: &Theme, inner: usize) {
    let bar_width = inner.saturating_sub(2);
    let filled = bar_width * usize::from(progress.min(100)) / 100;

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(INDENT));
    out.push_str(&Theme::fg(&theme.colors.border));
    out.push('[');
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str(&"█".repeat(filled));
    out.push_str(&Theme::fg(&theme.colors.progress_track));
    out.push_str(&"░".repeat(bar_width - filled));
    out.push_str(&Theme::fg(&theme.colors.border));
    out.push(']');
    out.push_str(Theme::reset());
}

/// Renders the not-found message with the way back to the listing.
pub fn render_not_found(
    out: &mut String,
    row: usize,
    message: &str,
    back_label: &str,
    theme: &Theme,
    cols: usize,
) -> usize {
    let style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.empty_state_fg));
    centered_line(out, row + 2, message, &style, cols);
    centered_line(out, row + 4, &format!("← {back_label} (b)"), &Theme::fg(&theme.colors.accent), cols);
    row + 5
}

fn indented_line(out: &mut String, row: usize, text: &str, style: &str, inner: usize) {
    let text = truncate(text, inner);
    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(INDENT));
    out.push_str(style);
    out.push_str(&text);
    out.push_str(Theme::reset());
}
