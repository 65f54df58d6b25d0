//! Static page renderer (About, Privacy, Terms).

use crate::app::views::Page;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

const INDENT: usize = 4;

/// Fixed body text of each static page.
#[must_use]
pub const fn page_paragraphs(page: Page) -> &'static [&'static str] {
    match page {
        Page::About => &[
            "Hire Box collects job and internship openings for students and recent graduates in one place.",
            "Every listing links straight to the employer's own application page. We never ask you to apply through us.",
            "Listings are refreshed as companies publish them, newest first.",
        ],
        Page::Privacy => &[
            "Hire Box does not ask for an account and stores no personal data.",
            "When you open an apply link we record an anonymous event with the company and role, so we know which listings are useful.",
            "Apply links take you to third-party sites whose own privacy policies apply.",
        ],
        Page::Terms => &[
            "Listings are provided as-is. Verify every opening with the employer before sharing personal information.",
            "Hire Box is not responsible for hiring decisions or for content on employer sites.",
            "By using Hire Box you agree not to scrape or republish listings in bulk.",
        ],
    }
}

/// Renders the page title and its paragraphs, wrapped to the terminal width.
pub fn render_page(out: &mut String, row: usize, page: Page, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(INDENT * 2).max(10);

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(INDENT));
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str(page.title());
    out.push_str(Theme::reset());

    let mut current_row = row + 3;
    for paragraph in page_paragraphs(page) {
        for line in wrap(paragraph, inner) {
            position_cursor(out, current_row, 1);
            out.push_str(&" ".repeat(INDENT));
            out.push_str(&Theme::fg(&theme.colors.text_normal));
            out.push_str(&line);
            out.push_str(Theme::reset());
            current_row += 1;
        }
        current_row += 1;
    }
    current_row
}

/// Greedy word wrap on whitespace.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() { word.chars().count() } else { line.chars().count() + 1 + word.chars().count() };
        if needed > max && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
