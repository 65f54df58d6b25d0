//! Real-time posting search.
//!
//! [`filter_postings`] is a pure function of the full list and the query. It is
//! recomputed synchronously whenever either input changes; there is no
//! debouncing. A posting matches when any of its four searchable fields
//! (company, designation, location, batch) contains the trimmed query as a
//! case-insensitive substring. Result order is input order.

use crate::domain::Posting;

/// Returns the postings matching `query`, preserving input order.
///
/// An empty or all-whitespace query returns every posting unchanged.
///
/// # Examples
///
/// ```
/// use hirebox::app::filter::filter_postings;
/// use hirebox::store::fallback::fallback_postings;
///
/// let all = fallback_postings();
/// let interns = filter_postings(&all, "  INTERN ");
/// assert_eq!(interns.len(), 2);
/// assert_eq!(filter_postings(&all, "   "), all);
/// ```
#[must_use]
pub fn filter_postings(postings: &[Posting], query: &str) -> Vec<Posting> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return postings.to_vec();
    }

    postings
        .iter()
        .filter(|posting| matches_needle(posting, &needle))
        .cloned()
        .collect()
}

/// Whether `posting` matches an already trimmed, lowercased needle.
fn matches_needle(posting: &Posting, needle: &str) -> bool {
    [
        &posting.company_name,
        &posting.designation,
        &posting.location,
        &posting.batch,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Character ranges of `text` that match `query`, for highlighting.
///
/// Ranges are `(start, end)` character indices with exclusive end, in order,
/// non-overlapping. Matching is case-insensitive on the trimmed query.
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return vec![];
    }

    let folded: Vec<String> = text.chars().map(|c| c.to_lowercase().collect()).collect();
    let mut ranges = Vec::new();
    let mut start = 0;

    while start < folded.len() {
        let mut window = String::new();
        let mut end = start;
        while end < folded.len() && window.len() < needle.len() {
            window.push_str(&folded[end]);
            end += 1;
        }

        if window == needle {
            ranges.push((start, end));
            start = end;
        } else {
            start += 1;
        }
    }

    ranges
}
