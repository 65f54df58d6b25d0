//! Posting domain model.
//!
//! A [`Posting`] is one job or internship record with display fields and an
//! external apply URL. Postings are read-only once fetched: views replace the
//! whole list on refetch and never edit a field in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86_400;

/// One job or internship listing.
///
/// # Fields
///
/// - `id`: Stable identifier used in routing (`/<id>`) and lookups
/// - `company_name`, `designation`, `location`: Display strings
/// - `batch`: Free-form graduation year or range, e.g. `"2026/2025"`
/// - `apply_link`: Absolute URL of the external application page
/// - `created_at`: Publication time, used for ordering and the age label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub id: i64,
    pub company_name: String,
    pub designation: String,
    pub location: String,
    pub batch: String,
    pub apply_link: String,
    pub created_at: DateTime<Utc>,
}

impl Posting {
    /// Label sent with analytics events: company name plus designation.
    ///
    /// ```
    /// # use hirebox::store::fallback;
    /// let posting = fallback::fallback_posting(13);
    /// assert_eq!(posting.analytics_label(), "Atomberg - Intern");
    /// ```
    #[must_use]
    pub fn analytics_label(&self) -> String {
        format!("{} - {}", self.company_name, self.designation)
    }

    /// Returns a human-readable string describing how long ago the posting was published.
    ///
    /// Whole days are counted from the absolute difference between `now` and
    /// `created_at`, rounded down:
    /// - 0 days: "Today"
    /// - 1 day: "1 day ago"
    /// - otherwise: "N days ago"
    #[must_use]
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let days = (now - self.created_at).num_seconds().abs() / SECONDS_PER_DAY;

        match days {
            0 => "Today".to_string(),
            1 => "1 day ago".to_string(),
            n => format!("{n} days ago"),
        }
    }
}

/// Sorts postings newest first by `created_at`.
///
/// The sort is stable, so postings sharing a timestamp keep their store order.
pub fn sort_newest_first(postings: &mut [Posting]) {
    postings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Drops postings whose `id` already appeared earlier in the list.
///
/// Returns the number of postings removed.
pub fn dedupe_by_id(postings: &mut Vec<Posting>) -> usize {
    let before = postings.len();
    let mut seen = HashSet::with_capacity(before);
    postings.retain(|posting| seen.insert(posting.id));
    before - postings.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn posting(id: i64, created_at: DateTime<Utc>) -> Posting {
        Posting {
            id,
            company_name: format!("Company {id}"),
            designation: "Engineer".to_string(),
            location: "Remote".to_string(),
            batch: "2025".to_string(),
            apply_link: format!("https://example.com/{id}"),
            created_at,
        }
    }

    #[test]
    fn age_label_counts_whole_days() {
        let now = Utc.with_ymd_and_hms(2025, 9, 10, 12, 0, 0).unwrap();
        let p = posting(1, now - Duration::hours(23));
        assert_eq!(p.age_label(now), "Today");

        let p = posting(1, now - Duration::hours(30));
        assert_eq!(p.age_label(now), "1 day ago");

        let p = posting(1, now - Duration::days(12));
        assert_eq!(p.age_label(now), "12 days ago");
    }

    #[test]
    fn age_label_uses_absolute_difference_for_future_dates() {
        let now = Utc.with_ymd_and_hms(2025, 9, 10, 12, 0, 0).unwrap();
        let p = posting(1, now + Duration::days(3));
        assert_eq!(p.age_label(now), "3 days ago");
    }

    #[test]
    fn sort_places_newest_first() {
        let base = Utc.with_ymd_and_hms(2025, 8, 28, 0, 0, 0).unwrap();
        let mut postings = vec![
            posting(1, base),
            posting(2, base + Duration::days(2)),
            posting(3, base + Duration::days(1)),
        ];
        sort_newest_first(&mut postings);
        let ids: Vec<i64> = postings.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let base = Utc.with_ymd_and_hms(2025, 8, 28, 0, 0, 0).unwrap();
        let mut postings = vec![posting(1, base), posting(2, base), posting(1, base + Duration::days(1))];
        assert_eq!(dedupe_by_id(&mut postings), 1);
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].created_at, base);
    }
}
