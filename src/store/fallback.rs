//! Fixed postings served when the store is unreachable or misconfigured.

use crate::domain::Posting;
use crate::store::models::PostingRecord;

fn record(
    id: i64,
    company_name: &str,
    designation: &str,
    location: &str,
    batch: &str,
    apply_link: &str,
    created_at: &str,
) -> PostingRecord {
    PostingRecord {
        id,
        company_name: company_name.to_string(),
        designation: designation.to_string(),
        location: location.to_string(),
        batch: batch.to_string(),
        apply_link: apply_link.to_string(),
        created_at: created_at.to_string(),
    }
}

/// Raw records behind the fallback postings.
#[must_use]
pub fn sample_records() -> Vec<PostingRecord> {
    vec![
        record(
            13,
            "Atomberg",
            "Intern",
            "Pune, India",
            "2026/2025",
            "https://atomberg.darwinbox.in/ms/candidatev2/main/careers/jobDetails/a68ad78c452674",
            "2025-08-31T14:46:59.88029+00:00",
        ),
        record(
            14,
            "TechCorp",
            "Software Developer",
            "Bangalore, India",
            "2025/2024",
            "https://techcorp.com/apply/14",
            "2025-08-30T10:30:00.000Z",
        ),
        record(
            15,
            "StartupX",
            "Product Manager Intern",
            "Mumbai, India",
            "2026",
            "https://startupx.com/careers/15",
            "2025-08-29T16:45:30.000Z",
        ),
        record(
            16,
            "DataScience Inc",
            "Data Analyst",
            "Hyderabad, India",
            "2025",
            "https://datascience.com/jobs/16",
            "2025-08-28T09:15:22.000Z",
        ),
    ]
}

/// The fixed listing shown when the full-list query fails.
#[must_use]
pub fn fallback_postings() -> Vec<Posting> {
    sample_records()
        .into_iter()
        .filter_map(|record| record.into_posting().ok())
        .collect()
}

/// The placeholder posting shown when a single-posting query fails.
///
/// Every field is fixed except `id`, which is replaced by `requested_id`.
#[must_use]
pub fn fallback_posting(requested_id: i64) -> Posting {
    let mut template = sample_records().swap_remove(0);
    let created_at = chrono::DateTime::parse_from_rfc3339(&template.created_at)
        .map_or(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH, |t| t.with_timezone(&chrono::Utc));
    template.id = requested_id;

    Posting {
        id: template.id,
        company_name: template.company_name,
        designation: template.designation,
        location: template.location,
        batch: template.batch,
        apply_link: template.apply_link,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_list_has_four_distinct_postings() {
        let postings = fallback_postings();
        assert_eq!(postings.len(), 4);
        let ids: Vec<i64> = postings.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![13, 14, 15, 16]);
    }

    #[test]
    fn fallback_posting_takes_requested_id() {
        let posting = fallback_posting(99);
        assert_eq!(posting.id, 99);
        assert_eq!(posting.company_name, "Atomberg");
        assert!(posting.apply_link.starts_with("https://atomberg"));
    }
}
