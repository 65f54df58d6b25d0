//! Wire record models for the posting store.
//!
//! The store returns flat key/value records with snake_case keys. These types
//! are kept separate from the domain [`Posting`] so that timestamp parsing and
//! other wire concerns stay at the store boundary.

use crate::domain::error::{HireBoxError, Result};
use crate::domain::Posting;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A posting as the store sends it.
///
/// `created_at` stays a string here; it is parsed as RFC 3339 when the record
/// is converted into a [`Posting`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingRecord {
    pub id: i64,
    pub company_name: String,
    pub designation: String,
    pub location: String,
    pub batch: String,
    pub apply_link: String,
    pub created_at: String,
}

impl PostingRecord {
    /// Converts the record into a domain posting.
    ///
    /// # Errors
    ///
    /// Returns [`HireBoxError::Decode`] if `created_at` is not an RFC 3339 timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use hirebox::store::PostingRecord;
    ///
    /// let record = PostingRecord {
    ///     id: 7,
    ///     company_name: "Acme".into(),
    ///     designation: "Intern".into(),
    ///     location: "Pune, India".into(),
    ///     batch: "2026".into(),
    ///     apply_link: "https://acme.example/apply".into(),
    ///     created_at: "2025-08-31T14:46:59.88029+00:00".into(),
    /// };
    /// let posting = record.into_posting()?;
    /// assert_eq!(posting.id, 7);
    /// # Ok::<(), hirebox::HireBoxError>(())
    /// ```
    pub fn into_posting(self) -> Result<Posting> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| {
                HireBoxError::Decode(format!(
                    "record {} has invalid created_at {:?}: {e}",
                    self.id, self.created_at
                ))
            })?
            .with_timezone(&Utc);

        Ok(Posting {
            id: self.id,
            company_name: self.company_name,
            designation: self.designation,
            location: self.location,
            batch: self.batch,
            apply_link: self.apply_link,
            created_at,
        })
    }
}

/// Converts a whole response into postings, failing on the first bad record.
///
/// # Errors
///
/// Returns the first conversion error encountered.
pub fn into_postings(records: Vec<PostingRecord>) -> Result<Vec<Posting>> {
    records.into_iter().map(PostingRecord::into_posting).collect()
}
