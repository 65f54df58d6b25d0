//! Posting store abstraction.
//!
//! This module defines the [`PostingStore`] trait, the narrow read-only query
//! contract the data gateway consumes. It has exactly two query shapes: select
//! every record in the postings collection, and select the records whose
//! identifier equals a given value.
//!
//! # Design Philosophy
//!
//! Implementations report failures honestly through [`Result`]. Deciding what the
//! UI sees on failure is the job of [`DataGateway`](crate::store::DataGateway),
//! not the store.

use crate::domain::error::Result;
use crate::store::models::PostingRecord;

/// Read-only access to a remote collection of posting records.
///
/// # Implementations
///
/// - [`RestStore`](crate::store::RestStore): PostgREST-style HTTP endpoint
/// - [`MemoryStore`](crate::store::MemoryStore): fixed in-memory records
pub trait PostingStore: Send + Sync {
    /// Selects all records from the postings collection.
    ///
    /// Records come back in store order; callers must not rely on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    fn select_all(&self) -> Result<Vec<PostingRecord>>;

    /// Selects the records whose identifier equals `id`.
    ///
    /// An empty vector means the store affirmatively has no such record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    fn select_by_id(&self, id: i64) -> Result<Vec<PostingRecord>>;
}
