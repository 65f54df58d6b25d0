//! In-memory posting store.
//!
//! Serves a fixed record set, or a fixed failure. Used by tests and by the
//! binary's `--offline` mode.

use crate::domain::error::{HireBoxError, Result};
use crate::store::backend::PostingStore;
use crate::store::models::PostingRecord;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A [`PostingStore`] backed by a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<PostingRecord>,
    failure: Option<String>,
    queries: AtomicUsize,
}

impl MemoryStore {
    /// Creates a store holding `records`.
    #[must_use]
    pub fn new(records: Vec<PostingRecord>) -> Self {
        Self {
            records,
            failure: None,
            queries: AtomicUsize::new(0),
        }
    }

    /// Creates a store whose every query fails with a transport error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.into()),
            queries: AtomicUsize::new(0),
        }
    }

    /// Number of queries served so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.failure
            .as_ref()
            .map_or(Ok(()), |message| Err(HireBoxError::Transport(message.clone())))
    }
}

impl PostingStore for MemoryStore {
    fn select_all(&self) -> Result<Vec<PostingRecord>> {
        self.check()?;
        Ok(self.records.clone())
    }

    fn select_by_id(&self, id: i64) -> Result<Vec<PostingRecord>> {
        self.check()?;
        Ok(self.records.iter().filter(|r| r.id == id).cloned().collect())
    }
}
