//! Data gateway with fallback-on-failure semantics.
//!
//! [`DataGateway`] is the only thing views ask for data. It issues one store
//! query per call and never propagates a transport or decode failure: the
//! listing falls back to a fixed sample set, and a single-posting lookup falls
//! back to a placeholder carrying the requested id. Every result is tagged with
//! a [`DataOrigin`] so fallback use stays visible in logs and tests.
//!
//! There is no caching and no request deduplication; each call hits the store.

use crate::domain::error::Result;
use crate::domain::Posting;
use crate::store::backend::PostingStore;
use crate::store::fallback::{fallback_posting, fallback_postings};
use crate::store::models::into_postings;
use crate::store::rest::RestStore;
use crate::Config;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Where a gateway result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrigin {
    /// The store answered and the answer decoded.
    Store,
    /// The store failed or is not configured; fixed data was substituted.
    Fallback,
}

/// A gateway result and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub value: T,
    pub origin: DataOrigin,
}

/// Read-only facade over a [`PostingStore`].
#[derive(Clone)]
pub struct DataGateway {
    store: Option<Arc<dyn PostingStore>>,
}

impl std::fmt::Debug for DataGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGateway")
            .field("configured", &self.store.is_some())
            .finish()
    }
}

impl DataGateway {
    /// Creates a gateway over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn PostingStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Creates a gateway with no store; every call returns fallback data.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self { store: None }
    }

    /// Builds a gateway from configuration.
    ///
    /// A missing URL or key, or a store that cannot be constructed, is treated
    /// as misconfiguration and yields an unconfigured gateway.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let (Some(url), Some(key)) = (config.store_url.as_deref(), config.api_key.as_deref()) else {
            tracing::warn!("store_url or api_key missing; serving fallback postings");
            return Self::unconfigured();
        };

        let timeout = Duration::from_secs(config.request_timeout_secs);
        match RestStore::new(url, key, &config.table, timeout) {
            Ok(store) => Self::new(Arc::new(store)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to build store client; serving fallback postings");
                Self::unconfigured()
            }
        }
    }

    /// Lists every posting, or the fixed fallback set on failure.
    ///
    /// Order is whatever the store returned; the listing view sorts.
    #[must_use]
    pub fn list_postings(&self) -> Fetched<Vec<Posting>> {
        let _span = tracing::debug_span!("gateway_list_postings").entered();

        match self.query(|store| into_postings(store.select_all()?)) {
            Ok(postings) => {
                tracing::debug!(count = postings.len(), "postings listed from store");
                Fetched { value: postings, origin: DataOrigin::Store }
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "list query failed; using fallback postings");
                Fetched { value: fallback_postings(), origin: DataOrigin::Fallback }
            }
        }
    }

    /// Fetches one posting by id.
    ///
    /// Returns `None` only when the store answers with no matching record. On
    /// failure, returns the placeholder posting with its id set to `id`.
    #[must_use]
    pub fn get_posting(&self, id: i64) -> Fetched<Option<Posting>> {
        let _span = tracing::debug_span!("gateway_get_posting", id = id).entered();

        match self.query(|store| into_postings(store.select_by_id(id)?)) {
            Ok(postings) => {
                let posting = postings.into_iter().next();
                tracing::debug!(found = posting.is_some(), "posting lookup complete");
                Fetched { value: posting, origin: DataOrigin::Store }
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "single query failed; using fallback posting");
                Fetched { value: Some(fallback_posting(id)), origin: DataOrigin::Fallback }
            }
        }
    }

    fn query<T, F>(&self, run: F) -> std::result::Result<T, String>
    where
        F: FnOnce(&dyn PostingStore) -> Result<T>,
    {
        let store = self.store.as_deref().ok_or_else(|| "store not configured".to_string())?;
        run(store).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::models::PostingRecord;

    fn record(id: i64, created_at: &str) -> PostingRecord {
        PostingRecord {
            id,
            company_name: format!("Company {id}"),
            designation: "Engineer".to_string(),
            location: "Remote".to_string(),
            batch: "2025".to_string(),
            apply_link: format!("https://example.com/{id}"),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn lists_from_store_when_healthy() {
        let store = Arc::new(MemoryStore::new(vec![record(1, "2025-01-01T00:00:00Z")]));
        let gateway = DataGateway::new(store.clone());

        let fetched = gateway.list_postings();
        assert_eq!(fetched.origin, DataOrigin::Store);
        assert_eq!(fetched.value.len(), 1);
        assert_eq!(store.query_count(), 1);
    }

    #[test]
    fn list_failure_serves_fallback() {
        let gateway = DataGateway::new(Arc::new(MemoryStore::failing("connection refused")));
        let fetched = gateway.list_postings();
        assert_eq!(fetched.origin, DataOrigin::Fallback);
        assert_eq!(fetched.value, fallback_postings());
    }

    #[test]
    fn bad_timestamp_counts_as_parse_failure() {
        let store = MemoryStore::new(vec![record(1, "2025-01-01T00:00:00Z"), record(2, "not a date")]);
        let gateway = DataGateway::new(Arc::new(store));
        assert_eq!(gateway.list_postings().origin, DataOrigin::Fallback);
    }

    #[test]
    fn missing_record_is_absent_not_fallback() {
        let store = MemoryStore::new(vec![record(1, "2025-01-01T00:00:00Z")]);
        let gateway = DataGateway::new(Arc::new(store));

        let fetched = gateway.get_posting(42);
        assert_eq!(fetched.origin, DataOrigin::Store);
        assert!(fetched.value.is_none());
    }

    #[test]
    fn single_failure_serves_placeholder_with_requested_id() {
        let gateway = DataGateway::unconfigured();
        let fetched = gateway.get_posting(77);
        assert_eq!(fetched.origin, DataOrigin::Fallback);
        assert_eq!(fetched.value.map(|p| p.id), Some(77));
    }

    #[test]
    fn missing_credentials_yield_unconfigured_gateway() {
        let config = Config {
            store_url: Some("https://db.example.co".to_string()),
            api_key: None,
            ..Config::default()
        };
        let gateway = DataGateway::from_config(&config);
        assert_eq!(gateway.list_postings().origin, DataOrigin::Fallback);
    }
}
