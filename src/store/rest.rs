//! PostgREST-style HTTP posting store.
//!
//! Issues plain `GET` requests against `{base_url}/rest/v1/{table}` with an
//! API-key header pair. The two query shapes map to:
//!
//! - all postings: `?select=*`
//! - one posting: `?id=eq.{id}`
//!
//! Credentials come from [`Config`](crate::Config); nothing is embedded here.

use crate::domain::error::{HireBoxError, Result};
use crate::store::backend::PostingStore;
use crate::store::models::PostingRecord;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// Default collection name.
pub const DEFAULT_TABLE: &str = "jobs";

/// HTTP-backed [`PostingStore`].
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    table: String,
}

impl RestStore {
    /// Builds a store client for `base_url` authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`HireBoxError::Config`] if the key cannot be used as a header
    /// value, or [`HireBoxError::Transport`] if the HTTP client cannot be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hirebox::store::{PostingStore, RestStore};
    /// use std::time::Duration;
    ///
    /// let store = RestStore::new("https://db.example.co", "anon-key", "jobs", Duration::from_secs(10))?;
    /// let records = store.select_all()?;
    /// # Ok::<(), hirebox::HireBoxError>(())
    /// ```
    pub fn new(base_url: &str, api_key: &str, table: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| HireBoxError::Config(format!("invalid api key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| HireBoxError::Config(format!("invalid api key: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn fetch(&self, query: &[(&str, String)]) -> Result<Vec<PostingRecord>> {
        let url = self.collection_url();
        let _span = tracing::debug_span!("rest_fetch", url = %url, query = ?query).entered();

        let response = self.client.get(&url).query(query).send()?;
        let response = Self::check_status(response)?;
        let body = response.text()?;
        let records: Vec<PostingRecord> = serde_json::from_str(&body)?;

        tracing::debug!(count = records.len(), "records received");
        Ok(records)
    }

    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or("unknown status");
        let detail = response.text().unwrap_or_default();
        tracing::debug!(status = %status, body_len = detail.len(), "store returned error status");

        Err(HireBoxError::Transport(if detail.is_empty() {
            format!("{} {reason}", status.as_u16())
        } else {
            format!("{} {reason}: {detail}", status.as_u16())
        }))
    }
}

impl PostingStore for RestStore {
    fn select_all(&self) -> Result<Vec<PostingRecord>> {
        self.fetch(&[("select", "*".to_string())])
    }

    fn select_by_id(&self, id: i64) -> Result<Vec<PostingRecord>> {
        self.fetch(&[("id", format!("eq.{id}"))])
    }
}
