//! `RestStore` and `DataGateway` against a mock HTTP store.
//!
//! The store client is blocking, so every call runs on a blocking task while
//! the mock server lives on the async runtime.

use hirebox::store::{DataGateway, DataOrigin, PostingStore, RestStore};
use hirebox::HireBoxError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "anon-key";

fn record_json(id: i64, created_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "company_name": "Acme",
        "designation": "Platform Intern",
        "location": "Pune, India",
        "batch": "2026",
        "apply_link": format!("https://acme.example/apply/{id}"),
        "created_at": created_at,
    })
}

fn store(uri: &str) -> RestStore {
    RestStore::new(uri, KEY, "jobs", Duration::from_secs(5)).unwrap()
}

async fn blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn select_all_sends_credentials_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/jobs"))
        .and(query_param("select", "*"))
        .and(header("apikey", KEY))
        .and(header("authorization", format!("Bearer {KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            record_json(1, "2025-08-01T10:00:00Z"),
            record_json(2, "2025-08-02T10:00:00.123+00:00"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let records = blocking(move || store(&uri).select_all()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].id, 2);
    assert_eq!(records[0].company_name, "Acme");
}

#[tokio::test(flavor = "multi_thread")]
async fn select_by_id_filters_on_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/jobs"))
        .and(query_param("id", "eq.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record_json(7, "2025-08-01T10:00:00Z")])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let records = blocking(move || store(&uri).select_by_id(7)).await.unwrap();
    assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![7]);
}

#[tokio::test(flavor = "multi_thread")]
async fn error_status_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = blocking(move || store(&uri).select_all()).await.unwrap_err();
    match err {
        HireBoxError::Transport(message) => assert!(message.starts_with("401")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = blocking(move || store(&uri).select_all()).await.unwrap_err();
    assert!(matches!(err, HireBoxError::Decode(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn gateway_falls_back_when_store_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let uri = server.uri();
    let (list, single) = blocking(move || {
        let gateway = DataGateway::new(Arc::new(store(&uri)));
        (gateway.list_postings(), gateway.get_posting(99))
    })
    .await;

    assert_eq!(list.origin, DataOrigin::Fallback);
    assert_eq!(list.value.len(), 4);
    assert_eq!(single.origin, DataOrigin::Fallback);
    assert_eq!(single.value.map(|p| p.id), Some(99));
}

#[tokio::test(flavor = "multi_thread")]
async fn gateway_treats_bad_timestamps_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record_json(1, "last tuesday")])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let list = blocking(move || DataGateway::new(Arc::new(store(&uri))).list_postings()).await;
    assert_eq!(list.origin, DataOrigin::Fallback);
}

#[tokio::test(flavor = "multi_thread")]
async fn gateway_reports_absent_posting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("id", "eq.42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let single = blocking(move || DataGateway::new(Arc::new(store(&uri))).get_posting(42)).await;
    assert_eq!(single.origin, DataOrigin::Store);
    assert!(single.value.is_none());
}
