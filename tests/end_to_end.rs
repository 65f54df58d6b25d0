//! End-to-end scenarios driven through the runtime with an in-memory store and
//! virtual time.

use hirebox::app::gate::{PHRASE_INTERVAL, STATUS_PHRASES};
use hirebox::app::{AnalyticsEvent, AnalyticsKind, DetailLoad, DocumentMeta, GateState, InputMode, View};
use hirebox::runtime::{Analytics, Environment, Recorder};
use hirebox::store::fallback::fallback_postings;
use hirebox::store::{DataOrigin, MemoryStore, PostingRecord};
use hirebox::{DataGateway, Event, HireBoxError, Runtime, Theme};
use std::sync::Arc;
use std::time::Duration;

const WORKER_TIMEOUT: Duration = Duration::from_secs(5);

fn record(id: i64, company: &str, designation: &str, location: &str, batch: &str, created_at: &str) -> PostingRecord {
    PostingRecord {
        id,
        company_name: company.to_string(),
        designation: designation.to_string(),
        location: location.to_string(),
        batch: batch.to_string(),
        apply_link: format!("https://{}.example/apply/{id}", company.to_lowercase()),
        created_at: created_at.to_string(),
    }
}

/// Four postings stored oldest first.
fn board() -> Vec<PostingRecord> {
    vec![
        record(1, "Globex", "Backend Engineer", "Remote", "2024", "2025-06-01T09:00:00Z"),
        record(2, "Initech", "Summer Intern", "Austin, USA", "2026", "2025-06-03T09:00:00Z"),
        record(3, "Hooli", "Data Analyst", "Internship Hub, Pune", "2025", "2025-06-02T09:00:00Z"),
        record(4, "Umbrella", "QA Engineer", "Berlin", "2025/2026", "2025-06-04T09:00:00Z"),
    ]
}

struct Harness {
    runtime: Runtime,
    analytics: Recorder<AnalyticsEvent>,
    metadata: Recorder<DocumentMeta>,
    links: Recorder<String>,
}

fn harness(path: &str, store: MemoryStore) -> Harness {
    let analytics = Recorder::new();
    let metadata = Recorder::new();
    let links = Recorder::new();
    let env = Environment::headless(path)
        .with_analytics(analytics.clone())
        .with_metadata(metadata.clone())
        .with_links(links.clone());
    let runtime = Runtime::new(Theme::default(), DataGateway::new(Arc::new(store)), env);
    Harness { runtime, analytics, metadata, links }
}

fn started(path: &str, store: MemoryStore) -> Harness {
    let mut h = harness(path, store);
    h.runtime.start().unwrap();
    assert!(h.runtime.wait_for_worker(WORKER_TIMEOUT).unwrap());
    h
}

fn listing_ids(runtime: &Runtime) -> Vec<i64> {
    runtime.state().listings().unwrap().filtered.iter().map(|p| p.id).collect()
}

fn gate_state(runtime: &Runtime) -> Option<GateState> {
    runtime.state().detail().map(|d| d.gate.state())
}

#[test]
fn listing_shows_store_postings_newest_first() {
    let h = started("/", MemoryStore::new(board()));

    assert_eq!(listing_ids(&h.runtime), vec![4, 2, 3, 1]);
    assert_eq!(h.runtime.state().listings().unwrap().origin, Some(DataOrigin::Store));
}

#[test]
fn failed_list_fetch_shows_fallback_set() {
    let h = started("/", MemoryStore::failing("connection refused"));

    let listings = h.runtime.state().listings().unwrap();
    assert_eq!(listings.origin, Some(DataOrigin::Fallback));

    let mut expected: Vec<i64> = fallback_postings().iter().map(|p| p.id).collect();
    expected.sort_unstable();
    let mut shown = listing_ids(&h.runtime);
    shown.sort_unstable();
    assert_eq!(shown, expected);
    assert_eq!(listing_ids(&h.runtime)[0], 13);
}

#[test]
fn typing_intern_narrows_across_fields() {
    let mut h = started("/", MemoryStore::new(board()));

    h.runtime.dispatch(&Event::SearchMode).unwrap();
    for c in "INTERN".chars() {
        h.runtime.dispatch(&Event::Char(c)).unwrap();
    }

    // "Summer Intern" by designation, "Internship Hub" by location.
    assert_eq!(listing_ids(&h.runtime), vec![2, 3]);
    assert!(h.runtime.state().input_mode().is_typing());

    h.runtime.dispatch(&Event::ExitSearch).unwrap();
    assert_eq!(listing_ids(&h.runtime).len(), 4);
    assert_eq!(h.runtime.state().input_mode(), InputMode::Normal);
}

#[test]
fn unknown_id_shows_not_found_with_way_back() {
    let mut h = started("/42", MemoryStore::new(board()));

    assert_eq!(h.runtime.state().detail().map(|d| &d.load), Some(&DetailLoad::NotFound));

    h.runtime.dispatch(&Event::Back).unwrap();
    assert_eq!(h.runtime.history().current_path(), "/");
    assert!(matches!(h.runtime.state().view, Some(View::Listings(_))));
    assert!(h.runtime.wait_for_worker(WORKER_TIMEOUT).unwrap());
    assert_eq!(listing_ids(&h.runtime).len(), 4);
}

#[test]
fn selecting_a_card_opens_its_detail() {
    let mut h = started("/", MemoryStore::new(board()));

    h.runtime.dispatch(&Event::KeyDown).unwrap();
    h.runtime.dispatch(&Event::SelectPosting).unwrap();
    assert_eq!(h.runtime.history().current_path(), "/2");

    assert!(h.runtime.wait_for_worker(WORKER_TIMEOUT).unwrap());
    let detail = h.runtime.state().detail().unwrap();
    assert_eq!(detail.posting().map(|p| p.designation.as_str()), Some("Summer Intern"));
}

#[test]
fn apply_gate_reaches_ready_after_delay_and_opens_link() {
    let mut h = started("/2", MemoryStore::new(board()));

    h.runtime.dispatch(&Event::RequestApply).unwrap();
    assert_eq!(gate_state(&h.runtime), Some(GateState::Pending));
    assert_eq!(h.runtime.state().detail().unwrap().gate.progress(), 0);

    // Opening before the deadline does nothing.
    h.runtime.dispatch(&Event::OpenApplyLink).unwrap();
    assert!(h.links.calls().is_empty());

    h.runtime.advance(Duration::from_millis(9_999)).unwrap();
    assert_eq!(gate_state(&h.runtime), Some(GateState::Pending));
    assert_eq!(h.runtime.state().detail().unwrap().gate.progress(), 90);

    h.runtime.advance(Duration::from_millis(1)).unwrap();
    assert_eq!(gate_state(&h.runtime), Some(GateState::Ready));
    assert_eq!(h.runtime.state().detail().unwrap().gate.progress(), 100);
    assert!(h.runtime.timers().is_empty());

    h.runtime.dispatch(&Event::OpenApplyLink).unwrap();
    assert_eq!(h.links.calls(), vec!["https://initech.example/apply/2".to_string()]);

    let kinds: Vec<AnalyticsKind> = h.analytics.calls().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![AnalyticsKind::ApplyClick, AnalyticsKind::ApplyRedirect]);
    let click = &h.analytics.calls()[0];
    assert_eq!(click.label, "Initech - Summer Intern");
    assert_eq!(click.value, 2);
}

fn status(runtime: &Runtime) -> &'static str {
    runtime.state().detail().unwrap().gate.status()
}

#[test]
fn status_phrase_rotates_on_its_own_interval() {
    let mut h = started("/2", MemoryStore::new(board()));
    h.runtime.dispatch(&Event::RequestApply).unwrap();
    assert_eq!(status(&h.runtime), STATUS_PHRASES[0]);

    h.runtime.advance(Duration::from_millis(2_499)).unwrap();
    assert_eq!(status(&h.runtime), STATUS_PHRASES[0]);
    assert_eq!(h.runtime.state().detail().unwrap().gate.progress(), 20);

    h.runtime.advance(Duration::from_millis(1)).unwrap();
    assert_eq!(h.runtime.now(), PHRASE_INTERVAL);
    assert_eq!(status(&h.runtime), STATUS_PHRASES[1]);

    h.runtime.advance(Duration::from_millis(2_500)).unwrap();
    assert_eq!(status(&h.runtime), STATUS_PHRASES[2]);
    h.runtime.advance(Duration::from_millis(2_500)).unwrap();
    assert_eq!(status(&h.runtime), STATUS_PHRASES[3]);
    assert_eq!(gate_state(&h.runtime), Some(GateState::Pending));
}

#[test]
fn repeated_apply_requests_schedule_once() {
    let mut h = started("/2", MemoryStore::new(board()));

    h.runtime.dispatch(&Event::RequestApply).unwrap();
    h.runtime.dispatch(&Event::RequestApply).unwrap();

    assert_eq!(h.runtime.timers().len(), 3);
    assert_eq!(h.analytics.calls().len(), 1);
}

#[test]
fn leaving_a_pending_detail_cancels_its_timers() {
    let mut h = started("/2", MemoryStore::new(board()));

    h.runtime.dispatch(&Event::RequestApply).unwrap();
    h.runtime.advance(Duration::from_secs(3)).unwrap();
    assert_eq!(h.runtime.state().detail().unwrap().gate.progress(), 30);

    h.runtime.dispatch(&Event::Navigate("/about".to_string())).unwrap();
    assert!(h.runtime.timers().is_empty());

    h.runtime.advance(Duration::from_secs(30)).unwrap();
    assert!(h.runtime.timers().is_empty());
    assert!(matches!(h.runtime.state().view, Some(View::Page(_))));
    assert!(h.links.calls().is_empty());

    // Coming back mounts a fresh, idle gate.
    h.runtime.back().unwrap();
    assert!(h.runtime.wait_for_worker(WORKER_TIMEOUT).unwrap());
    assert_eq!(gate_state(&h.runtime), Some(GateState::Idle));
}

struct BrokenAnalytics;

impl Analytics for BrokenAnalytics {
    fn track(&mut self, _event: &AnalyticsEvent) -> hirebox::Result<()> {
        Err(HireBoxError::Collaborator("collector offline".to_string()))
    }
}

#[test]
fn failing_analytics_never_blocks_the_gate() {
    let env = Environment::headless("/2").with_analytics(BrokenAnalytics);
    let gateway = DataGateway::new(Arc::new(MemoryStore::new(board())));
    let mut runtime = Runtime::new(Theme::default(), gateway, env);
    runtime.start().unwrap();
    assert!(runtime.wait_for_worker(WORKER_TIMEOUT).unwrap());

    runtime.dispatch(&Event::RequestApply).unwrap();
    runtime.advance(Duration::from_secs(10)).unwrap();
    assert_eq!(gate_state(&runtime), Some(GateState::Ready));
}

#[test]
fn responses_for_a_replaced_view_are_dropped() {
    let mut h = harness("/1", MemoryStore::new(board()));
    h.runtime.start().unwrap();
    h.runtime.dispatch(&Event::Navigate("/4".to_string())).unwrap();
    assert!(h.runtime.wait_for_worker(WORKER_TIMEOUT).unwrap());

    let detail = h.runtime.state().detail().unwrap();
    assert_eq!(detail.id, 4);
    assert_eq!(detail.posting().map(|p| p.id), Some(4));
}

#[test]
fn metadata_follows_mounts_and_loads() {
    let mut h = started("/", MemoryStore::new(board()));
    h.runtime.dispatch(&Event::Navigate("/3".to_string())).unwrap();
    assert!(h.runtime.wait_for_worker(WORKER_TIMEOUT).unwrap());

    let titles: Vec<String> = h.metadata.calls().into_iter().map(|m| m.title).collect();
    assert_eq!(titles.first().map(String::as_str), Some("Hire Box | Latest Jobs and Internships"));
    assert_eq!(titles.last().map(String::as_str), Some("Data Analyst at Hooli | Hire Box"));
}

#[test]
fn same_view_navigation_does_not_refetch() {
    let store = Arc::new(MemoryStore::new(board()));
    let gateway = DataGateway::new(store.clone());
    let mut runtime = Runtime::new(Theme::default(), gateway, Environment::headless("/"));
    runtime.start().unwrap();
    assert!(runtime.wait_for_worker(WORKER_TIMEOUT).unwrap());

    runtime.dispatch(&Event::Navigate("/".to_string())).unwrap();
    assert!(runtime.wait_for_worker(WORKER_TIMEOUT).unwrap());
    assert_eq!(store.query_count(), 1);
}
