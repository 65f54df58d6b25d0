//! Application state and view composition.
//!
//! [`AppState`] is the composition root. It owns the [`Router`] and the single
//! mounted [`View`], and decides when a view is mounted, replaced or torn
//! down. It holds no posting data of its own: postings live in the mounted
//! view and are dropped with it.
//!
//! # Mount lifecycle
//!
//! 1. The router resolves a path to a [`ViewId`].
//! 2. If the id differs from the mounted view's id, the old view is torn down
//!    (its gate timers are cancelled first) and the new view is mounted.
//! 3. A mount allocates a fresh [`RequestId`], issues at most one fetch and
//!    publishes document metadata.
//! 4. Worker responses whose request id is not the mounted view's are dropped.
//!
//! # Example
//!
//! ```rust
//! use hirebox::app::{Action, AppState};
//! use hirebox::ui::Theme;
//!
//! let mut state = AppState::new("/about", Theme::default());
//! let actions = state.mount_current();
//! assert!(matches!(actions[0], Action::SetMetadata(_)));
//! ```

use crate::app::actions::{Action, AnalyticsEvent, AnalyticsKind, DocumentMeta};
use crate::app::gate::{GateState, GateTick, TimerId, TimerIds};
use crate::app::modes::{InputMode, SearchFocus};
use crate::app::router::{Router, ViewId, ROOT_PATH};
use crate::app::views::{DetailLoad, DetailView, ListingsView, Page, View};
use crate::app::filter::highlight_ranges;
use crate::domain::Posting;
use crate::store::DataOrigin;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ApplyPanel, DetailCard, EmptyState, FooterInfo, HeaderInfo, PostingCard, SearchBarInfo, UIViewModel,
    ViewBody,
};
use crate::worker::{RequestId, WorkerMessage, WorkerResponse};
use chrono::{DateTime, Utc};

pub const SITE_NAME: &str = "Hire Box";
pub const TAGLINE: &str = "Discover your next career move";
pub const EMPTY_LISTING_MESSAGE: &str = "No job openings available at the moment.";
pub const NOT_FOUND_MESSAGE: &str = "Job Not Found";
pub const BACK_LABEL: &str = "Back to Jobs";

/// Path the "back" affordances lead to.
pub const BACK_PATH: &str = ROOT_PATH;

/// Lines taken by one posting card, including the gap after it.
const CARD_HEIGHT: usize = 5;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub router: Router,

    /// Mounted view. `None` until [`AppState::mount_current`] runs.
    pub view: Option<View>,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    timer_ids: TimerIds,
    last_request: u64,
}

impl AppState {
    /// Creates the state at `initial_path`. Nothing is mounted yet.
    #[must_use]
    pub fn new(initial_path: &str, theme: Theme) -> Self {
        Self {
            router: Router::new(initial_path),
            view: None,
            theme,
            timer_ids: TimerIds::default(),
            last_request: 0,
        }
    }

    fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        RequestId(self.last_request)
    }

    /// Mounts the view for the router's current path, replacing any mounted view.
    pub fn mount_current(&mut self) -> Vec<Action> {
        let mut actions = self.unmount();
        let view_id = self.router.view();
        let _span = tracing::debug_span!("mount", view = ?view_id).entered();

        let (view, fetch) = match view_id {
            ViewId::Listings => {
                let request = self.next_request();
                (View::Listings(ListingsView::new(request)), Some(WorkerMessage::list_postings(request)))
            }
            ViewId::Detail(id) => {
                let request = self.next_request();
                (View::Detail(DetailView::new(id, request)), Some(WorkerMessage::get_posting(request, id)))
            }
            ViewId::About => (View::Page(Page::About), None),
            ViewId::Privacy => (View::Page(Page::Privacy), None),
            ViewId::Terms => (View::Page(Page::Terms), None),
        };

        actions.push(Action::SetMetadata(mount_metadata(&view)));
        actions.extend(fetch.map(Action::PostToWorker));
        self.view = Some(view);
        tracing::debug!(action_count = actions.len(), "view mounted");
        actions
    }

    /// Tears down the mounted view. Returns cancellations for its live timers.
    fn unmount(&mut self) -> Vec<Action> {
        let Some(mut view) = self.view.take() else {
            return vec![];
        };

        let cancelled = match &mut view {
            View::Detail(detail) => detail.gate.teardown(),
            View::Listings(_) | View::Page(_) => vec![],
        };
        if !cancelled.is_empty() {
            tracing::debug!(view = ?view.id(), timers = cancelled.len(), "cancelling gate timers");
        }
        cancelled.into_iter().map(Action::CancelTimer).collect()
    }

    /// Navigates in-app: pushes history and remounts if the view changed.
    pub fn navigate(&mut self, path: &str) -> Vec<Action> {
        let before = self.mounted_id();
        let after = self.router.navigate(path);

        let mut actions = vec![Action::PushHistory(path.to_string())];
        if before != Some(after) {
            actions.extend(self.mount_current());
        }
        actions
    }

    /// Follows a back/forward change. Remounts only if the view changed.
    pub fn sync_path(&mut self, path: &str) -> (bool, Vec<Action>) {
        let before = self.mounted_id();
        let after = self.router.sync(path);

        if before == Some(after) {
            return (false, vec![]);
        }
        (true, self.mount_current())
    }

    fn mounted_id(&self) -> Option<ViewId> {
        self.view.as_ref().map(View::id)
    }

    /// Applies a worker response to the mounted view.
    ///
    /// Returns `false` with no actions when the response belongs to a view
    /// that is no longer mounted.
    pub fn apply_response(&mut self, response: &WorkerResponse) -> (bool, Vec<Action>) {
        let mounted = self.view.as_ref().and_then(View::request);
        if mounted != Some(response.request()) {
            tracing::debug!(
                request = response.request().0,
                mounted = ?mounted.map(|r| r.0),
                "dropping stale response"
            );
            return (false, vec![]);
        }

        match (self.view.as_mut(), response) {
            (Some(View::Listings(listings)), WorkerResponse::PostingsListed { postings, origin, .. }) => {
                listings.replace_postings(postings.clone(), *origin);
                tracing::debug!(count = postings.len(), ?origin, "postings loaded");
                (true, vec![])
            }
            (Some(View::Detail(detail)), WorkerResponse::PostingFetched { posting, origin, .. }) => {
                detail.origin = Some(*origin);
                let Some(posting) = posting.clone() else {
                    detail.load = DetailLoad::NotFound;
                    tracing::debug!(id = detail.id, "posting not found");
                    return (true, vec![Action::SetMetadata(not_found_metadata())]);
                };
                let meta = posting_metadata(&posting);
                detail.load = DetailLoad::Loaded(posting);
                (true, vec![Action::SetMetadata(meta)])
            }
            _ => {
                tracing::warn!(response = ?response, "response does not fit the mounted view");
                (false, vec![])
            }
        }
    }

    /// Routes a fired timer to the mounted gate.
    pub fn apply_timer(&mut self, id: TimerId) -> (bool, Vec<Action>) {
        let Some(View::Detail(detail)) = self.view.as_mut() else {
            tracing::debug!(timer = id.0, "timer without a detail view");
            return (false, vec![]);
        };

        match detail.gate.on_timer(id) {
            GateTick::Ignored => (false, vec![]),
            GateTick::Progressed(_) | GateTick::Rotated(_) => (true, vec![]),
            GateTick::Ready { cancel } => (true, cancel.into_iter().map(Action::CancelTimer).collect()),
        }
    }

    /// Starts the apply delay for the loaded posting.
    pub fn request_apply(&mut self) -> (bool, Vec<Action>) {
        let Some(View::Detail(detail)) = self.view.as_mut() else {
            return (false, vec![]);
        };
        let DetailLoad::Loaded(posting) = &detail.load else {
            tracing::debug!(id = detail.id, "apply requested before posting loaded");
            return (false, vec![]);
        };

        let timers = detail.gate.request(&mut self.timer_ids);
        if timers.is_empty() {
            return (false, vec![]);
        }

        let mut actions = vec![Action::Track(analytics_event(AnalyticsKind::ApplyClick, posting))];
        actions.extend(timers.into_iter().map(|t| Action::ScheduleTimer {
            id: t.id,
            after: t.after,
            repeat: t.repeat,
        }));
        (true, actions)
    }

    /// Opens the apply link once the gate is ready.
    pub fn open_apply_link(&self) -> Vec<Action> {
        let Some(View::Detail(detail)) = self.view.as_ref() else {
            return vec![];
        };
        match (&detail.load, detail.gate.state()) {
            (DetailLoad::Loaded(posting), GateState::Ready) => vec![
                Action::OpenLink(posting.apply_link.clone()),
                Action::Track(analytics_event(AnalyticsKind::ApplyRedirect, posting)),
            ],
            _ => {
                tracing::debug!(state = ?detail.gate.state(), "apply link not available yet");
                vec![]
            }
        }
    }

    #[must_use]
    pub const fn listings(&self) -> Option<&ListingsView> {
        match &self.view {
            Some(View::Listings(listings)) => Some(listings),
            _ => None,
        }
    }

    pub fn listings_mut(&mut self) -> Option<&mut ListingsView> {
        match &mut self.view {
            Some(View::Listings(listings)) => Some(listings),
            _ => None,
        }
    }

    #[must_use]
    pub const fn detail(&self) -> Option<&DetailView> {
        match &self.view {
            Some(View::Detail(detail)) => Some(detail),
            _ => None,
        }
    }

    /// Current listing input mode, `Normal` outside the listing.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        self.listings().map_or(InputMode::Normal, |l| l.input_mode)
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    /// * `now` - Reference time for relative age labels
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize, now: DateTime<Utc>) -> UIViewModel {
        let header = self.compute_header();
        let footer = self.compute_footer();

        let Some(view) = &self.view else {
            return UIViewModel { header, footer, search_bar: None, notice: None, body: ViewBody::Loading };
        };

        let (search_bar, notice, body) = match view {
            View::Listings(listings) => {
                let search_bar = compute_search_bar(listings);
                let notice = fallback_notice(listings.origin);
                let chrome = 6 + usize::from(notice.is_some()) + if search_bar.is_some() { 3 } else { 0 };
                let body = if listings.is_loading() {
                    ViewBody::Loading
                } else {
                    compute_listings_body(listings, rows.saturating_sub(chrome), now)
                };
                (search_bar, notice, body)
            }
            View::Detail(detail) => {
                let body = match &detail.load {
                    DetailLoad::Loading => ViewBody::Loading,
                    DetailLoad::NotFound => ViewBody::NotFound {
                        message: NOT_FOUND_MESSAGE.to_string(),
                        back_label: BACK_LABEL.to_string(),
                    },
                    DetailLoad::Loaded(posting) => ViewBody::Detail(compute_detail_card(detail, posting, now)),
                };
                (None, fallback_notice(detail.origin), body)
            }
            View::Page(page) => (None, None, ViewBody::Page(*page)),
        };

        UIViewModel { header, footer, search_bar, notice, body }
    }

    fn compute_header(&self) -> HeaderInfo {
        let subtitle = match &self.view {
            Some(View::Page(page)) => page.title().to_string(),
            Some(View::Detail(detail)) => format!("Job #{}", detail.id),
            Some(View::Listings(listings)) if !listings.is_loading() => {
                format!("{TAGLINE} ({} openings)", listings.filtered.len())
            }
            _ => TAGLINE.to_string(),
        };
        HeaderInfo { title: SITE_NAME.to_string(), subtitle }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match &self.view {
            Some(View::Listings(listings)) => match listings.input_mode {
                InputMode::Search(SearchFocus::Typing) => {
                    "ESC: exit search  Enter: results  Type to filter"
                }
                InputMode::Search(SearchFocus::Navigating) => {
                    "ESC: exit search  /: edit query  j/k: navigate  Enter: open"
                }
                InputMode::Normal => {
                    "j/k: navigate  /: search  Enter: open  a/p/t: pages  ←/→: history  q: quit"
                }
            },
            Some(View::Detail(detail)) => match (&detail.load, detail.gate.state()) {
                (DetailLoad::Loaded(_), GateState::Idle) => "Enter: apply now  b: back to jobs  q: quit",
                (DetailLoad::Loaded(_), GateState::Ready) => "Enter: open apply link  b: back to jobs  q: quit",
                _ => "b: back to jobs  q: quit",
            },
            Some(View::Page(_)) | None => "b: back to jobs  a/p/t: pages  q: quit",
        };
        FooterInfo { keybindings: keybindings.to_string() }
    }
}

fn compute_search_bar(listings: &ListingsView) -> Option<SearchBarInfo> {
    listings.input_mode.is_search().then(|| SearchBarInfo {
        query: listings.query.clone(),
        focused: listings.input_mode.is_typing(),
    })
}

fn fallback_notice(origin: Option<DataOrigin>) -> Option<String> {
    matches!(origin, Some(DataOrigin::Fallback)).then(|| "Showing sample listings; the job store is unavailable.".to_string())
}

/// Builds the visible window of cards, centred on the selection.
fn compute_listings_body(listings: &ListingsView, available_rows: usize, now: DateTime<Utc>) -> ViewBody {
    let total = listings.filtered.len();
    if total == 0 {
        let empty_state = if listings.query.trim().is_empty() {
            EmptyState { message: EMPTY_LISTING_MESSAGE.to_string(), subtitle: "Check back soon.".to_string() }
        } else {
            EmptyState {
                message: format!("No jobs match \"{}\"", listings.query.trim()),
                subtitle: "Try a company, role, location or batch.".to_string(),
            }
        };
        return ViewBody::Listings { cards: vec![], selected_index: 0, total, empty_state: Some(empty_state) };
    }

    let window = (available_rows / CARD_HEIGHT).max(1);
    let mut visible_start = listings.selected_index.saturating_sub(window / 2);
    let visible_end = (visible_start + window).min(total);
    if visible_end - visible_start < window && total >= window {
        visible_start = visible_end.saturating_sub(window);
    }

    let query = listings.query.as_str();
    let cards = listings.filtered[visible_start..visible_end]
        .iter()
        .enumerate()
        .map(|(offset, posting)| PostingCard {
            designation: posting.designation.clone(),
            company: posting.company_name.clone(),
            location: posting.location.clone(),
            batch: posting.batch.clone(),
            age: posting.age_label(now),
            is_selected: visible_start + offset == listings.selected_index,
            designation_highlights: highlight_ranges(&posting.designation, query),
            company_highlights: highlight_ranges(&posting.company_name, query),
        })
        .collect();

    ViewBody::Listings {
        cards,
        selected_index: listings.selected_index.saturating_sub(visible_start),
        total,
        empty_state: None,
    }
}

fn compute_detail_card(detail: &DetailView, posting: &Posting, now: DateTime<Utc>) -> DetailCard {
    let apply = match detail.gate.state() {
        GateState::Idle => ApplyPanel::Idle,
        GateState::Pending => ApplyPanel::Pending {
            progress: detail.gate.progress(),
            status: detail.gate.status().to_string(),
        },
        GateState::Ready => ApplyPanel::Ready { link: posting.apply_link.clone() },
    };

    DetailCard {
        designation: posting.designation.clone(),
        company: posting.company_name.clone(),
        location: posting.location.clone(),
        batch: posting.batch.clone(),
        posted: posting.age_label(now),
        apply,
    }
}

fn analytics_event(kind: AnalyticsKind, posting: &Posting) -> AnalyticsEvent {
    AnalyticsEvent { kind, label: posting.analytics_label(), value: posting.id }
}

/// Metadata published as soon as a view mounts.
fn mount_metadata(view: &View) -> DocumentMeta {
    match view {
        View::Listings(_) => DocumentMeta {
            title: format!("{SITE_NAME} | Latest Jobs and Internships"),
            description: format!("{TAGLINE}. Browse the latest job and internship openings."),
        },
        View::Detail(detail) => DocumentMeta {
            title: format!("Job #{} | {SITE_NAME}", detail.id),
            description: "Loading job details.".to_string(),
        },
        View::Page(page) => DocumentMeta {
            title: format!("{} | {SITE_NAME}", page.title()),
            description: page.description().to_string(),
        },
    }
}

fn posting_metadata(posting: &Posting) -> DocumentMeta {
    DocumentMeta {
        title: format!("{} at {} | {SITE_NAME}", posting.designation, posting.company_name),
        description: format!(
            "{} at {} in {}. Batch: {}.",
            posting.designation, posting.company_name, posting.location, posting.batch
        ),
    }
}

fn not_found_metadata() -> DocumentMeta {
    DocumentMeta {
        title: format!("{NOT_FOUND_MESSAGE} | {SITE_NAME}"),
        description: "This job posting does not exist or has been removed.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fallback::fallback_postings;

    fn mounted(path: &str) -> (AppState, Vec<Action>) {
        let mut state = AppState::new(path, Theme::default());
        let actions = state.mount_current();
        (state, actions)
    }

    #[test]
    fn mount_publishes_metadata_then_fetches() {
        let (_, actions) = mounted("/");
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], Action::SetMetadata(_)));
        assert!(matches!(actions[1], Action::PostToWorker(WorkerMessage::ListPostings { .. })));

        let (_, actions) = mounted("/privacy");
        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], Action::SetMetadata(meta) if meta.title.starts_with("Privacy Policy")));
    }

    #[test]
    fn navigate_within_same_view_only_pushes_history() {
        let (mut state, _) = mounted("/");
        let actions = state.navigate("/unknown");
        assert_eq!(actions, vec![Action::PushHistory("/unknown".to_string())]);
    }

    #[test]
    fn stale_responses_are_dropped() {
        let (mut state, _) = mounted("/");
        let old_request = state.view.as_ref().and_then(View::request).unwrap();
        state.navigate("/about");
        state.navigate("/");

        let (render, actions) = state.apply_response(&WorkerResponse::PostingsListed {
            request: old_request,
            postings: fallback_postings(),
            origin: DataOrigin::Store,
        });
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.listings().unwrap().is_loading());
    }

    #[test]
    fn fallback_origin_produces_notice() {
        let (mut state, _) = mounted("/");
        let request = state.view.as_ref().and_then(View::request).unwrap();
        state.apply_response(&WorkerResponse::PostingsListed {
            request,
            postings: fallback_postings(),
            origin: DataOrigin::Fallback,
        });

        let vm = state.compute_viewmodel(40, 100, Utc::now());
        assert!(vm.notice.is_some());
        match vm.body {
            ViewBody::Listings { cards, total, .. } => {
                assert_eq!(total, 4);
                assert_eq!(cards.len(), 4);
                assert_eq!(cards[0].company, "Atomberg");
                assert_eq!(cards[3].company, "DataScience Inc");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn listing_window_follows_selection() {
        let (mut state, _) = mounted("/");
        let request = state.view.as_ref().and_then(View::request).unwrap();
        state.apply_response(&WorkerResponse::PostingsListed {
            request,
            postings: fallback_postings(),
            origin: DataOrigin::Store,
        });
        state.listings_mut().unwrap().selected_index = 3;

        // Six lines of chrome leave room for two cards.
        let vm = state.compute_viewmodel(16, 80, Utc::now());
        match vm.body {
            ViewBody::Listings { cards, selected_index, .. } => {
                assert_eq!(cards.len(), 2);
                assert_eq!(selected_index, 1);
                assert!(cards[1].is_selected);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }
}
