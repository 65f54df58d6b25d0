//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, timer
//! firings, history changes and worker responses, translating them into state
//! changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the terminal, the timer queue, history or the worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and view methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Lifecycle**: `Start`, `Quit`
//! - **Routing**: `Navigate`, `PathChanged`, `Back`
//! - **Listing**: `KeyDown`, `KeyUp`, `SelectPosting`, search editing
//! - **Apply gate**: `RequestApply`, `OpenApplyLink`, `Timer`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use hirebox::app::{handle_event, AppState, Event};
//! use hirebox::ui::Theme;
//!
//! let mut state = AppState::new("/", Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(render);
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), hirebox::domain::HireBoxError>(())
//! ```

use crate::app::gate::TimerId;
use crate::app::modes::{InputMode, SearchFocus};
use crate::app::state::BACK_PATH;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::WorkerResponse;

/// Events triggered by user input, history changes, timers or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The runtime delivers them one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mounts the view for the initial path.
    Start,

    /// In-app navigation to a path.
    Navigate(String),

    /// The environment's path changed through back/forward.
    PathChanged(String),

    /// Returns to the listing ("Back to Jobs").
    Back,

    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Opens the highlighted posting.
    SelectPosting,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results list (from typing mode).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Replaces the whole query, e.g. on paste.
    SetQuery(String),

    /// Asks the mounted detail view's gate for the apply link.
    RequestApply,
    /// Opens the apply link of a ready gate.
    OpenApplyLink,

    /// A scheduled timer fired.
    Timer(TimerId),

    /// Wraps a response from the background fetch worker.
    WorkerResponse(WorkerResponse),

    /// Ends the session.
    Quit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the UI needs a re-render, and the actions to execute in order. The
/// action list may be empty.
///
/// # Errors
///
/// Reserved for state transitions that can fail; no current transition does.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Start => Ok((true, state.mount_current())),
        Event::Navigate(path) => Ok((true, state.navigate(path))),
        Event::PathChanged(path) => Ok(state.sync_path(path)),
        Event::Back => Ok((true, state.navigate(BACK_PATH))),
        Event::Quit => Ok((false, vec![Action::Quit])),

        Event::KeyDown => Ok(with_listings(state, |listings| {
            listings.move_selection_down();
            true
        })),
        Event::KeyUp => Ok(with_listings(state, |listings| {
            listings.move_selection_up();
            true
        })),
        Event::SelectPosting => {
            let Some(listings) = state.listings_mut() else {
                return Ok((false, vec![]));
            };

            let Some(id) = listings.selected_posting().map(|p| p.id) else {
                tracing::debug!("no posting selected");
                if listings.input_mode.is_search() {
                    tracing::debug!("exiting search mode (no selection)");
                    reset_search(listings);
                    return Ok((true, vec![]));
                }
                return Ok((false, vec![]));
            };

            tracing::debug!(posting_id = id, "posting selected");
            Ok((true, state.navigate(&format!("/{id}"))))
        }

        Event::SearchMode => Ok(with_listings(state, |listings| {
            tracing::debug!("entering search mode");
            listings.input_mode = InputMode::Search(SearchFocus::Typing);
            listings.query.clear();
            listings.apply_filter();
            true
        })),
        Event::FocusSearchBar => Ok(with_listings(state, |listings| {
            listings.input_mode = InputMode::Search(SearchFocus::Typing);
            true
        })),
        Event::FocusResults => Ok(with_listings(state, |listings| {
            if listings.query.trim().is_empty() {
                reset_search(listings);
            } else {
                listings.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            true
        })),
        Event::ExitSearch => Ok(with_listings(state, |listings| {
            tracing::debug!(query = %listings.query, "exiting search mode");
            reset_search(listings);
            true
        })),
        Event::Char(c) => Ok(with_listings(state, |listings| {
            if !listings.input_mode.is_search() {
                return false;
            }
            listings.query.push(*c);
            tracing::trace!(query = %listings.query, char = %c, "search query updated");
            listings.apply_filter();
            true
        })),
        Event::Backspace => Ok(with_listings(state, |listings| {
            if !listings.input_mode.is_search() {
                return false;
            }
            listings.query.pop();
            listings.apply_filter();
            true
        })),
        Event::SetQuery(query) => Ok(with_listings(state, |listings| {
            if !listings.input_mode.is_search() {
                listings.input_mode = InputMode::Search(SearchFocus::Typing);
            }
            listings.query.clone_from(query);
            listings.apply_filter();
            true
        })),

        Event::RequestApply => Ok(state.request_apply()),
        Event::OpenApplyLink => Ok((false, state.open_apply_link())),
        Event::Timer(id) => Ok(state.apply_timer(*id)),
        Event::WorkerResponse(response) => Ok(state.apply_response(response)),
    }
}

/// Runs `f` on the mounted listing. Other views ignore listing events.
fn with_listings(
    state: &mut AppState,
    f: impl FnOnce(&mut crate::app::views::ListingsView) -> bool,
) -> (bool, Vec<Action>) {
    state.listings_mut().map_or((false, vec![]), |listings| (f(listings), vec![]))
}

fn reset_search(listings: &mut crate::app::views::ListingsView) {
    listings.input_mode = InputMode::Normal;
    listings.query.clear();
    listings.apply_filter();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gate::{APPLY_DELAY, PHRASE_INTERVAL, PROGRESS_INTERVAL};
    use crate::app::views::{DetailLoad, View};
    use crate::app::{AnalyticsKind, ViewId};
    use crate::store::fallback::{fallback_posting, fallback_postings};
    use crate::store::DataOrigin;
    use crate::ui::Theme;
    use crate::worker::RequestId;

    fn started(path: &str) -> AppState {
        let mut state = AppState::new(path, Theme::default());
        handle_event(&mut state, &Event::Start).unwrap();
        state
    }

    fn mounted_request(state: &AppState) -> RequestId {
        state.view.as_ref().and_then(View::request).unwrap()
    }

    fn load_listing(state: &mut AppState) {
        let request = mounted_request(state);
        let response = WorkerResponse::PostingsListed { request, postings: fallback_postings(), origin: DataOrigin::Store };
        handle_event(state, &Event::WorkerResponse(response)).unwrap();
    }

    fn load_detail(state: &mut AppState, id: i64) {
        let request = mounted_request(state);
        let response = WorkerResponse::PostingFetched {
            request,
            id,
            posting: Some(fallback_posting(id)),
            origin: DataOrigin::Store,
        };
        handle_event(state, &Event::WorkerResponse(response)).unwrap();
    }

    fn scheduled(actions: &[Action]) -> Vec<TimerId> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::ScheduleTimer { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn typing_filters_synchronously() {
        let mut state = started("/");
        load_listing(&mut state);

        handle_event(&mut state, &Event::SearchMode).unwrap();
        for c in "INTERN".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }

        let ids: Vec<i64> = state.listings().unwrap().filtered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![13, 15]);

        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.listings().unwrap().filtered.len(), 4);
    }

    #[test]
    fn chars_outside_search_are_ignored() {
        let mut state = started("/");
        load_listing(&mut state);
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.listings().unwrap().query.is_empty());
    }

    #[test]
    fn select_posting_navigates_to_detail() {
        let mut state = started("/");
        load_listing(&mut state);
        handle_event(&mut state, &Event::KeyDown).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::SelectPosting).unwrap();
        assert_eq!(actions[0], Action::PushHistory("/14".to_string()));
        assert_eq!(state.router.view(), ViewId::Detail(14));
    }

    #[test]
    fn apply_request_tracks_click_and_schedules_timers() {
        let mut state = started("/13");
        load_detail(&mut state, 13);

        let (render, actions) = handle_event(&mut state, &Event::RequestApply).unwrap();
        assert!(render);
        match &actions[0] {
            Action::Track(event) => {
                assert_eq!(event.kind, AnalyticsKind::ApplyClick);
                assert_eq!(event.label, "Atomberg - Intern");
                assert_eq!(event.value, 13);
            }
            other => panic!("unexpected action: {other:?}"),
        }
        let afters: Vec<_> = actions
            .iter()
            .filter_map(|a| match a {
                Action::ScheduleTimer { after, .. } => Some(*after),
                _ => None,
            })
            .collect();
        assert_eq!(afters, vec![PROGRESS_INTERVAL, PHRASE_INTERVAL, APPLY_DELAY]);

        let (_, again) = handle_event(&mut state, &Event::RequestApply).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn apply_before_load_is_ignored() {
        let mut state = started("/13");
        let (render, actions) = handle_event(&mut state, &Event::RequestApply).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn leaving_a_pending_detail_cancels_first() {
        let mut state = started("/13");
        load_detail(&mut state, 13);
        let (_, actions) = handle_event(&mut state, &Event::RequestApply).unwrap();
        let timers = scheduled(&actions);

        let (_, actions) = handle_event(&mut state, &Event::Back).unwrap();
        assert_eq!(actions[0], Action::PushHistory("/".to_string()));
        let cancels: Vec<TimerId> = actions
            .iter()
            .filter_map(|a| match a {
                Action::CancelTimer(id) => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(cancels, timers);
        assert!(matches!(actions[1], Action::CancelTimer(_)));

        let (render, actions) = handle_event(&mut state, &Event::Timer(timers[2])).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn detail_to_detail_remounts() {
        let mut state = started("/13");
        load_detail(&mut state, 13);
        let before = mounted_request(&state);

        handle_event(&mut state, &Event::Navigate("/14".to_string())).unwrap();
        assert_ne!(mounted_request(&state), before);
        assert_eq!(state.detail().map(|d| &d.load), Some(&DetailLoad::Loading));
    }

    #[test]
    fn path_change_to_same_view_is_quiet() {
        let mut state = started("/");
        let (render, actions) = handle_event(&mut state, &Event::PathChanged("/garbage".to_string())).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn open_link_requires_ready_gate() {
        let mut state = started("/13");
        load_detail(&mut state, 13);
        assert!(handle_event(&mut state, &Event::OpenApplyLink).unwrap().1.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::RequestApply).unwrap();
        let deadline = scheduled(&actions)[2];
        let (_, cancels) = handle_event(&mut state, &Event::Timer(deadline)).unwrap();
        assert_eq!(cancels.len(), 2);

        let (_, actions) = handle_event(&mut state, &Event::OpenApplyLink).unwrap();
        assert_eq!(actions[0], Action::OpenLink(fallback_posting(13).apply_link));
        assert!(matches!(&actions[1], Action::Track(e) if e.kind == AnalyticsKind::ApplyRedirect));
    }
}
