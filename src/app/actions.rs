//! Actions representing side effects to be executed by the runtime.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the event handler after processing user input, timers or worker responses.
//! Actions are the boundary between pure state transitions and effectful
//! operations: history writes, fetches, timer scheduling and the fire-and-forget
//! collaborators (analytics, document metadata, link opening).
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! runtime executes them in order before the next event is processed, so a
//! `CancelTimer` emitted during a view change takes effect before any timer
//! can fire again.
//!
//! # Example
//!
//! ```rust
//! use hirebox::app::Action;
//! use hirebox::worker::{RequestId, WorkerMessage};
//!
//! let actions = vec![
//!     Action::PushHistory("/42".to_string()),
//!     Action::PostToWorker(WorkerMessage::get_posting(RequestId(1), 42)),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::app::gate::TimerId;
use crate::worker::WorkerMessage;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Analytics event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyticsKind {
    /// The user asked for the apply link.
    ApplyClick,
    /// The user opened the apply link.
    ApplyRedirect,
}

impl AnalyticsKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplyClick => "apply_click",
            Self::ApplyRedirect => "apply_redirect",
        }
    }
}

/// One analytics notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub kind: AnalyticsKind,
    /// `"<company> - <designation>"`.
    pub label: String,
    /// Posting id.
    pub value: i64,
}

/// Title and description published for the mounted view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub title: String,
    pub description: String,
}

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Appends a path to the navigation history.
    ///
    /// Emitted for in-app navigation only; back/forward never push.
    PushHistory(String),

    /// Posts a message to the background fetch worker.
    PostToWorker(WorkerMessage),

    /// Schedules a timer that reports back as `Event::Timer(id)`.
    ScheduleTimer {
        /// Handle owned by the requesting gate.
        id: TimerId,
        /// Delay until the first firing.
        after: Duration,
        /// Whether the timer re-arms with the same period.
        repeat: bool,
    },

    /// Cancels a scheduled timer. Unknown ids are ignored.
    CancelTimer(TimerId),

    /// Notifies analytics. Delivery is best-effort.
    Track(AnalyticsEvent),

    /// Publishes document metadata. Delivery is best-effort.
    SetMetadata(DocumentMeta),

    /// Opens an external URL in a new browsing context.
    OpenLink(String),

    /// Ends the session.
    Quit,
}
