//! Application layer coordinating routing, views, events, and actions.
//!
//! This module is the core of the browser: it sits between the runtime
//! (timers, history, collaborators, the terminal loop in main.rs) and the
//! domain/store/worker layers. It performs no I/O itself; every side effect
//! leaves as an [`Action`].
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Input / Timer / History → Events → handle_event → State Mutations → Actions → Runtime
//!                                ↑                                          ↓
//!                                └────────── Worker Responses ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter`]: Real-time search over postings
//! - [`gate`]: The apply-link delay state machine
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Listing input modes
//! - [`router`]: Path to view resolution
//! - [`state`]: Composition root and view model computation
//! - [`views`]: Mounted view instances
//!
//! # Example
//!
//! ```rust
//! use hirebox::app::{handle_event, AppState, Event};
//! use hirebox::ui::Theme;
//!
//! let mut state = AppState::new("/", Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(!actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod filter;
pub mod gate;
pub mod handler;
pub mod modes;
pub mod router;
pub mod state;
pub mod views;

pub use actions::{Action, AnalyticsEvent, AnalyticsKind, DocumentMeta};
pub use filter::filter_postings;
pub use gate::{ApplyGate, GateState, TimerId};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus};
pub use router::{resolve, Router, ViewId};
pub use state::AppState;
pub use views::{DetailLoad, DetailView, ListingsView, Page, View};
