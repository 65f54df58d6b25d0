//! Runtime: timers, collaborators and the action executor.
//!
//! # Architecture
//!
//! - `timer`: Deterministic timer queue with cancellation
//! - `env`: Injected browsing-environment collaborators
//! - `driver`: Executes actions and pumps timer and worker events

pub mod driver;
pub mod env;
pub mod timer;

pub use driver::Runtime;
pub use env::{
    Analytics, DocumentMetadata, Environment, History, LinkOpener, MemoryHistory, Noop, Recorder, SystemBrowser,
    TerminalTitle, TracingAnalytics,
};
pub use timer::TimerQueue;
