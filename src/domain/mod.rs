//! Domain layer for Hire Box.
//!
//! Core types independent of the HTTP store, the terminal, and the runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`posting`]: Posting model, age label, and ordering helpers

pub mod error;
pub mod posting;

pub use error::{HireBoxError, Result};
pub use posting::{dedupe_by_id, sort_newest_first, Posting};
