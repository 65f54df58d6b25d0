//! Background fetch worker.
//!
//! Keeps network I/O off the event loop. Requests and responses are plain
//! messages; the event loop never blocks on a fetch unless it chooses to wait.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Gateway-backed handler and the thread-per-request worker

pub mod handler;
pub mod messages;

pub use handler::{FetchWorker, PostingWorker};
pub use messages::{RequestId, TraceContext, WorkerMessage, WorkerResponse};
