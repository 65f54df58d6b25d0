//! Store layer: the remote posting collection and the gateway in front of it.
//!
//! # Modules
//!
//! - `backend`: [`PostingStore`] trait, the read-only query contract
//! - `rest`: PostgREST-style HTTP implementation
//! - `memory`: in-memory implementation for tests and offline use
//! - `models`: flat wire records, separate from domain models
//! - `fallback`: fixed postings substituted on failure
//! - `gateway`: [`DataGateway`], which never surfaces a transport error

pub mod backend;
pub mod fallback;
pub mod gateway;
pub mod memory;
pub mod models;
pub mod rest;

pub use backend::PostingStore;
pub use gateway::{DataGateway, DataOrigin, Fetched};
pub use memory::MemoryStore;
pub use models::PostingRecord;
pub use rest::RestStore;
