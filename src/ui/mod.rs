//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into ANSI-styled frames through
//! composable rendering components, with theme support and search match
//! highlighting.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → frame String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    ApplyPanel, DetailCard, EmptyState, FooterInfo, HeaderInfo, PostingCard, SearchBarInfo, UIViewModel, ViewBody,
};
