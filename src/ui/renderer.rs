//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component layout
//!
//! The result is a complete frame: a clear-screen sequence followed by
//! cursor-addressed lines. Writing it to the terminal is the caller's job.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use hirebox::app::AppState;
//! use hirebox::ui::{render, Theme};
//!
//! let state = AppState::new("/about", Theme::default());
//! let frame = render(&state, 24, 80, Utc::now());
//! assert!(frame.contains("Hire Box"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;
use chrono::{DateTime, Utc};

const CLEAR_SCREEN: &str = "\u{1b}[2J";

/// Renders the whole screen for `state` into a frame string.
///
/// `now` anchors the relative posting ages ("3 days ago").
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize, now: DateTime<Utc>) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols, now);

    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::from(CLEAR_SCREEN);
    components::render_layout(&mut out, vm, theme, cols, rows);
    out
}
