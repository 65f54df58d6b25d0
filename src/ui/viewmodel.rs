//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: formatted labels, highlight
//! ranges, selection flags and the visible window of posting cards.
//!
//! # Example
//!
//! ```rust
//! use hirebox::ui::viewmodel::{FooterInfo, HeaderInfo, UIViewModel, ViewBody};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: "Hire Box".to_string(),
//!         subtitle: "Discover your next career move".to_string(),
//!     },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     search_bar: None,
//!     notice: None,
//!     body: ViewBody::Loading,
//! };
//! assert!(matches!(vm.body, ViewBody::Loading));
//! ```

use crate::app::views::Page;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Present while the listing is in search mode.
    pub search_bar: Option<SearchBarInfo>,

    /// One-line notice under the header, e.g. when showing fallback data.
    pub notice: Option<String>,

    pub body: ViewBody,
}

/// Main content area, one variant per screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    /// A fetch for the mounted view is in flight.
    Loading,

    /// The posting grid.
    Listings {
        /// Visible window of cards.
        cards: Vec<PostingCard>,
        /// Selected card index within `cards`.
        selected_index: usize,
        /// Total number of postings after filtering.
        total: usize,
        empty_state: Option<EmptyState>,
    },

    Detail(DetailCard),

    /// No posting with the requested id.
    NotFound { message: String, back_label: String },

    Page(Page),
}

/// One posting in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingCard {
    pub designation: String,
    pub company: String,
    pub location: String,
    pub batch: String,
    /// Relative age, e.g. "3 days ago".
    pub age: String,
    pub is_selected: bool,

    /// Search matches within `designation`, as character ranges.
    pub designation_highlights: Vec<(usize, usize)>,
    /// Search matches within `company`, as character ranges.
    pub company_highlights: Vec<(usize, usize)>,
}

/// A single posting with its apply panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    pub designation: String,
    pub company: String,
    pub location: String,
    pub batch: String,
    pub posted: String,
    pub apply: ApplyPanel,
}

/// Apply section of a detail card, mirroring the gate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyPanel {
    /// Nothing requested yet.
    Idle,
    /// Delay running.
    Pending { progress: u8, status: String },
    /// Link exposed.
    Ready { link: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

/// Footer display information.
///
/// Contains keybinding hints for the bottom of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit  /: search").
    pub keybindings: String,
}

/// Shown when the grid has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether keystrokes currently edit the query.
    pub focused: bool,
}
