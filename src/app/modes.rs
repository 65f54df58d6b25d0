//! Input mode state for the listing view.
//!
//! The listing operates in one of two input modes:
//! - **Normal**: navigation and route shortcuts
//! - **Search**: the query is being typed, or the filtered results are being navigated
//!
//! # Example
//!
//! ```rust
//! use hirebox::app::modes::{InputMode, SearchFocus};
//!
//! let mode = InputMode::Search(SearchFocus::Typing);
//! assert!(mode.is_search());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keystrokes edit the query.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// Keystrokes move through the filtered results.
    ///
    /// Accepts j/k for movement, enter to open, and / to return to Typing.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and the footer hint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// j/k (navigate), / (search), enter (open), a/p/t (pages), q (quit).
    #[default]
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search(_))
    }

    /// Whether printable keys should be read as query text.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing))
    }
}
