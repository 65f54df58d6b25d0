//! Path routing.
//!
//! Maps a location path onto one of a closed set of views. Resolution never
//! fails: reserved literal paths select static views, `/<digits>` selects a
//! posting detail (a leading `-` is allowed), and everything else falls back to the listing.
//!
//! | Path            | View            |
//! |-----------------|-----------------|
//! | `/`             | `Listings`      |
//! | `/about`        | `About`         |
//! | `/privacy`      | `Privacy`       |
//! | `/terms`        | `Terms`         |
//! | `/42`           | `Detail(42)`    |
//! | anything else   | `Listings`      |

/// Root path, always the listing.
pub const ROOT_PATH: &str = "/";
pub const ABOUT_PATH: &str = "/about";
pub const PRIVACY_PATH: &str = "/privacy";
pub const TERMS_PATH: &str = "/terms";

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Listings,
    About,
    Privacy,
    Terms,
    Detail(i64),
}

impl ViewId {
    /// Canonical path for this view.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Listings => ROOT_PATH.to_string(),
            Self::About => ABOUT_PATH.to_string(),
            Self::Privacy => PRIVACY_PATH.to_string(),
            Self::Terms => TERMS_PATH.to_string(),
            Self::Detail(id) => format!("/{id}"),
        }
    }
}

/// Resolves a path to a view.
///
/// # Examples
///
/// ```
/// use hirebox::app::router::{resolve, ViewId};
///
/// assert_eq!(resolve("/"), ViewId::Listings);
/// assert_eq!(resolve("/terms"), ViewId::Terms);
/// assert_eq!(resolve("/42"), ViewId::Detail(42));
/// assert_eq!(resolve("/42abc"), ViewId::Listings);
/// ```
#[must_use]
pub fn resolve(path: &str) -> ViewId {
    match path {
        ROOT_PATH => ViewId::Listings,
        ABOUT_PATH => ViewId::About,
        PRIVACY_PATH => ViewId::Privacy,
        TERMS_PATH => ViewId::Terms,
        other => parse_detail_id(other).map_or(ViewId::Listings, ViewId::Detail),
    }
}

/// Parses `/<integer>` into an id. An optional leading `-` is allowed; `+`,
/// whitespace and trailing text are rejected.
fn parse_detail_id(path: &str) -> Option<i64> {
    let segment = path.strip_prefix('/')?;
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Tracks the current path and the view it resolves to.
///
/// The router owns no environment handle: the runtime pushes history entries
/// for [`Router::navigate`] and feeds back/forward changes through
/// [`Router::sync`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    path: String,
    view: ViewId,
}

impl Router {
    /// Creates a router at `initial_path`.
    #[must_use]
    pub fn new(initial_path: &str) -> Self {
        Self {
            path: initial_path.to_string(),
            view: resolve(initial_path),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn view(&self) -> ViewId {
        self.view
    }

    /// Moves to `path` in response to an in-app navigation.
    ///
    /// Returns the newly resolved view. The caller is responsible for pushing
    /// the path into history.
    pub fn navigate(&mut self, path: &str) -> ViewId {
        tracing::debug!(from = %self.path, to = %path, "navigate");
        self.set(path)
    }

    /// Re-reads the environment's path after a back/forward change.
    pub fn sync(&mut self, path: &str) -> ViewId {
        tracing::debug!(from = %self.path, to = %path, "history changed");
        self.set(path)
    }

    fn set(&mut self, path: &str) -> ViewId {
        self.path = path.to_string();
        self.view = resolve(path);
        self.view
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(ROOT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_paths_resolve_literally() {
        assert_eq!(resolve("/"), ViewId::Listings);
        assert_eq!(resolve("/about"), ViewId::About);
        assert_eq!(resolve("/privacy"), ViewId::Privacy);
        assert_eq!(resolve("/terms"), ViewId::Terms);
    }

    #[test]
    fn integer_paths_resolve_to_detail() {
        assert_eq!(resolve("/0"), ViewId::Detail(0));
        assert_eq!(resolve("/42"), ViewId::Detail(42));
        assert_eq!(resolve("/0042"), ViewId::Detail(42));
    }

    #[test]
    fn negative_integer_paths_resolve_to_detail() {
        assert_eq!(resolve("/-5"), ViewId::Detail(-5));
        assert_eq!(resolve("/-0"), ViewId::Detail(0));
        assert_eq!(resolve(&ViewId::Detail(-12).path()), ViewId::Detail(-12));
    }

    #[test]
    fn malformed_paths_fall_back_to_listings() {
        for path in ["", "/abc", "/about/", "/42/", "/-", "/--5", "/+5", "/ 5", "/- 5", "/4 2", "/-4x", "42", "/99999999999999999999", "/-99999999999999999999"] {
            assert_eq!(resolve(path), ViewId::Listings, "path {path:?}");
        }
    }

    #[test]
    fn view_paths_round_trip() {
        for view in [ViewId::Listings, ViewId::About, ViewId::Privacy, ViewId::Terms, ViewId::Detail(7)] {
            assert_eq!(resolve(&view.path()), view);
        }
    }

    #[test]
    fn navigate_and_sync_update_path_synchronously() {
        let mut router = Router::default();
        assert_eq!(router.navigate("/12"), ViewId::Detail(12));
        assert_eq!(router.path(), "/12");
        assert_eq!(router.sync("/"), ViewId::Listings);
        assert_eq!(router.view(), ViewId::Listings);
    }
}
