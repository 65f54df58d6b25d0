//! Mounted view instances.
//!
//! Exactly one [`View`] is mounted at a time. A view is created when the
//! router resolves to a different [`ViewId`] and dropped when the next one
//! replaces it. Views that need data carry the [`RequestId`] of the fetch they
//! issued on mount; responses for any other id are not theirs.

use crate::app::filter::filter_postings;
use crate::app::gate::ApplyGate;
use crate::app::modes::InputMode;
use crate::app::router::ViewId;
use crate::domain::{dedupe_by_id, sort_newest_first, Posting};
use crate::store::DataOrigin;
use crate::worker::RequestId;

/// Informational pages with fixed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    About,
    Privacy,
    Terms,
}

impl Page {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Privacy => "Privacy Policy",
            Self::Terms => "Terms of Service",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::About => "What Hire Box is and how it works.",
            Self::Privacy => "How Hire Box handles your data.",
            Self::Terms => "The terms for using Hire Box.",
        }
    }

    #[must_use]
    pub const fn view_id(self) -> ViewId {
        match self {
            Self::About => ViewId::About,
            Self::Privacy => ViewId::Privacy,
            Self::Terms => ViewId::Terms,
        }
    }
}

/// The searchable posting grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingsView {
    /// Fetch issued by this mount.
    pub request: RequestId,

    /// Every posting, newest first. `None` while the fetch is in flight.
    pub postings: Option<Vec<Posting>>,

    pub origin: Option<DataOrigin>,

    /// `postings` narrowed by `query`, recomputed on every change to either.
    pub filtered: Vec<Posting>,

    pub query: String,
    pub input_mode: InputMode,

    /// Index into `filtered`; clamped whenever `filtered` changes.
    pub selected_index: usize,
}

impl ListingsView {
    #[must_use]
    pub const fn new(request: RequestId) -> Self {
        Self {
            request,
            postings: None,
            origin: None,
            filtered: Vec::new(),
            query: String::new(),
            input_mode: InputMode::Normal,
            selected_index: 0,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.postings.is_none()
    }

    /// Replaces the held list wholesale.
    ///
    /// Duplicate ids keep their first occurrence in store order, then the list
    /// is sorted newest first and the filter is re-applied.
    pub fn replace_postings(&mut self, mut postings: Vec<Posting>, origin: DataOrigin) {
        let dropped = dedupe_by_id(&mut postings);
        if dropped > 0 {
            tracing::warn!(dropped, "duplicate posting ids in response");
        }
        sort_newest_first(&mut postings);
        self.postings = Some(postings);
        self.origin = Some(origin);
        self.apply_filter();
    }

    /// Recomputes `filtered` from the held list and query.
    pub fn apply_filter(&mut self) {
        let _span = tracing::debug_span!("apply_filter", query_len = self.query.len()).entered();

        self.filtered = self
            .postings
            .as_deref()
            .map_or_else(Vec::new, |all| filter_postings(all, &self.query));

        self.selected_index = if self.filtered.is_empty() {
            0
        } else {
            self.selected_index.min(self.filtered.len() - 1)
        };

        tracing::debug!(filtered_count = self.filtered.len(), "filter applied");
    }

    pub fn move_selection_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_posting(&self) -> Option<&Posting> {
        self.filtered.get(self.selected_index)
    }
}

/// Load state of a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLoad {
    Loading,
    /// The store reported no record with the requested id.
    NotFound,
    Loaded(Posting),
}

/// One posting and its apply gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: i64,
    pub request: RequestId,
    pub load: DetailLoad,
    pub origin: Option<DataOrigin>,
    pub gate: ApplyGate,
}

impl DetailView {
    #[must_use]
    pub fn new(id: i64, request: RequestId) -> Self {
        Self {
            id,
            request,
            load: DetailLoad::Loading,
            origin: None,
            gate: ApplyGate::new(),
        }
    }

    #[must_use]
    pub const fn posting(&self) -> Option<&Posting> {
        match &self.load {
            DetailLoad::Loaded(posting) => Some(posting),
            DetailLoad::Loading | DetailLoad::NotFound => None,
        }
    }
}

/// The mounted view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Listings(ListingsView),
    Detail(DetailView),
    Page(Page),
}

impl View {
    #[must_use]
    pub const fn id(&self) -> ViewId {
        match self {
            Self::Listings(_) => ViewId::Listings,
            Self::Detail(detail) => ViewId::Detail(detail.id),
            Self::Page(page) => page.view_id(),
        }
    }

    /// Fetch issued by this mount, if any.
    #[must_use]
    pub const fn request(&self) -> Option<RequestId> {
        match self {
            Self::Listings(listings) => Some(listings.request),
            Self::Detail(detail) => Some(detail.request),
            Self::Page(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn posting(id: i64, designation: &str, day: u32) -> Posting {
        Posting {
            id,
            company_name: format!("Company {id}"),
            designation: designation.to_string(),
            location: "Remote".to_string(),
            batch: "2026".to_string(),
            apply_link: format!("https://example.com/{id}"),
            created_at: Utc.with_ymd_and_hms(2025, 8, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn replace_sorts_newest_first_and_dedupes() {
        let mut view = ListingsView::new(RequestId(1));
        assert!(view.is_loading());

        view.replace_postings(
            vec![posting(1, "A", 1), posting(2, "B", 3), posting(1, "dup", 9), posting(3, "C", 2)],
            DataOrigin::Store,
        );

        let ids: Vec<i64> = view.filtered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(view.filtered[2].designation, "A");
        assert!(!view.is_loading());
    }

    #[test]
    fn selection_wraps_and_clamps() {
        let mut view = ListingsView::new(RequestId(1));
        view.replace_postings(
            vec![posting(1, "Intern", 1), posting(2, "Engineer", 2), posting(3, "Intern", 3)],
            DataOrigin::Store,
        );

        view.move_selection_up();
        assert_eq!(view.selected_index, 2);
        view.move_selection_down();
        assert_eq!(view.selected_index, 0);

        view.selected_index = 2;
        view.query = "engineer".to_string();
        view.apply_filter();
        assert_eq!(view.selected_index, 0);
        assert_eq!(view.selected_posting().map(|p| p.id), Some(2));
    }

    #[test]
    fn view_ids_distinguish_details() {
        let a = View::Detail(DetailView::new(1, RequestId(1)));
        let b = View::Detail(DetailView::new(2, RequestId(2)));
        assert_ne!(a.id(), b.id());
        assert_eq!(View::Page(Page::Terms).id(), ViewId::Terms);
        assert_eq!(View::Page(Page::About).request(), None);
    }
}
