//! Directory page view state. The filter, sort order, selection, and
//! paging for the customer table live here explicitly, scoped to one
//! page view and rebuilt whenever the data reloads.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use venue_core::config::DirectoryConfig;
use venue_core::types::ScoredCustomer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Name,
    LastActive,
    TotalBookings,
    LifetimeSpend,
    Clv,
    Rfm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active row filter. An empty filter matches every customer; the
/// search term matches name or email case-insensitively and tags match
/// any-of.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilter {
    pub search: Option<String>,
    pub tags: Vec<String>,
}

impl DirectoryFilter {
    fn matches(&self, scored: &ScoredCustomer) -> bool {
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            let hit = scored.customer.name.to_lowercase().contains(&needle)
                || scored.customer.email.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|tag| scored.customer.has_tag(tag)) {
            return false;
        }
        true
    }
}

/// One directory page's worth of state over a scored batch.
pub struct DirectoryView {
    scored: Vec<ScoredCustomer>,
    filter: DirectoryFilter,
    sort_column: SortColumn,
    sort_direction: SortDirection,
    selected: Option<String>,
    page_size: usize,
}

impl DirectoryView {
    /// A fresh view opens on the alphabetical listing, unfiltered.
    pub fn new(scored: Vec<ScoredCustomer>, config: &DirectoryConfig) -> Self {
        Self {
            scored,
            filter: DirectoryFilter::default(),
            sort_column: SortColumn::Name,
            sort_direction: SortDirection::Ascending,
            selected: None,
            page_size: config.page_size.max(1),
        }
    }

    /// Replace the search term. Whitespace-only input clears it.
    pub fn set_search(&mut self, search: Option<&str>) {
        self.filter.search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
    }

    /// Add the tag to the filter, or remove it if already present.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self
            .filter
            .tags
            .iter()
            .position(|t| t.eq_ignore_ascii_case(tag))
        {
            self.filter.tags.remove(pos);
        } else {
            self.filter.tags.push(tag.to_string());
        }
    }

    /// Sort by a column; repeating the current column flips direction.
    pub fn sort_by(&mut self, column: SortColumn) {
        if self.sort_column == column {
            self.sort_direction = self.sort_direction.flip();
        } else {
            self.sort_column = column;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Set both sort column and direction at once, ignoring the toggle.
    pub fn set_sort(&mut self, column: SortColumn, direction: SortDirection) {
        self.sort_column = column;
        self.sort_direction = direction;
    }

    pub fn sort_state(&self) -> (SortColumn, SortDirection) {
        (self.sort_column, self.sort_direction)
    }

    pub fn filter(&self) -> &DirectoryFilter {
        &self.filter
    }

    /// Mark a customer for the detail pane. Selection is resolved
    /// against the full batch, so a selected row stays available even
    /// when the current filter hides it.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(|s| s.to_string());
    }

    pub fn selected(&self) -> Option<&ScoredCustomer> {
        let id = self.selected.as_deref()?;
        self.scored.iter().find(|scored| scored.customer.id == id)
    }

    /// The filtered rows in the current sort order.
    pub fn rows(&self) -> Vec<&ScoredCustomer> {
        let mut rows: Vec<&ScoredCustomer> = self
            .scored
            .iter()
            .filter(|scored| self.filter.matches(scored))
            .collect();
        rows.sort_by(|a, b| self.compare(a, b));
        rows
    }

    /// Zero-based page of `rows()`.
    pub fn page(&self, n: usize) -> Vec<&ScoredCustomer> {
        self.rows()
            .into_iter()
            .skip(n * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn page_count(&self) -> usize {
        let rows = self.rows().len();
        if rows == 0 {
            0
        } else {
            (rows + self.page_size - 1) / self.page_size
        }
    }

    fn compare(&self, a: &ScoredCustomer, b: &ScoredCustomer) -> Ordering {
        let ordering = match self.sort_column {
            SortColumn::Name => a
                .customer
                .name
                .to_lowercase()
                .cmp(&b.customer.name.to_lowercase()),
            SortColumn::LastActive => a.last_active_days.cmp(&b.last_active_days),
            SortColumn::TotalBookings => a.total_bookings.cmp(&b.total_bookings),
            SortColumn::LifetimeSpend => compare_f64(a.lifetime_spend, b.lifetime_spend),
            SortColumn::Clv => compare_f64(a.clv, b.clv),
            SortColumn::Rfm => rfm_key(a).cmp(&rfm_key(b)),
        };
        match self.sort_direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

// Scores are finite by construction, but the view must not panic if a
// hand-edited snapshot smuggles a NaN through.
fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

fn rfm_key(scored: &ScoredCustomer) -> (u8, u8, u8) {
    (
        scored.rfm.recency(),
        scored.rfm.frequency(),
        scored.rfm.monetary(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use venue_core::types::{CustomerRecord, RfmCode};

    #[allow(clippy::too_many_arguments)]
    fn scored(
        id: &str,
        name: &str,
        email: &str,
        tags: &[&str],
        rfm: (u8, u8, u8),
        clv: f64,
        last_active_days: i64,
        total_bookings: u64,
        lifetime_spend: f64,
    ) -> ScoredCustomer {
        ScoredCustomer {
            customer: CustomerRecord {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                bookings: Vec::new(),
            },
            rfm: RfmCode::new(rfm.0, rfm.1, rfm.2),
            clv,
            last_active_days,
            total_bookings,
            lifetime_spend,
        }
    }

    fn batch() -> Vec<ScoredCustomer> {
        vec![
            scored(
                "cust-1",
                "Acacia Events",
                "hello@acacia-events.example.org",
                &["VIP"],
                (5, 5, 5),
                11_400.0,
                8,
                7,
                4_560.0,
            ),
            scored(
                "cust-2",
                "Beacon Theatre Co",
                "admin@beacontheatre.example.org",
                &["corporate"],
                (3, 2, 2),
                450.0,
                72,
                2,
                900.0,
            ),
            scored(
                "cust-3",
                "Coastal Rotary",
                "bookings@coastalrotary.example.org",
                &["NFP"],
                (2, 3, 2),
                1_050.0,
                147,
                3,
                1_050.0,
            ),
            scored(
                "cust-4",
                "Dawn Collective",
                "dawn@example.org",
                &[],
                (1, 1, 1),
                0.0,
                365,
                0,
                0.0,
            ),
        ]
    }

    fn view() -> DirectoryView {
        DirectoryView::new(batch(), &DirectoryConfig::default())
    }

    fn ids(rows: &[&ScoredCustomer]) -> Vec<String> {
        rows.iter().map(|s| s.customer.id.clone()).collect()
    }

    #[test]
    fn test_default_order_is_name_ascending() {
        let view = view();
        assert_eq!(ids(&view.rows()), ["cust-1", "cust-2", "cust-3", "cust-4"]);
    }

    #[test]
    fn test_search_matches_name_and_email() {
        let mut view = view();
        view.set_search(Some("BEACON"));
        assert_eq!(ids(&view.rows()), ["cust-2"]);

        view.set_search(Some("coastalrotary.example"));
        assert_eq!(ids(&view.rows()), ["cust-3"]);
    }

    #[test]
    fn test_blank_search_clears_filter() {
        let mut view = view();
        view.set_search(Some("beacon"));
        view.set_search(Some("   "));
        assert_eq!(view.rows().len(), 4);
        assert!(view.filter().search.is_none());
    }

    #[test]
    fn test_tag_filter_any_of_and_toggle() {
        let mut view = view();
        view.toggle_tag("vip");
        assert_eq!(ids(&view.rows()), ["cust-1"]);

        view.toggle_tag("NFP");
        assert_eq!(ids(&view.rows()), ["cust-1", "cust-3"]);

        view.toggle_tag("VIP");
        assert_eq!(ids(&view.rows()), ["cust-3"]);
    }

    #[test]
    fn test_sort_by_clv_and_flip() {
        let mut view = view();
        view.sort_by(SortColumn::Clv);
        assert_eq!(ids(&view.rows()), ["cust-4", "cust-2", "cust-3", "cust-1"]);

        view.sort_by(SortColumn::Clv);
        assert_eq!(
            view.sort_state(),
            (SortColumn::Clv, SortDirection::Descending)
        );
        assert_eq!(ids(&view.rows()), ["cust-1", "cust-3", "cust-2", "cust-4"]);
    }

    #[test]
    fn test_sort_by_rfm_code() {
        let mut view = view();
        view.sort_by(SortColumn::Rfm);
        assert_eq!(ids(&view.rows()), ["cust-4", "cust-3", "cust-2", "cust-1"]);
    }

    #[test]
    fn test_sort_by_last_active() {
        let mut view = view();
        view.sort_by(SortColumn::LastActive);
        assert_eq!(ids(&view.rows()), ["cust-1", "cust-2", "cust-3", "cust-4"]);
    }

    #[test]
    fn test_switching_column_resets_to_ascending() {
        let mut view = view();
        view.sort_by(SortColumn::Clv);
        view.sort_by(SortColumn::Clv);
        view.sort_by(SortColumn::TotalBookings);
        assert_eq!(
            view.sort_state(),
            (SortColumn::TotalBookings, SortDirection::Ascending)
        );
    }

    #[test]
    fn test_set_sort_overrides_toggle() {
        let mut view = view();
        view.set_sort(SortColumn::LifetimeSpend, SortDirection::Descending);
        assert_eq!(ids(&view.rows()), ["cust-1", "cust-3", "cust-2", "cust-4"]);
    }

    #[test]
    fn test_nan_score_does_not_panic() {
        let mut batch = batch();
        batch[1].clv = f64::NAN;
        let mut view = DirectoryView::new(batch, &DirectoryConfig::default());
        view.sort_by(SortColumn::Clv);
        assert_eq!(view.rows().len(), 4);
    }

    #[test]
    fn test_paging() {
        let config = DirectoryConfig { page_size: 2 };
        let view = DirectoryView::new(batch(), &config);

        assert_eq!(view.page_count(), 2);
        assert_eq!(ids(&view.page(0)), ["cust-1", "cust-2"]);
        assert_eq!(ids(&view.page(1)), ["cust-3", "cust-4"]);
        assert!(view.page(2).is_empty());
    }

    #[test]
    fn test_selection_survives_filtering() {
        let mut view = view();
        view.select(Some("cust-2"));
        view.toggle_tag("NFP");

        assert_eq!(ids(&view.rows()), ["cust-3"]);
        assert_eq!(view.selected().unwrap().customer.name, "Beacon Theatre Co");

        view.select(Some("no-such-id"));
        assert!(view.selected().is_none());
    }
}
