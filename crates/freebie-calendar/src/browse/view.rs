use super::criteria::{BrowseState, SortKey};
use super::predicate::matches;
use super::sort::sort_offers;
use crate::catalog::{Catalog, Offer};
use serde::Serialize;
use tracing::debug;

/// Result of running the explore screen's filters and sort over the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredView<'a> {
    pub offers: Vec<&'a Offer>,
    pub sort_by: SortKey,
    pub has_active_filters: bool,
    pub active_filter_count: usize,
    pub result_count: usize,
    pub total_count: usize,
}

impl<'a> FilteredView<'a> {
    pub fn compose(catalog: &'a Catalog, state: &BrowseState) -> Self {
        let matching: Vec<&Offer> = catalog
            .iter()
            .filter(|offer| matches(offer, &state.criteria))
            .collect();
        let offers = sort_offers(&matching, state.sort_by);

        debug!(
            matched = offers.len(),
            total = catalog.len(),
            sort = ?state.sort_by,
            "composed filtered view"
        );

        Self {
            result_count: offers.len(),
            total_count: catalog.len(),
            has_active_filters: state.criteria.has_active_filters(),
            active_filter_count: state.criteria.active_filter_count(),
            sort_by: state.sort_by,
            offers,
        }
    }

    /// Filters are active but nothing survived them.
    pub fn is_empty_due_to_filters(&self) -> bool {
        self.has_active_filters && self.result_count == 0
    }
}
