//! SearchState - Observable state of one search session

use serde::Serialize;

use super::{Product, ProductSummary};
use crate::domain::value_objects::SearchPhase;

/// Snapshot of a search session
///
/// `error` is set if and only if the most recent lookup failed. `selected`
/// holds at most one product, the last successful detail lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    /// Current input text; empty means no active search
    pub query: String,
    /// Result set of the latest applied search, replaced wholesale
    pub results: Vec<ProductSummary>,
    /// User-facing message of the last failed lookup
    pub error: Option<String>,
    /// Selected-item holder
    pub selected: Vec<Product>,
    /// Where the session is in the search lifecycle
    pub phase: SearchPhase,
}

impl SearchState {
    /// True when nothing is being searched and nothing is shown
    pub fn is_idle(&self) -> bool {
        self.phase == SearchPhase::Idle && self.results.is_empty() && self.error.is_none()
    }

    /// The selected product, if a detail lookup has succeeded
    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.first()
    }
}
