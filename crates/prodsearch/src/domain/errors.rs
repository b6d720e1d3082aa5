//! Domain Errors
//!
//! Error types for catalog lookups and the search pipeline.

use thiserror::Error;

use crate::domain::value_objects::ProductId;

/// Message shown when a search lookup fails
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch products";

/// Message shown when a detail lookup fails
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to fetch product details";

/// Errors reported by a `ProductCatalog` backend
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Search pipeline errors
///
/// Every catalog failure is folded into one of two kinds; the underlying
/// cause is kept as the error source.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search lookup failed for '{query}': {source}")]
    SearchLookupFailed {
        query: String,
        #[source]
        source: CatalogError,
    },

    #[error("Detail lookup failed for product {id}: {source}")]
    DetailLookupFailed {
        id: ProductId,
        #[source]
        source: CatalogError,
    },
}

impl SearchError {
    /// The fixed message surfaced through the error indicator
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::SearchLookupFailed { .. } => SEARCH_FAILED_MESSAGE,
            Self::DetailLookupFailed { .. } => DETAIL_FAILED_MESSAGE,
        }
    }
}
