//! Product Catalog Service Port
//!
//! Abstract interface for the remote search and detail lookups.

use async_trait::async_trait;

use crate::domain::entities::{Product, ProductSummary};
use crate::domain::errors::CatalogError;
use crate::domain::value_objects::ProductId;

/// Service interface for product lookups
///
/// Implementations live in adapter crates (e.g. `prodsearch-http`).
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Free-text search; ordering, filtering and paging are whatever the
    /// backend applies.
    async fn search(&self, query: &str) -> Result<Vec<ProductSummary>, CatalogError>;

    /// Fetch one product by identifier
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Backend name for log fields (e.g. "http")
    fn name(&self) -> &str;
}
