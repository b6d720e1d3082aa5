//! Prodsearch Core Library
//!
//! Domain types and the query-to-result pipeline behind a debounced
//! product search box.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and errors
//!   - `entities/`: Product, ProductSummary, SearchState
//!   - `value_objects/`: ProductId, SearchPhase
//!   - `errors/`: CatalogError, SearchError
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: ProductCatalog, the remote lookup interface
//!
//! - **Services** (`services/`): Runtime behaviour
//!   - `debounce`: Debouncer, one handle per debounced stream
//!   - `pipeline`: SearchPipeline and DebouncedSearch
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use prodsearch::{DebouncedSearch, SearchPipeline};
//!
//! let pipeline = Arc::new(SearchPipeline::new(Arc::new(catalog)));
//! let search = DebouncedSearch::new(pipeline, Duration::from_millis(500));
//! search.input("lap");
//! ```

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use domain::{
    CatalogError, Product, ProductId, ProductSummary, SearchError, SearchPhase, SearchState,
    DETAIL_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE,
};
pub use ports::ProductCatalog;
pub use services::{DebouncedSearch, Debouncer, LookupOutcome, QueryEdit, SearchPipeline};
