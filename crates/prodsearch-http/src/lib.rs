//! HTTP Catalog Adapter for Prodsearch
//!
//! Implements the `ProductCatalog` port against a JSON product endpoint
//! exposing `GET /products?search=<text>` and `GET /products/<id>`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use prodsearch_http::{HttpCatalog, HttpCatalogConfig};
//!
//! let config = HttpCatalogConfig::new("https://example.test/api");
//! let catalog = HttpCatalog::new(config)?;
//! ```

mod catalog;
mod client;
mod config;

pub use catalog::HttpCatalog;
pub use config::{HttpCatalogConfig, DEFAULT_BASE_URL};
