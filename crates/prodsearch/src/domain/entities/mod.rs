//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Product / ProductSummary: catalog records returned by lookups
//! - SearchState: the observable state a search session exposes

mod product;
mod search_state;

pub use product::*;
pub use search_state::*;
