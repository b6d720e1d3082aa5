//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod product_id;
mod search_phase;

pub use product_id::*;
pub use search_phase::*;
