//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the search pipeline
//! reaches external systems.
//!
//! Implementations of these traits live in adapter crates.

pub mod services;

// Re-exports
pub use services::*;
