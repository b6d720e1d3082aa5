//! Service Ports
//!
//! Abstract interfaces for external services.

mod catalog;

pub use catalog::*;
