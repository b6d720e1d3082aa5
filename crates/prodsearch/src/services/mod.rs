pub mod debounce;
pub mod pipeline;

// Re-exports
pub use debounce::Debouncer;
pub use pipeline::{DebouncedSearch, LookupOutcome, QueryEdit, SearchPipeline};
