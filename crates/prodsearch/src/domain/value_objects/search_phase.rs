//! SearchPhase - Lifecycle of a search session

use serde::{Deserialize, Serialize};

/// State machine position of a search session
///
/// Tracks the search flow only. Detail lookups report through
/// `SearchState::error` and leave the phase alone, except that clearing a
/// failed search's message at the start of a detail lookup returns it to
/// `Idle`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Empty query, nothing shown
    #[default]
    Idle,
    /// A search lookup is in flight
    Pending,
    /// The last search succeeded (the list may be empty)
    Populated,
    /// The last search failed; its result set is empty
    Failed,
}

