//! Search Pipeline - Query edits in, observable search state out
//!
//! `SearchPipeline` owns the `SearchState` of one session and applies lookup
//! results to it. Every lookup is tagged with a generation number; a response
//! whose generation is no longer the latest never touches state.
//!
//! `DebouncedSearch` puts a `Debouncer` in front of the pipeline so that a
//! stream of keystrokes produces one search per quiet window.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::entities::{Product, ProductSummary, SearchState};
use crate::domain::errors::SearchError;
use crate::domain::value_objects::{ProductId, SearchPhase};
use crate::ports::ProductCatalog;
use crate::services::debounce::Debouncer;

/// What an input edit asks the caller to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEdit {
    /// Non-empty query: dispatch a lookup for it
    Dispatch(String),
    /// Query became empty: state is back to idle, nothing to look up
    Cleared,
}

/// Result of a lookup that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome<T> {
    /// The response was written to state
    Applied(T),
    /// A newer lookup (or a clear) happened first; state was left alone
    Superseded,
    /// No lookup was issued
    Skipped,
}

impl<T> LookupOutcome<T> {
    /// The applied value, if any
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            _ => None,
        }
    }
}

/// Query-to-result pipeline over a `ProductCatalog`
pub struct SearchPipeline<C: ProductCatalog + ?Sized> {
    catalog: Arc<C>,
    state: watch::Sender<SearchState>,
    search_generation: AtomicU64,
    detail_generation: AtomicU64,
}

impl<C: ProductCatalog + ?Sized> SearchPipeline<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            state: watch::Sender::new(SearchState::default()),
            search_generation: AtomicU64::new(0),
            detail_generation: AtomicU64::new(0),
        }
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Identifier of the nth entry of the current result set
    pub fn result_id(&self, index: usize) -> Option<ProductId> {
        self.state.borrow().results.get(index).map(|item| item.id)
    }

    /// Apply an input edit
    ///
    /// A shorter text clears the result set right away, even when a new
    /// lookup follows; a populated session drops back to idle. An empty text
    /// resets to idle and supersedes any search still in flight.
    pub fn edit_query(&self, text: impl Into<String>) -> QueryEdit {
        let text = text.into();

        self.state.send_modify(|state| {
            if text.chars().count() < state.query.chars().count() {
                state.results.clear();
                if state.phase == SearchPhase::Populated {
                    state.phase = SearchPhase::Idle;
                }
            }
            state.query.clone_from(&text);

            if text.is_empty() {
                self.search_generation.fetch_add(1, Ordering::SeqCst);
                state.results.clear();
                state.error = None;
                state.phase = SearchPhase::Idle;
            }
        });

        if text.is_empty() {
            QueryEdit::Cleared
        } else {
            QueryEdit::Dispatch(text)
        }
    }

    /// Explicit clear
    pub fn clear(&self) {
        self.edit_query(String::new());
    }

    /// Search for `query` and apply the response
    ///
    /// On failure the error indicator and result set are updated first, then
    /// the error is returned. An empty query issues no lookup and resets to
    /// idle.
    pub async fn search(
        &self,
        query: &str,
    ) -> Result<LookupOutcome<Vec<ProductSummary>>, SearchError> {
        if query.is_empty() {
            self.clear();
            return Ok(LookupOutcome::Skipped);
        }

        let Some(generation) = self.begin_search(query, false) else {
            return Ok(LookupOutcome::Skipped);
        };
        self.finish_search(query, generation).await
    }

    /// Search on behalf of the input stream
    ///
    /// Skipped when the session's query is no longer `query` (cleared, or a
    /// detail selection reset it) by the time the lookup would start.
    pub async fn run_dispatched(
        &self,
        query: &str,
    ) -> Result<LookupOutcome<Vec<ProductSummary>>, SearchError> {
        if query.is_empty() {
            return Ok(LookupOutcome::Skipped);
        }

        let Some(generation) = self.begin_search(query, true) else {
            debug!(query = %query, "Dispatched search no longer matches input, skipping");
            return Ok(LookupOutcome::Skipped);
        };
        self.finish_search(query, generation).await
    }

    fn begin_search(&self, query: &str, require_current: bool) -> Option<u64> {
        let mut generation = None;

        self.state.send_if_modified(|state| {
            if require_current && state.query != query {
                return false;
            }
            generation = Some(self.search_generation.fetch_add(1, Ordering::SeqCst) + 1);
            state.error = None;
            state.phase = SearchPhase::Pending;
            true
        });

        generation
    }

    async fn finish_search(
        &self,
        query: &str,
        generation: u64,
    ) -> Result<LookupOutcome<Vec<ProductSummary>>, SearchError> {
        debug!(
            query = %query,
            generation,
            catalog = self.catalog.name(),
            "Searching products"
        );

        match self.catalog.search(query).await {
            Ok(items) => {
                let applied = self.state.send_if_modified(|state| {
                    if !self.is_latest_search(generation) {
                        return false;
                    }
                    state.results.clone_from(&items);
                    state.phase = SearchPhase::Populated;
                    true
                });

                if applied {
                    debug!(query = %query, count = items.len(), "Search results applied");
                    Ok(LookupOutcome::Applied(items))
                } else {
                    debug!(query = %query, generation, "Discarding superseded search response");
                    Ok(LookupOutcome::Superseded)
                }
            }
            Err(source) => {
                let err = SearchError::SearchLookupFailed {
                    query: query.to_string(),
                    source,
                };

                let applied = self.state.send_if_modified(|state| {
                    if !self.is_latest_search(generation) {
                        return false;
                    }
                    state.error = Some(err.user_message().to_string());
                    state.results.clear();
                    state.phase = SearchPhase::Failed;
                    true
                });

                if !applied {
                    debug!(query = %query, generation, "Superseded search failed, state untouched");
                }
                Err(err)
            }
        }
    }

    /// Fetch one product's details and make it the selection
    ///
    /// On success the result set and query are cleared and any in-flight
    /// search is superseded. On failure the error indicator is set and the
    /// selection, result set and search phase are kept as they were.
    pub async fn select(&self, id: ProductId) -> Result<LookupOutcome<Product>, SearchError> {
        let generation = self.detail_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_if_modified(|state| {
            if state.error.take().is_none() {
                return false;
            }
            // A failed search has nothing left to show once its message goes
            if state.phase == SearchPhase::Failed {
                state.phase = SearchPhase::Idle;
            }
            true
        });

        debug!(id = %id, generation, catalog = self.catalog.name(), "Fetching product details");

        match self.catalog.product(id).await {
            Ok(product) => {
                let applied = self.state.send_if_modified(|state| {
                    if !self.is_latest_detail(generation) {
                        return false;
                    }
                    self.search_generation.fetch_add(1, Ordering::SeqCst);
                    state.selected = vec![product.clone()];
                    state.results.clear();
                    state.query.clear();
                    state.error = None;
                    state.phase = SearchPhase::Idle;
                    true
                });

                if applied {
                    Ok(LookupOutcome::Applied(product))
                } else {
                    debug!(id = %id, generation, "Discarding superseded detail response");
                    Ok(LookupOutcome::Superseded)
                }
            }
            Err(source) => {
                let err = SearchError::DetailLookupFailed { id, source };

                self.state.send_if_modified(|state| {
                    if !self.is_latest_detail(generation) {
                        return false;
                    }
                    state.error = Some(err.user_message().to_string());
                    true
                });

                Err(err)
            }
        }
    }

    fn is_latest_search(&self, generation: u64) -> bool {
        self.search_generation.load(Ordering::SeqCst) == generation
    }

    fn is_latest_detail(&self, generation: u64) -> bool {
        self.detail_generation.load(Ordering::SeqCst) == generation
    }
}

/// A `SearchPipeline` fed through a `Debouncer`
pub struct DebouncedSearch<C: ProductCatalog + ?Sized + 'static> {
    pipeline: Arc<SearchPipeline<C>>,
    debouncer: Debouncer<String>,
}

impl<C: ProductCatalog + ?Sized + 'static> DebouncedSearch<C> {
    /// Must be called inside a tokio runtime
    pub fn new(pipeline: Arc<SearchPipeline<C>>, delay: Duration) -> Self {
        let target = Arc::clone(&pipeline);
        let debouncer = Debouncer::new(delay, move |query: String| {
            let pipeline = Arc::clone(&target);
            async move {
                if let Err(err) = pipeline.run_dispatched(&query).await {
                    warn!(error = %err, "Debounced search failed");
                }
            }
        });

        Self {
            pipeline,
            debouncer,
        }
    }

    /// Handle one input edit
    pub fn input(&self, text: impl Into<String>) -> QueryEdit {
        let edit = self.pipeline.edit_query(text);
        match &edit {
            QueryEdit::Dispatch(query) => self.debouncer.call(query.clone()),
            QueryEdit::Cleared => self.debouncer.cancel(),
        }
        edit
    }

    /// Explicit clear
    pub fn clear(&self) {
        self.input(String::new());
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.pipeline.subscribe()
    }

    pub fn pipeline(&self) -> &Arc<SearchPipeline<C>> {
        &self.pipeline
    }
}
