//! Remote collection fetching with loading state and stale-result discarding.
//!
//! A fetch is split into [`CollectionState::begin`], which hands out a
//! [`PendingFetch`], and [`CollectionState::complete`]. The request itself
//! runs without borrowing the view, so filter edits can interleave with it.
//! Results are dropped when the view was unmounted or a newer fetch was
//! issued in the meantime; in-flight requests are never aborted.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::backend::{Backend, FetchParams};
use crate::errors::AppError;
use crate::models::listing::ListingItem;

/// Shared "is this view still mounted" flag.
#[derive(Debug, Clone)]
pub struct ViewLifecycle {
    active: Arc<AtomicBool>,
}

impl Default for ViewLifecycle {
    fn default() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl ViewLifecycle {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn activate(&self) {
        self.active.store(true, Ordering::Release);
    }

    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }
}

/// Identifies one fetch; only the latest ticket may update the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// A collection request ready to run, detached from the view.
#[derive(Debug)]
pub struct PendingFetch<T, B> {
    ticket: FetchTicket,
    backend: B,
    params: FetchParams,
    _item: PhantomData<fn() -> T>,
}

impl<T: ListingItem, B: Backend> PendingFetch<T, B> {
    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    pub async fn run(self) -> FetchResult<T> {
        tracing::debug!(collection = T::ENDPOINT, params = ?self.params, "Fetching collection");
        let result = self.backend.fetch::<T>(T::ENDPOINT, &self.params).await;
        FetchResult {
            ticket: self.ticket,
            result,
        }
    }
}

/// Backend response for one ticket.
#[derive(Debug)]
pub struct FetchResult<T> {
    pub ticket: FetchTicket,
    pub result: Result<Vec<T>, AppError>,
}

/// What applying a fetch result did to the collection.
#[derive(Debug)]
pub enum FetchOutcome {
    Loaded(usize),
    Failed(AppError),
    Discarded,
}

impl FetchOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// The in-memory copy of a remote collection.
#[derive(Debug)]
pub struct CollectionState<T> {
    items: Vec<T>,
    loading: bool,
    generation: u64,
    lifecycle: ViewLifecycle,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            generation: 0,
            lifecycle: ViewLifecycle::default(),
        }
    }
}

impl<T: ListingItem> CollectionState<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn lifecycle(&self) -> &ViewLifecycle {
        &self.lifecycle
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Mark loading and issue a ticket superseding every earlier one.
    pub fn begin<B: Backend>(&mut self, backend: B, params: FetchParams) -> PendingFetch<T, B> {
        self.generation += 1;
        self.loading = true;
        PendingFetch {
            ticket: FetchTicket {
                generation: self.generation,
            },
            backend,
            params,
            _item: PhantomData,
        }
    }

    /// Apply a fetch result. On failure the previous items are kept.
    pub fn complete(&mut self, fetched: FetchResult<T>) -> FetchOutcome {
        if !self.lifecycle.is_active() {
            tracing::debug!(collection = T::ENDPOINT, "Discarding fetch result for unmounted view");
            return FetchOutcome::Discarded;
        }
        if fetched.ticket.generation != self.generation {
            tracing::debug!(collection = T::ENDPOINT, "Discarding superseded fetch result");
            return FetchOutcome::Discarded;
        }

        self.loading = false;
        match fetched.result {
            Ok(items) => {
                let count = items.len();
                self.items = items;
                tracing::debug!(collection = T::ENDPOINT, count, "Collection loaded");
                FetchOutcome::Loaded(count)
            }
            Err(e) => {
                tracing::warn!(collection = T::ENDPOINT, error = %e, "Collection fetch failed");
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Drop the collection; pending tickets become stale.
    pub fn discard(&mut self) {
        self.items.clear();
        self.loading = false;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;
    use crate::models::product::Product;
    use reqwest::StatusCode;
    use serde_json::json;

    fn products() -> Vec<Product> {
        serde_json::from_value(json!([
            { "_id": "p1", "name": "Oak Chair", "category": "Chairs" },
            { "_id": "p2", "name": "Walnut Table", "category": "Tables" },
        ]))
        .unwrap()
    }

    #[tokio::test]
    async fn loads_in_server_order() {
        let backend = MemoryBackend::new().with_items("products", &products());
        let mut state = CollectionState::<Product>::default();

        let pending = state.begin(backend.clone(), FetchParams::default());
        assert!(state.is_loading());

        let outcome = state.complete(pending.run().await);
        assert!(matches!(outcome, FetchOutcome::Loaded(2)));
        assert!(!state.is_loading());
        let ids: Vec<_> = state.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn failure_keeps_previous_items() {
        let backend = MemoryBackend::new().with_items("products", &products());
        let mut state = CollectionState::<Product>::default();
        let pending = state.begin(backend.clone(), FetchParams::default());
        state.complete(pending.run().await);

        backend.fail_next(
            crate::backend::memory::Op::Fetch,
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
        );
        let pending = state.begin(backend.clone(), FetchParams::default());
        let outcome = state.complete(pending.run().await);

        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert!(!state.is_loading());
        assert_eq!(state.items().len(), 2);
    }

    #[tokio::test]
    async fn superseded_result_is_discarded() {
        let backend = MemoryBackend::new().with_items("products", &products());
        let mut state = CollectionState::<Product>::default();

        let first = state.begin(backend.clone(), FetchParams::default());
        let second = state.begin(backend.clone(), FetchParams::default());

        let stale = first.run().await;
        assert!(matches!(state.complete(stale), FetchOutcome::Discarded));
        assert!(state.is_loading());

        assert!(state.complete(second.run().await).is_loaded());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn result_after_unmount_is_discarded() {
        let backend = MemoryBackend::new().with_items("products", &products());
        let mut state = CollectionState::<Product>::default();

        let pending = state.begin(backend.clone(), FetchParams::default());
        state.lifecycle().deactivate();

        assert!(matches!(state.complete(pending.run().await), FetchOutcome::Discarded));
        assert!(state.items().is_empty());
    }

    #[test]
    fn find_by_id() {
        let mut state = CollectionState::<Product>::default();
        state.items = products();
        assert_eq!(state.find("p2").map(|p| p.name.as_str()), Some("Walnut Table"));
        assert!(state.find("nope").is_none());
    }
}
