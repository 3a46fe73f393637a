//! Generic list-management view: fetch, search/filter, paginate, mutate, confirm.
//!
//! One `ListView<T, B>` is created per mounted list (products, blogs,
//! orders). The backend and the notification sink are passed in
//! explicitly. All mutations round-trip through the backend and are
//! followed by a full refetch; nothing is changed locally in place.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::backend::{Backend, FetchParams};
use crate::errors::AppError;
use crate::models::filter::FilterState;
use crate::models::listing::{Deliverable, ListingItem, Publishable};
use crate::models::notification::Notification;
use crate::models::pagination::{PageSize, PagedResult, Pagination};
use crate::services::confirmation::DeleteConfirmation;
use crate::services::countdown::{CountdownTicker, DEFAULT_TICK_PERIOD};
use crate::services::fetcher::{
    CollectionState, FetchOutcome, FetchResult, PendingFetch, ViewLifecycle,
};
use crate::services::filter::filtered_view;
use crate::services::mutation::{report, MutationKind, MutationOutcome, PendingMutation};
use crate::services::notifier::Notifier;
use crate::services::paginator::paginate;

/// What the list area should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    /// Nothing matches: render the "no items found" state.
    Empty,
    Ready,
}

pub struct ListView<T: ListingItem, B: Backend + Clone> {
    backend: B,
    notifier: Arc<dyn Notifier>,
    collection: CollectionState<T>,
    filter: FilterState<T::Filters>,
    pagination: Pagination,
    confirmation: DeleteConfirmation,
    ticker: Option<CountdownTicker>,
    tick_period: Duration,
    fetch_params: FetchParams,
    pending: Option<PendingMutation>,
}

impl<T: ListingItem, B: Backend + Clone> ListView<T, B> {
    pub fn new(backend: B, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            collection: CollectionState::default(),
            filter: FilterState::default(),
            pagination: Pagination::default(),
            confirmation: DeleteConfirmation::default(),
            ticker: None,
            tick_period: DEFAULT_TICK_PERIOD,
            fetch_params: T::fetch_params(),
            pending: None,
        }
    }

    /// Override the paging hints sent with the collection request.
    pub fn with_fetch_params(mut self, params: FetchParams) -> Self {
        self.fetch_params = params;
        self
    }

    /// Override the countdown tick period.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    // -- Lifecycle --

    /// Activate the view and load the collection.
    pub async fn mount(&mut self) -> FetchOutcome {
        self.collection.lifecycle().activate();
        self.refresh().await
    }

    /// Deactivate the view: in-flight results will be discarded, the
    /// collection is dropped and any open confirmation is closed.
    pub fn unmount(&mut self) {
        self.collection.lifecycle().deactivate();
        self.collection.discard();
        self.close_confirmation();
        self.filter = FilterState::default();
        self.pagination = Pagination::default();
        self.pending = None;
    }

    /// Handle that lets another task observe or end the view's lifetime.
    pub fn lifecycle(&self) -> ViewLifecycle {
        self.collection.lifecycle().clone()
    }

    pub fn is_active(&self) -> bool {
        self.collection.lifecycle().is_active()
    }

    // -- Fetching --

    /// Start a fetch; run the returned request and hand its result to
    /// [`ListView::complete_fetch`].
    pub fn begin_fetch(&mut self) -> PendingFetch<T, B> {
        self.collection
            .begin(self.backend.clone(), self.fetch_params.clone())
    }

    /// Apply a fetch result, notifying on failure.
    pub fn complete_fetch(&mut self, fetched: FetchResult<T>) -> FetchOutcome {
        let before = self.filtered_len();
        let outcome = self.collection.complete(fetched);
        match &outcome {
            FetchOutcome::Loaded(_) => {
                if self.filtered_len() != before {
                    self.pagination.reset();
                }
                let vanished = self
                    .confirmation
                    .target()
                    .is_some_and(|target| self.collection.find(target).is_none());
                if vanished {
                    tracing::debug!(collection = T::ENDPOINT, "Confirmation target no longer listed");
                    self.close_confirmation();
                }
            }
            FetchOutcome::Failed(e) => {
                let fallback = format!("Failed to load {}", T::ENDPOINT);
                self.notifier.notify(Notification::error(e.user_message(&fallback)));
            }
            FetchOutcome::Discarded => {}
        }
        outcome
    }

    /// Fetch and apply in one step. Also the manual reload path.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let pending = self.begin_fetch();
        let fetched = pending.run().await;
        self.complete_fetch(fetched)
    }

    // -- Read side --

    pub fn items(&self) -> &[T] {
        self.collection.items()
    }

    pub fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    pub fn filter_state(&self) -> &FilterState<T::Filters> {
        &self.filter
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Items passing the current query and filters, recomputed on each call.
    pub fn filtered(&self) -> Vec<&T> {
        filtered_view(self.collection.items(), &self.filter)
    }

    fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// The currently displayed page.
    pub fn page(&self) -> PagedResult<&T> {
        paginate(&self.filtered(), &self.pagination)
    }

    pub fn status(&self) -> ViewStatus {
        if self.collection.is_loading() {
            ViewStatus::Loading
        } else if self.filtered_len() == 0 {
            ViewStatus::Empty
        } else {
            ViewStatus::Ready
        }
    }

    // -- Filter and pagination inputs --

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.filter.query != query {
            self.filter.query = query;
            self.pagination.reset();
        }
    }

    pub fn set_filters(&mut self, filters: T::Filters) {
        if self.filter.filters != filters {
            self.filter.filters = filters;
            self.pagination.reset();
        }
    }

    /// Edit the categorical filters in place.
    pub fn update_filters(&mut self, edit: impl FnOnce(&mut T::Filters)) {
        let mut filters = self.filter.filters.clone();
        edit(&mut filters);
        self.set_filters(filters);
    }

    /// Restore the empty query and "all" filters.
    pub fn clear_filters(&mut self) {
        self.set_query(String::new());
        self.set_filters(T::Filters::default());
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        if self.pagination.page_size != page_size {
            self.pagination.page_size = page_size;
            self.pagination.reset();
        }
    }

    /// Request a page; out-of-range values are clamped when read.
    pub fn set_page(&mut self, page: i64) {
        self.pagination.page = page;
    }

    // -- Delete confirmation --

    pub fn confirmation(&self) -> &DeleteConfirmation {
        &self.confirmation
    }

    /// Open the delete confirmation for a listed item.
    pub fn open_delete(&mut self, id: &str) -> Result<(), AppError> {
        if self.collection.find(id).is_none() {
            return Err(AppError::InvalidState(format!(
                "No {} with id {id} in the list",
                T::NOUN
            )));
        }
        self.confirmation.open(T::DELETE_POLICY, id);
        self.ticker = self
            .confirmation
            .is_counting()
            .then(|| CountdownTicker::start(self.tick_period));
        Ok(())
    }

    /// Apply one countdown step without waiting on the clock.
    pub fn tick(&mut self) {
        self.confirmation.tick();
        if !self.confirmation.is_counting() {
            self.ticker = None;
        }
    }

    /// Wait for the next countdown tick and apply it.
    ///
    /// Returns `false` immediately when no countdown is running.
    pub async fn next_tick(&mut self) -> bool {
        let Some(ticker) = self.ticker.as_mut() else {
            return false;
        };
        ticker.tick().await;
        self.tick();
        true
    }

    /// Drive the countdown until confirm is enabled.
    pub async fn run_countdown(&mut self) {
        while self.next_tick().await {}
    }

    pub fn countdown_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Close the confirmation with no backend effect.
    pub fn cancel_delete(&mut self) {
        if let Some(target) = self.confirmation.target() {
            tracing::debug!(collection = T::ENDPOINT, id = target, "Delete cancelled");
        }
        self.close_confirmation();
    }

    fn close_confirmation(&mut self) {
        self.confirmation.cancel();
        self.ticker = None;
    }

    /// Issue the delete for the confirmed target.
    ///
    /// Inert while the confirmation is closed or still counting down. On
    /// failure the confirmation stays open with its target.
    pub async fn confirm_delete(&mut self) -> MutationOutcome {
        let target = match self.confirmation.confirmable_target() {
            Ok(target) => target.to_string(),
            Err(e) => {
                tracing::debug!(collection = T::ENDPOINT, error = %e, "Confirm ignored");
                return MutationOutcome::Rejected {
                    reason: e.to_string(),
                };
            }
        };

        let pending = PendingMutation {
            target,
            kind: MutationKind::Delete,
        };
        self.pending = Some(pending.clone());
        let result = self.backend.delete(T::ENDPOINT, &pending.target).await;

        let outcome = self.finish(&pending, result).await;
        if outcome.is_applied() {
            self.confirmation.complete();
            self.ticker = None;
        }
        outcome
    }

    // -- Other mutations --

    /// `POST` a new item and refetch on success.
    pub async fn create<P: Serialize + Sync>(&mut self, payload: &P) -> MutationOutcome {
        let pending = PendingMutation {
            target: String::new(),
            kind: MutationKind::Create,
        };
        self.pending = Some(pending.clone());
        let result = self.backend.create(T::ENDPOINT, payload).await;
        self.finish(&pending, result).await
    }

    pub fn pending_mutation(&self) -> Option<&PendingMutation> {
        self.pending.as_ref()
    }

    /// Report the outcome, then refetch strictly after a successful response.
    async fn finish(
        &mut self,
        pending: &PendingMutation,
        result: Result<(), AppError>,
    ) -> MutationOutcome {
        let failure = report(self.notifier.as_ref(), T::ENDPOINT, T::NOUN, pending, &result);

        if !self.is_active() {
            tracing::debug!(collection = T::ENDPOINT, id = %pending.target, "View unmounted before mutation completed");
            return MutationOutcome::Discarded;
        }
        self.pending = None;

        match failure {
            Some(message) => MutationOutcome::Failed { message },
            None => {
                self.refresh().await;
                MutationOutcome::Applied
            }
        }
    }

    fn rejected(&self, reason: String) -> MutationOutcome {
        tracing::debug!(collection = T::ENDPOINT, reason = %reason, "Mutation not issued");
        MutationOutcome::Rejected { reason }
    }
}

impl<T: Publishable, B: Backend + Clone> ListView<T, B> {
    /// Send the full item with its publish flag inverted.
    pub async fn toggle_publish(&mut self, id: &str) -> MutationOutcome {
        let Some(item) = self.collection.find(id) else {
            return self.rejected(format!("No {} with id {id} in the list", T::NOUN));
        };
        let publish = !item.is_published();
        let payload = item.with_published(publish);

        let pending = PendingMutation {
            target: id.to_string(),
            kind: MutationKind::TogglePublish(publish),
        };
        self.pending = Some(pending.clone());
        let result = self.backend.update(T::ENDPOINT, id, &payload).await;
        self.finish(&pending, result).await
    }
}

impl<T: Deliverable, B: Backend + Clone> ListView<T, B> {
    /// One-way transition to delivered.
    pub async fn mark_delivered(&mut self, id: &str) -> MutationOutcome {
        let Some(item) = self.collection.find(id) else {
            return self.rejected(format!("No {} with id {id} in the list", T::NOUN));
        };
        if item.is_delivered() {
            return self.rejected(format!("{} {id} is already delivered", T::NOUN));
        }

        let pending = PendingMutation {
            target: id.to_string(),
            kind: MutationKind::MarkDelivered,
        };
        self.pending = Some(pending.clone());
        let result = self
            .backend
            .transition(T::ENDPOINT, id, T::DELIVER_TRANSITION)
            .await;
        self.finish(&pending, result).await
    }
}
