//! The `ListingItem` abstraction every list view is instantiated over.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::FetchParams;

/// How a delete confirmation becomes actionable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Confirm is enabled as soon as the dialog opens.
    Immediate,
    /// Confirm stays disabled for this many one-second ticks.
    Countdown(u32),
}

/// An entity of a remote collection.
pub trait ListingItem: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Entity-specific categorical filters.
    type Filters: Clone + Debug + Default + PartialEq + Send + Sync;

    /// Path segment of the collection on the backend, e.g. `"products"`.
    const ENDPOINT: &'static str;

    /// Singular noun used in notifications, e.g. `"product"`.
    const NOUN: &'static str;

    const DELETE_POLICY: DeletePolicy = DeletePolicy::Immediate;

    fn id(&self) -> &str;

    /// Fields the free-text query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether the item passes every active categorical filter.
    fn matches_filters(&self, filters: &Self::Filters) -> bool;

    /// Paging hints sent with the collection request.
    fn fetch_params() -> FetchParams {
        FetchParams::default()
    }
}

/// Items carrying a boolean publish flag that can be toggled.
pub trait Publishable: ListingItem {
    fn is_published(&self) -> bool;

    /// Copy of the item with only the publish flag changed.
    fn with_published(&self, published: bool) -> Self;
}

/// Items that support one-way state-transition endpoints.
pub trait Deliverable: ListingItem {
    /// Path segment appended to the item URL, e.g. `"deliver"`.
    const DELIVER_TRANSITION: &'static str = "deliver";

    fn is_delivered(&self) -> bool;
}
