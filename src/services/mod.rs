//! List-management services: fetch, filter, paginate, confirm, mutate.

pub mod confirmation;
pub mod countdown;
pub mod fetcher;
pub mod filter;
pub mod list_view;
pub mod mutation;
pub mod notifier;
pub mod paginator;
