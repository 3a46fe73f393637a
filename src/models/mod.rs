//! Collection entities, filter state, pagination and notification types.

pub mod blog;
pub mod filter;
pub mod listing;
pub mod notification;
pub mod order;
pub mod pagination;
pub mod product;
