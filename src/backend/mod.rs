//! REST backend the list views consume.
//!
//! The surface is the conventional collection API:
//! - `GET    /{collection}` returning an array or `{ "items": [...] }`
//! - `POST   /{collection}`
//! - `PUT    /{collection}/{id}`
//! - `PUT    /{collection}/{id}/{transition}`
//! - `DELETE /{collection}/{id}`

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub mod http;
#[cfg(test)]
pub mod memory;

pub use http::HttpBackend;

/// Optional paging hints sent with a collection request.
///
/// The server may ignore them; the client never relies on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl FetchParams {
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.limit.is_none()
    }
}

/// Accepted response shapes for a collection request.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CollectionPayload<T> {
    Bare(Vec<T>),
    Wrapped { items: Vec<T> },
}

impl<T> CollectionPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { items } => items,
        }
    }
}

/// Credentials attached to every backend request.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub token: Option<String>,
}

impl AuthContext {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Operations the list views issue against the backend.
pub trait Backend: Send + Sync {
    /// Load a whole collection, preserving server order.
    fn fetch<T>(
        &self,
        collection: &str,
        params: &FetchParams,
    ) -> impl Future<Output = Result<Vec<T>, AppError>> + Send
    where
        T: DeserializeOwned + Send;

    fn create<P>(
        &self,
        collection: &str,
        payload: &P,
    ) -> impl Future<Output = Result<(), AppError>> + Send
    where
        P: Serialize + Sync;

    fn update<P>(
        &self,
        collection: &str,
        id: &str,
        payload: &P,
    ) -> impl Future<Output = Result<(), AppError>> + Send
    where
        P: Serialize + Sync;

    /// Dedicated state transition such as `PUT /orders/{id}/deliver`.
    fn transition(
        &self,
        collection: &str,
        id: &str,
        transition: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    fn delete(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}
