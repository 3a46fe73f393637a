//! reqwest-backed implementation of [`Backend`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{AuthContext, Backend, CollectionPayload, FetchParams};
use crate::config::AppConfig;
use crate::errors::{AppError, ServerErrorBody};

/// HTTP client for the collections API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    auth: AuthContext,
}

impl HttpBackend {
    pub fn new(base_url: &str, auth: AuthContext, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid backend URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "Backend URL {base_url} cannot carry a path"
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let auth = match &config.api_token {
            Some(token) => AuthContext::bearer(token.clone()),
            None => AuthContext::anonymous(),
        };
        Self::new(&config.api_url, auth, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}` with each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Attach credentials, send, and turn non-2xx responses into [`AppError::Http`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let request = match &self.auth.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = ServerErrorBody::message_from(&body);
        tracing::debug!(status = %status, message = ?message, "Backend request failed");
        Err(AppError::Http { status, message })
    }
}

impl Backend for HttpBackend {
    async fn fetch<T>(&self, collection: &str, params: &FetchParams) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        let mut url = self.url(&[collection]);
        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            if let Some(page) = params.page {
                query.append_pair("page", &page.to_string());
            }
            if let Some(limit) = params.limit {
                query.append_pair("limit", &limit.to_string());
            }
        }

        let response = self.send(self.client.get(url)).await?;
        let body = response.text().await?;
        let payload: CollectionPayload<T> = serde_json::from_str(&body)?;
        Ok(payload.into_items())
    }

    async fn create<P>(&self, collection: &str, payload: &P) -> Result<(), AppError>
    where
        P: Serialize + Sync,
    {
        let url = self.url(&[collection]);
        self.send(self.client.post(url).json(payload)).await?;
        Ok(())
    }

    async fn update<P>(&self, collection: &str, id: &str, payload: &P) -> Result<(), AppError>
    where
        P: Serialize + Sync,
    {
        let url = self.url(&[collection, id]);
        self.send(self.client.put(url).json(payload)).await?;
        Ok(())
    }

    async fn transition(&self, collection: &str, id: &str, transition: &str) -> Result<(), AppError> {
        let url = self.url(&[collection, id, transition]);
        self.send(self.client.put(url)).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        let url = self.url(&[collection, id]);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
