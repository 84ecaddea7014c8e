//! HTTP client for the organization's REST backend.
//!
//! The backend wraps several response shapes around its payloads depending
//! on the controller that produced them; [`envelope::Envelope`] normalizes
//! all of them to one concrete type at this boundary so the workflows never
//! see raw JSON.

mod envelope;
mod health;

pub use envelope::Envelope;
pub use health::{ConnectivityProbe, HealthMonitor};

use crate::config::BackendConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Thin JSON client bound to the backend's base URL.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(path, response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        // An empty 2xx body decodes as JSON null.
        let slice: &[u8] = if bytes.is_empty() { b"null" } else { bytes.as_ref() };
        let envelope: Envelope<T> = serde_json::from_slice(slice)?;
        Ok(envelope.into_inner())
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned status {status} for {path}")]
    Status { status: u16, path: String },
    #[error("unable to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}
