//! HTTP asset uploader
//!
//! `POST`s the upload request as JSON. The service answers with the asset
//! id and, when storage is asynchronous, a status URL that is polled until
//! it reports `{"stored": true}`.

use super::rejection_message;
use crate::domain::repositories::{AssetHandle, AssetUploader, CollaboratorError, UploadRequest};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
    #[serde(default)]
    status_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StoreStatus {
    #[serde(default)]
    stored: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Uploads assets to a JSON endpoint
#[derive(Debug, Clone)]
pub struct HttpAssetUploader {
    client: reqwest::Client,
    endpoint: Url,
    request_timeout: Duration,
    poll_interval: Duration,
    poll_attempts: u32,
}

impl HttpAssetUploader {
    pub fn new(client: reqwest::Client, endpoint: Url, request_timeout: Duration) -> Self {
        Self {
            client,
            endpoint,
            request_timeout,
            poll_interval: Duration::from_millis(500),
            poll_attempts: 20,
        }
    }

    /// Sets how often and how many times the storage status is polled
    pub fn with_store_polling(mut self, interval: Duration, attempts: u32) -> Self {
        self.poll_interval = interval;
        self.poll_attempts = attempts.max(1);
        self
    }
}

#[async_trait]
impl AssetUploader for HttpAssetUploader {
    async fn upload(
        &self,
        request: UploadRequest,
    ) -> Result<Box<dyn AssetHandle>, CollaboratorError> {
        tracing::debug!(endpoint = %self.endpoint, mime = %request.mime_type, "uploading asset");

        let response = self
            .client
            .post(self.endpoint.clone())
            .timeout(self.request_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| CollaboratorError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| CollaboratorError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(CollaboratorError::Rejected(rejection_message(status, &body)));
        }

        let parsed: UploadResponse = serde_json::from_slice(&body).map_err(|e| {
            CollaboratorError::Rejected(format!("Unexpected upload response: {e}"))
        })?;

        let status_url = parsed
            .status_url
            .map(|raw| {
                self.endpoint.join(&raw).map_err(|e| {
                    CollaboratorError::Rejected(format!("Invalid status URL '{raw}': {e}"))
                })
            })
            .transpose()?;

        Ok(Box::new(HttpAssetHandle {
            client: self.client.clone(),
            id: parsed.id,
            status_url,
            request_timeout: self.request_timeout,
            poll_interval: self.poll_interval,
            poll_attempts: self.poll_attempts,
        }))
    }
}

/// Handle to an asset accepted by [`HttpAssetUploader`]
#[derive(Debug, Clone)]
pub struct HttpAssetHandle {
    client: reqwest::Client,
    id: String,
    /// `None` when the service stores synchronously
    status_url: Option<Url>,
    request_timeout: Duration,
    poll_interval: Duration,
    poll_attempts: u32,
}

impl HttpAssetHandle {
    async fn poll_once(&self, url: &Url) -> Result<StoreStatus, CollaboratorError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| CollaboratorError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| CollaboratorError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(CollaboratorError::Rejected(rejection_message(status, &body)));
        }
        serde_json::from_slice(&body)
            .map_err(|e| CollaboratorError::Rejected(format!("Unexpected status response: {e}")))
    }
}

#[async_trait]
impl AssetHandle for HttpAssetHandle {
    fn reference_id(&self) -> &str {
        &self.id
    }

    async fn wait_until_stored(&self) -> Result<(), CollaboratorError> {
        let Some(url) = &self.status_url else {
            return Ok(());
        };

        for poll in 1..=self.poll_attempts {
            let status = self.poll_once(url).await?;
            if let Some(error) = status.error {
                return Err(CollaboratorError::Rejected(error));
            }
            if status.stored {
                tracing::debug!(id = %self.id, poll, "asset stored");
                return Ok(());
            }
            tracing::trace!(id = %self.id, poll, "asset not stored yet");
            tokio::time::sleep(self.poll_interval).await;
        }

        Err(CollaboratorError::Rejected(format!(
            "Asset {} was not confirmed as stored after {} checks",
            self.id, self.poll_attempts
        )))
    }
}
