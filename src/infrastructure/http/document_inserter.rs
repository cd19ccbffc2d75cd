//! HTTP document inserter

use super::rejection_message;
use crate::domain::repositories::{
    CollaboratorError, DocumentInserter, InsertRequest, InsertionReceipt,
};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Inserts images by `POST`ing the request as JSON
///
/// An empty or non-JSON success body yields an empty receipt.
#[derive(Debug, Clone)]
pub struct HttpDocumentInserter {
    client: reqwest::Client,
    endpoint: Url,
    request_timeout: Duration,
}

impl HttpDocumentInserter {
    pub fn new(client: reqwest::Client, endpoint: Url, request_timeout: Duration) -> Self {
        Self {
            client,
            endpoint,
            request_timeout,
        }
    }
}

#[async_trait]
impl DocumentInserter for HttpDocumentInserter {
    async fn insert(&self, request: InsertRequest) -> Result<InsertionReceipt, CollaboratorError> {
        tracing::debug!(endpoint = %self.endpoint, reference = %request.reference, "inserting image");

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

        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }
}
