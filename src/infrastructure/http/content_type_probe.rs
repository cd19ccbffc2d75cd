//! HEAD-request content type probe

use crate::domain::repositories::{ContentTypeProbe, ProbeError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

/// Probes remote images with a `HEAD` request
#[derive(Debug, Clone)]
pub struct ReqwestContentTypeProbe {
    client: reqwest::Client,
}

impl ReqwestContentTypeProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentTypeProbe for ReqwestContentTypeProbe {
    async fn content_type(&self, url: &Url) -> Result<Option<String>, ProbeError> {
        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::TimedOut
                } else {
                    ProbeError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        Ok(response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string))
    }
}
