//! Shared HTTP client

use crate::config::PipelineConfig;

/// Builds the client used by every adapter
///
/// No global timeout is set: the content type probe stays unbounded unless
/// configured, and collaborator calls set `request_timeout` per request.
pub fn build_client(config: &PipelineConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
}
