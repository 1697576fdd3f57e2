// Shared HTTP client utilities

use anyhow::Result;
use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// User-Agent string for all HTTP requests
const USER_AGENT: &str = concat!("hatchery/", env!("CARGO_PKG_VERSION"));

/// Build the connection-pooled client shared by every fetcher of a pipeline.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;
    Ok(client)
}

/// Send a request and deserialize the JSON body.
///
/// Any non-success status yields `None`; transport failures, timeouts and
/// undecodable bodies are errors.
pub async fn fetch_json_optional<T: DeserializeOwned>(request: RequestBuilder) -> Result<Option<T>> {
    let response: Response = request.send().await?;

    if !response.status().is_success() {
        debug!(
            "Upstream returned {} for {}",
            response.status(),
            response.url()
        );
        return Ok(None);
    }

    let url = response.url().to_string();
    let result = response
        .json()
        .await
        .map_err(|e| anyhow::anyhow!("Invalid JSON from {}: {}", url, e))?;
    Ok(Some(result))
}
