// Provider transport errors and the shared HTTP client
use reqwest::{header::{HeaderMap, HeaderValue, ACCEPT}, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{endpoint} returned error status: {status}")]
    Status { endpoint: String, status: StatusCode },
    #[error("API error: {message}")]
    Api { message: String },
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Blocking-style client: one request, bounded by `timeout`, no retries.
pub fn build_http_client(timeout: Duration) -> Result<Client, ProviderError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .default_headers(headers)
        .user_agent(concat!("ais-snapshot/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;

    Ok(client)
}

/// Send `request` and decode a successful body as JSON.
pub async fn get_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
    endpoint: &str,
) -> Result<T, ProviderError> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            endpoint: endpoint.to_string(),
            status,
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| ProviderError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
