// Shared request plumbing for the JSON feeds.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FetchError;

/// Build a reqwest client with the given user agent and per-request timeout.
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(FetchError::ClientBuild)
}

/// GET `url` and decode the JSON body.
///
/// `endpoint` is a short human-readable name used in errors and logs.
/// Non-2xx responses become `FetchError::Status` with the reason phrase.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    endpoint: &str,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, FetchError> {
    debug!(endpoint, url, "GET");

    let response = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| FetchError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

    debug!(endpoint, bytes = body.len(), "response received");

    serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
