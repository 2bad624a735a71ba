//! Shared HTTP plumbing for the remote providers.

use crate::error::{ProviderError, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build a client with a per-request timeout
pub(crate) fn build_client(provider: &'static str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ProviderError::http(provider))
}

/// Map the response status onto our error type, then decode the JSON body
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &'static str,
    response: Response,
) -> Result<T> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(ProviderError::Unauthorized { provider });
    }
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    response.json().await.map_err(ProviderError::decode(provider))
}

pub(crate) fn trim_base_url(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}
