//! Error types for content providers.
//!
//! None of these are fatal: the orchestrator turns every one of them into an
//! empty result for the tier that failed.

use thiserror::Error;

/// Errors that can occur when talking to a content provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key / client credentials configured
    #[error("Missing credentials for {provider}")]
    MissingCredentials { provider: &'static str },

    /// Transport failure (connect, timeout, TLS, ...)
    #[error("HTTP error from {provider}: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status other than 401
    #[error("{provider} returned status {status}")]
    Status { provider: &'static str, status: u16 },

    /// The provider rejected our access token (HTTP 401)
    #[error("{provider} rejected the access token")]
    Unauthorized { provider: &'static str },

    /// Response body did not match the expected shape
    #[error("Failed to decode {provider} response: {reason}")]
    Decode { provider: &'static str, reason: String },
}

impl ProviderError {
    pub fn http(provider: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| ProviderError::Http { provider, source }
    }

    pub fn decode(provider: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |e| ProviderError::Decode {
            provider,
            reason: e.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ProviderError>;
