//! Lazily fetched, shared access token.
//!
//! The cache holds at most one token. It is fetched on first use, reused by
//! every later call and invalidated when the remote side answers 401, after
//! which exactly one refetch and retry happens.

use crate::error::{ProviderError, Result};
use std::future::Future;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct TokenCache {
    token: Mutex<Option<String>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, fetching one if the cache is empty.
    ///
    /// The lock is held across the fetch, so concurrent callers on a cold
    /// cache trigger a single request.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }

        debug!("Access token cache is empty, fetching a new token");
        let token = fetch().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Forget the cached token
    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
    }

    pub async fn is_cached(&self) -> bool {
        self.token.lock().await.is_some()
    }

    /// Run `call` with a token; on `Unauthorized` invalidate, refetch once and retry once.
    pub async fn call_with_retry<T, F, Fut, C, CFut>(&self, fetch: F, call: C) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<String>>,
        C: Fn(String) -> CFut,
        CFut: Future<Output = Result<T>>,
    {
        let token = self.get_or_fetch(&fetch).await?;

        match call(token).await {
            Err(ProviderError::Unauthorized { provider }) => {
                warn!(provider, "Access token rejected, refreshing once");
                self.invalidate().await;
                let token = self.get_or_fetch(&fetch).await?;
                call(token).await
            }
            other => other,
        }
    }
}
