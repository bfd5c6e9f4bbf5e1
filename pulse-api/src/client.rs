//! Fetch with cancellation and bounded retry.
//!
//! Each widget owns one [`PendingRequest`]; starting a new fetch aborts
//! whatever was in flight, and an aborted request resolves as
//! [`ApiError::Superseded`], a distinguishable outcome callers swallow
//! rather than display.

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::{AbortController, AbortSignal};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Http(u16),
    #[error("the summary is still being generated")]
    StillGenerating,
    #[error("unexpected response shape: {0}")]
    Decode(String),
    #[error("request superseded")]
    Superseded,
}

impl ApiError {
    /// Transient failures worth another attempt. Malformed payloads and
    /// superseded requests are terminal immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_) | ApiError::Http(_) | ApiError::StillGenerating
        )
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, ApiError::Superseded)
    }
}

/// Retry knobs: fixed inter-attempt delay, small fixed bound. No
/// exponential growth at this scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 2000,
        }
    }
}

/// Thin handle on the backend: base path plus the retry policy.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base: String,
    pub retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_retry(base, RetryPolicy::default())
    }

    pub fn with_retry(base: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            base: base.into(),
            retry,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// One GET, decoded. Abort is detected through the signal itself
    /// rather than by matching error strings.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
        signal: Option<&AbortSignal>,
    ) -> Result<T, ApiError> {
        let aborted = || signal.map(AbortSignal::aborted).unwrap_or(false);

        let request = Request::get(&self.url(path))
            .abort_signal(signal)
            .query(params.iter().map(|(key, value)| (*key, value.as_str())));

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                if aborted() {
                    return Err(ApiError::Superseded);
                }
                return Err(ApiError::Network(err.to_string()));
            }
        };

        if !response.ok() {
            return Err(ApiError::Http(response.status()));
        }

        match response.json::<T>().await {
            Ok(payload) => Ok(payload),
            Err(_) if aborted() => Err(ApiError::Superseded),
            Err(err) => Err(ApiError::Decode(err.to_string())),
        }
    }

    /// GET with the bounded retry loop. A decoded payload the `accept`
    /// predicate rejects (the summary's "still generating" marker) counts
    /// as a transient failure. `on_attempt(n, max)` fires before every
    /// attempt so the widget can show a counter between tries.
    pub async fn get_json_retry<T, A, P>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
        signal: Option<&AbortSignal>,
        accept: A,
        mut on_attempt: P,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        A: Fn(&T) -> bool,
        P: FnMut(u32, u32),
    {
        let RetryPolicy {
            max_attempts,
            delay_ms,
        } = self.retry;
        let max_attempts = max_attempts.max(1);
        let mut last_error = ApiError::StillGenerating;

        for attempt in 1..=max_attempts {
            on_attempt(attempt, max_attempts);
            match self.get_json::<T>(path, params, signal).await {
                Ok(payload) if accept(&payload) => return Ok(payload),
                Ok(_) => last_error = ApiError::StillGenerating,
                Err(err) if err.is_retryable() => last_error = err,
                Err(err) => return Err(err),
            }
            if attempt < max_attempts {
                TimeoutFuture::new(delay_ms).await;
                if signal.map(AbortSignal::aborted).unwrap_or(false) {
                    return Err(ApiError::Superseded);
                }
            }
        }
        Err(last_error)
    }
}

/// At most one live request per widget. `begin()` aborts the previous
/// request and arms a fresh signal for the next one; a completed request
/// leaves its spent controller behind until the next `begin()` replaces
/// it, since aborting an already-settled request is a no-op.
#[derive(Debug, Default)]
pub struct PendingRequest {
    controller: Option<AbortController>,
}

impl PendingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Option<AbortSignal> {
        self.cancel();
        match AbortController::new() {
            Ok(controller) => {
                let signal = controller.signal();
                self.controller = Some(controller);
                Some(signal)
            }
            // No AbortController: the request simply runs uncancellable.
            Err(_) => None,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(controller) = self.controller.take() {
            controller.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_ms, 2000);
    }

    #[test]
    fn test_error_classification() {
        assert!(ApiError::Network("offline".into()).is_retryable());
        assert!(ApiError::Http(503).is_retryable());
        assert!(ApiError::StillGenerating.is_retryable());
        assert!(!ApiError::Decode("expected a list".into()).is_retryable());
        assert!(!ApiError::Superseded.is_retryable());
        assert!(ApiError::Superseded.is_superseded());
    }

    #[test]
    fn test_client_url_joins_base_and_path() {
        let client = ApiClient::new("/api/v2");
        assert_eq!(client.url("/news/chart/"), "/api/v2/news/chart/");
    }
}
