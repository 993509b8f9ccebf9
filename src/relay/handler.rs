//! Relay request handling with bounded retries
//!
//! Attempts are strictly sequential: the first 2xx response with a
//! non-empty body wins and no further attempts are made. Each failed
//! attempt records its error and waits a fixed delay before the next,
//! except after the final attempt.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::relay::fetcher::Fetcher;
use crate::relay::identity::IdentitySelector;

/// Successful relay payload returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct RelayOutcome {
    /// The upstream body, returned whole
    pub data: String,
    /// Byte length of the body
    pub length: usize,
    /// 1-based index of the attempt that succeeded
    pub attempt: u32,
}

/// Delay between failed attempts. Injectable so tests run without sleeping.
#[async_trait]
pub trait RetryDelay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Production delay backed by the tokio timer
pub struct TokioDelay;

#[async_trait]
impl RetryDelay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// No-op delay for deterministic tests
pub struct NoDelay;

#[async_trait]
impl RetryDelay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

/// Relay request handler
pub struct RelayHandler {
    fetcher: Fetcher,
    identities: Arc<dyn IdentitySelector>,
    delay: Arc<dyn RetryDelay>,
    config: RelayConfig,
}

impl RelayHandler {
    pub fn new(
        fetcher: Fetcher,
        identities: Arc<dyn IdentitySelector>,
        delay: Arc<dyn RetryDelay>,
        config: RelayConfig,
    ) -> Self {
        Self {
            fetcher,
            identities,
            delay,
            config,
        }
    }

    /// Fetch the target URL, retrying up to the configured bound
    #[instrument(skip(self, url))]
    pub async fn fetch_with_retries(&self, url: &str) -> Result<RelayOutcome> {
        info!("Fetching transcript from: {}...", truncate(url, 80));

        let max_attempts = self.config.max_attempts;
        let mut last_error: Option<RelayError> = None;

        for attempt in 1..=max_attempts {
            let identity = self.identities.select();
            debug!(
                "Attempt {}/{}, using identity: {}...",
                attempt,
                max_attempts,
                truncate(identity, 50)
            );

            match self.fetcher.fetch(url, identity).await {
                Ok(body) => {
                    info!("Attempt {}: received {} bytes", attempt, body.len());
                    return Ok(RelayOutcome {
                        length: body.len(),
                        data: body,
                        attempt,
                    });
                }
                Err(e) => {
                    warn!("Attempt {}/{} failed: {}", attempt, max_attempts, e);
                    last_error = Some(e);
                    if attempt < max_attempts {
                        self.delay.wait(self.config.retry_delay).await;
                    }
                }
            }
        }

        let last_error = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        error!(
            "All {} attempts failed. Last error: {}",
            max_attempts, last_error
        );

        Err(RelayError::Exhausted {
            attempts: max_attempts,
            last_error,
        })
    }
}

/// Truncate for log output without splitting a UTF-8 code point
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::identity::PinnedIdentity;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn spawn_upstream(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn test_handler(max_attempts: u32) -> RelayHandler {
        RelayHandler::new(
            Fetcher::new(Duration::from_secs(5)).unwrap(),
            Arc::new(PinnedIdentity(0)),
            Arc::new(NoDelay),
            RelayConfig {
                max_attempts,
                attempt_timeout: Duration::from_secs(5),
                retry_delay: Duration::from_millis(0),
            },
        )
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let addr = spawn_upstream(Router::new().route("/", get(|| async { "hello body" }))).await;

        let outcome = test_handler(3)
            .fetch_with_retries(&format!("http://{}/", addr))
            .await
            .unwrap();

        assert_eq!(outcome.attempt, 1);
        assert_eq!(outcome.data, "hello body");
        assert_eq!(outcome.length, "hello body".len());
    }

    #[tokio::test]
    async fn test_recovers_on_third_attempt() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/",
            get(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        (axum::http::StatusCode::SERVICE_UNAVAILABLE, "down").into_response()
                    } else {
                        "ok-body".into_response()
                    }
                }
            }),
        );
        let addr = spawn_upstream(router).await;

        let outcome = test_handler(3)
            .fetch_with_retries(&format!("http://{}/", addr))
            .await
            .unwrap();

        assert_eq!(outcome.attempt, 3);
        assert_eq!(outcome.data, "ok-body");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_last_status_error() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "broken")
                }
            }),
        );
        let addr = spawn_upstream(router).await;

        let result = test_handler(3)
            .fetch_with_retries(&format!("http://{}/", addr))
            .await;

        match result {
            Err(RelayError::Exhausted {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 3);
                assert_eq!(last_error, "HTTP 500");
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_body_is_retried_until_exhaustion() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    ""
                }
            }),
        );
        let addr = spawn_upstream(router).await;

        let result = test_handler(3)
            .fetch_with_retries(&format!("http://{}/", addr))
            .await;

        match result {
            Err(RelayError::Exhausted { last_error, .. }) => {
                assert_eq!(last_error, "Empty response");
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_transport_failure_exhausts_with_description() {
        let result = test_handler(2).fetch_with_retries("http://127.0.0.1:1/").await;

        match result {
            Err(RelayError::Exhausted {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 2);
                assert!(!last_error.is_empty());
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("héllo", 2), "hé");
    }
}
