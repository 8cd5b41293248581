//! Randomness source
//!
//! The ring draws one uniform sample in `[0, 1)` per fight. Production uses
//! random.org's plain-text decimal-fractions endpoint; tests and offline
//! runs use a scripted sequence.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

/// Default random.org query: one decimal fraction, two places, plain text
pub const DEFAULT_RANDOM_ORG_URL: &str =
    "https://www.random.org/decimal-fractions/?num=1&dec=2&col=1&format=plain&rnd=new";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Errors from a randomness source
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RandomError {
    #[error("Request to random.org timed out.")]
    Timeout,

    #[error("Request to random.org failed: {0}")]
    Transport(String),

    #[error("random.org returned HTTP {0}")]
    Status(u16),

    #[error("Invalid response from random.org: {0}")]
    Parse(String),

    #[error("Random value {0} is outside [0, 1)")]
    OutOfRange(f64),
}

pub type RandomResult<T> = Result<T, RandomError>;

/// Source of uniform samples in `[0, 1)`
#[async_trait]
pub trait RandomSource: Send + Sync {
    async fn sample(&self) -> RandomResult<f64>;
}

/// random.org client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomOrgConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for RandomOrgConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RANDOM_ORG_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RandomOrgConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("RANDOM_ORG_URL")
                .unwrap_or_else(|_| DEFAULT_RANDOM_ORG_URL.to_string()),
            timeout_secs: std::env::var("RANDOM_ORG_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// random.org HTTP client
pub struct RandomOrgClient {
    config: RandomOrgConfig,
    client: reqwest::Client,
}

impl RandomOrgClient {
    pub fn new(config: RandomOrgConfig) -> RandomResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RandomError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn from_env() -> RandomResult<Self> {
        Self::new(RandomOrgConfig::from_env())
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }
}

fn request_error(e: reqwest::Error) -> RandomError {
    if e.is_timeout() {
        error!("Request to random.org timed out");
        RandomError::Timeout
    } else {
        error!(error = %e, "Request to random.org failed");
        RandomError::Transport(e.to_string())
    }
}

/// Parse a plain-text sample and check it lies in `[0, 1)`
pub fn parse_sample(body: &str) -> RandomResult<f64> {
    let text = body.trim();
    let value: f64 = text.parse().map_err(|_| {
        error!(body = %text, "Invalid response from random.org");
        RandomError::Parse(text.to_string())
    })?;

    if !(0.0..1.0).contains(&value) {
        return Err(RandomError::OutOfRange(value));
    }
    Ok(value)
}

#[async_trait]
impl RandomSource for RandomOrgClient {
    async fn sample(&self) -> RandomResult<f64> {
        info!(url = %self.config.url, "Fetching random decimal");

        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, "random.org returned an error status");
            return Err(RandomError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(request_error)?;
        let value = parse_sample(&body)?;

        info!(value, "Received random decimal");
        Ok(value)
    }
}

/// Scripted randomness source
///
/// Replays queued samples and errors in order, then fails with a transport
/// error once the queue is drained.
#[derive(Default)]
pub struct SequenceRandom {
    queue: Mutex<VecDeque<RandomResult<f64>>>,
}

impl SequenceRandom {
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            queue: Mutex::new(samples.into_iter().map(Ok).collect()),
        }
    }

    pub fn push(&self, value: f64) {
        self.queue.lock().push_back(Ok(value));
    }

    pub fn push_error(&self, err: RandomError) {
        self.queue.lock().push_back(Err(err));
    }

    /// Samples and errors not yet consumed
    pub fn remaining(&self) -> usize {
        self.queue.lock().len()
    }
}

#[async_trait]
impl RandomSource for SequenceRandom {
    async fn sample(&self) -> RandomResult<f64> {
        self.queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RandomError::Transport("random sequence exhausted".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(url: String, timeout_secs: u64) -> RandomOrgClient {
        RandomOrgClient::new(RandomOrgConfig { url, timeout_secs }).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        assert_eq!(parse_sample("0.42\n").unwrap(), 0.42);
        assert_eq!(parse_sample(" 0 ").unwrap(), 0.0);
        assert_eq!(
            parse_sample("invalid").unwrap_err(),
            RandomError::Parse("invalid".to_string())
        );
        assert!(matches!(parse_sample("1.0"), Err(RandomError::OutOfRange(_))));
        assert!(matches!(parse_sample("-0.1"), Err(RandomError::OutOfRange(_))));
        assert!(matches!(parse_sample("NaN"), Err(RandomError::OutOfRange(_))));
    }

    #[test]
    fn test_default_config() {
        let config = RandomOrgConfig::default();
        assert!(config.url.starts_with("https://www.random.org/decimal-fractions/"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_sample_from_server() {
        let base = serve(Router::new().route("/", get(|| async { "0.73\n" }))).await;
        let value = client(format!("{}/", base), 5).sample().await.unwrap();
        assert_eq!(value, 0.73);
    }

    #[tokio::test]
    async fn test_invalid_body() {
        let base = serve(Router::new().route("/", get(|| async { "invalid_response" }))).await;
        let err = client(format!("{}/", base), 5).sample().await.unwrap_err();
        assert_eq!(err, RandomError::Parse("invalid_response".to_string()));
    }

    #[tokio::test]
    async fn test_error_status() {
        let base = serve(Router::new().route(
            "/",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        ))
        .await;
        let err = client(format!("{}/", base), 5).sample().await.unwrap_err();
        assert_eq!(err, RandomError::Status(503));
    }

    #[tokio::test]
    async fn test_timeout() {
        let base = serve(Router::new().route(
            "/",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "0.5"
            }),
        ))
        .await;
        let err = client(format!("{}/", base), 1).sample().await.unwrap_err();
        assert_eq!(err, RandomError::Timeout);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{}/", addr), 5).sample().await.unwrap_err();
        assert!(matches!(err, RandomError::Transport(_)));
    }

    #[tokio::test]
    async fn test_sequence_random() {
        let random = SequenceRandom::new([0.1, 0.9]);
        random.push_error(RandomError::Timeout);

        assert_eq!(random.sample().await.unwrap(), 0.1);
        assert_eq!(random.sample().await.unwrap(), 0.9);
        assert_eq!(random.sample().await.unwrap_err(), RandomError::Timeout);
        assert_eq!(random.remaining(), 0);
        assert!(matches!(random.sample().await, Err(RandomError::Transport(_))));
    }
}
