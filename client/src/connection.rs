use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use kanto_battle::Button;

use crate::bus::MemoryBus;
use crate::error::TransportError;

/// Default address of the emulator's HTTP scripting server
pub const DEFAULT_EMULATOR_URL: &str = "http://localhost:5000";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// How failed requests are retried before giving up
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(50),
            max_delay: Duration::from_millis(500),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Never retry
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    fn next_delay(&self, delay: Duration) -> Duration {
        Duration::from_secs_f64(delay.as_secs_f64() * self.backoff_multiplier).min(self.max_delay)
    }
}

/// Emulator driven through its HTTP scripting API.
///
/// Memory is read one byte per request; button taps are fire-and-forget
/// POSTs. Every request goes through the [`RetryPolicy`].
pub struct HttpEmulator {
    http: reqwest::Client,
    base_url: String,
    retry_policy: RetryPolicy,
}

impl HttpEmulator {
    /// Connect to the emulator at [`DEFAULT_EMULATOR_URL`]
    pub async fn connect_default() -> Result<Self> {
        Self::connect(DEFAULT_EMULATOR_URL).await
    }

    /// Connect and verify the server answers
    pub async fn connect(base_url: &str) -> Result<Self> {
        Self::connect_with_policy(base_url, RetryPolicy::default()).await
    }

    pub async fn connect_with_policy(base_url: &str, policy: RetryPolicy) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        let emulator = Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_policy: policy,
        };

        emulator
            .current_frame()
            .await
            .with_context(|| format!("Failed to connect to emulator at {}", base_url))?;

        tracing::info!(url = %emulator.base_url, "Connected to emulator");
        Ok(emulator)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the emulator currently answers a frame query
    pub async fn is_connected(&self) -> bool {
        self.http
            .get(self.url("/Core/CurrentFrame"))
            .timeout(CONNECT_TIMEOUT)
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }

    /// Frame counter of the running core
    pub async fn current_frame(&self) -> Result<u64, TransportError> {
        let endpoint = "/Core/CurrentFrame";
        let body = self.get(endpoint, &[]).await?;
        parse_number(endpoint, &body)
    }

    async fn read8(&self, address: u32) -> Result<u8, TransportError> {
        let endpoint = "/Core/Read8";
        let body = self
            .get(endpoint, &[("address", address.to_string())])
            .await?;
        parse_number(endpoint, &body)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String, TransportError> {
        self.with_retry(endpoint, move || async move {
            let response = self
                .http
                .get(self.url(endpoint))
                .query(query)
                .send()
                .await
                .map_err(|source| request_error(endpoint, source))?;
            check_status(endpoint, &response)?;
            response
                .text()
                .await
                .map_err(|source| request_error(endpoint, source))
        })
        .await
    }

    async fn post(&self, endpoint: &str, query: &[(&str, String)]) -> Result<(), TransportError> {
        self.with_retry(endpoint, move || async move {
            let response = self
                .http
                .post(self.url(endpoint))
                .query(query)
                .send()
                .await
                .map_err(|source| request_error(endpoint, source))?;
            check_status(endpoint, &response)
        })
        .await
    }

    async fn with_retry<T, F, Fut>(&self, endpoint: &str, mut request: F) -> Result<T, TransportError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let policy = &self.retry_policy;
        let mut delay = policy.initial_delay;
        let mut attempt = 1;

        loop {
            match request().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= policy.max_attempts => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        endpoint = endpoint,
                        attempt = attempt,
                        max_attempts = policy.max_attempts,
                        error = %e,
                        "Emulator request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    delay = policy.next_delay(delay);
                }
            }
        }
    }
}

#[async_trait]
impl MemoryBus for HttpEmulator {
    async fn read_bytes(&self, address: u32, length: usize) -> Result<Vec<u8>, TransportError> {
        let mut bytes = Vec::with_capacity(length);
        for offset in 0..length as u32 {
            bytes.push(self.read8(address.wrapping_add(offset)).await?);
        }
        Ok(bytes)
    }

    async fn press(&self, button: Button) -> Result<(), TransportError> {
        tracing::debug!(button = %button, "Tapping button");
        self.post("/Mgba-Http/Button/Tap", &[("button", button.as_str().to_string())])
            .await
    }
}

fn request_error(endpoint: &str, source: reqwest::Error) -> TransportError {
    TransportError::Request {
        endpoint: endpoint.to_string(),
        source,
    }
}

fn check_status(endpoint: &str, response: &reqwest::Response) -> Result<(), TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(TransportError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Parse a plain-text decimal response body
fn parse_number<T: std::str::FromStr>(endpoint: &str, body: &str) -> Result<T, TransportError> {
    body.trim()
        .parse()
        .map_err(|_| TransportError::InvalidResponse {
            endpoint: endpoint.to_string(),
            body: body.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u8>("/Core/Read8", "42\n").unwrap(), 42);
        assert_eq!(parse_number::<u64>("/Core/CurrentFrame", " 1234 ").unwrap(), 1234);

        let err = parse_number::<u8>("/Core/Read8", "256").unwrap_err();
        assert!(matches!(err, TransportError::InvalidResponse { .. }));
        assert!(parse_number::<u8>("/Core/Read8", "error").is_err());
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::default();
        let mut delay = policy.initial_delay;
        let mut delays = Vec::new();
        for _ in 0..5 {
            delays.push(delay);
            delay = policy.next_delay(delay);
        }
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(50),
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(400),
                Duration::from_millis(500),
            ]
        );
    }

    #[tokio::test]
    async fn test_connect_fails_without_server() {
        // Port 9 (discard) is not an HTTP server
        let result = HttpEmulator::connect_with_policy("http://127.0.0.1:9", RetryPolicy::none()).await;
        assert!(result.is_err());
    }
}
