//! Generation backend seam.
//!
//! One trait, two implementations selected by configuration: a mock backend
//! returning canned structures after a fixed latency, and a real backend
//! that wraps the (not yet implemented) network call in bounded
//! exponential-backoff retry. Call sites never branch on the mode.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use blueflame_core::error::CoreError;
use blueflame_core::prompts::PromptLibrary;
use serde_json::{json, Value};

/// Simulated API latency for mock calls.
const MOCK_LATENCY: Duration = Duration::from_millis(300);

/// A single stage-generation call against the Blue Flame service.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run one generation call for `prompt_key`, annotated with the tempo.
    async fn call(&self, prompt_key: &str, bpm: u16) -> Result<Value, CoreError>;
}

/// Select the backend implementation from configuration.
///
/// Fails fast with [`CoreError::Configuration`] when real mode is requested
/// without a credential, before any HTTP client exists.
pub fn build_backend(
    mock_mode: bool,
    prompts: Arc<PromptLibrary>,
) -> Result<Arc<dyn GenerationBackend>, CoreError> {
    if mock_mode {
        Ok(Arc::new(MockBackend::new(prompts)))
    } else {
        Ok(Arc::new(RealBackend::from_env()?))
    }
}

// ---------------------------------------------------------------------------
// Mock backend
// ---------------------------------------------------------------------------

/// Deterministic backend for demos and tests: fixed delay, canned response.
pub struct MockBackend {
    prompts: Arc<PromptLibrary>,
}

impl MockBackend {
    pub fn new(prompts: Arc<PromptLibrary>) -> Self {
        Self { prompts }
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn call(&self, prompt_key: &str, bpm: u16) -> Result<Value, CoreError> {
        tokio::time::sleep(MOCK_LATENCY).await;
        Ok(json!({
            "prompt": self.prompts.get(prompt_key),
            "tempo": bpm,
            "result": {
                "url": format!("/mock/{prompt_key}.bin"),
                "meta": { "bpm": bpm },
            },
        }))
    }
}

// ---------------------------------------------------------------------------
// Real backend
// ---------------------------------------------------------------------------

/// Tunable parameters for the call retry strategy.
#[derive(Debug)]
pub struct BackoffConfig {
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
    /// Total attempts before the last error is re-raised.
    pub max_attempts: u32,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            multiplier: 2.0,
            max_attempts: 5,
        }
    }
}

/// Calculate the next backoff delay from the current delay and config.
pub fn next_delay(current: Duration, config: &BackoffConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms)
}

/// Backend intended to call the actual Blue Flame generation service.
///
/// The request itself is not implemented in this codebase; [`call`] keeps
/// the retry contract and fails loudly after exhausting its attempts. A
/// real integration replaces [`send_request`](Self::send_request) with a
/// genuine `self.client` request and changes nothing else.
#[derive(Debug)]
pub struct RealBackend {
    client: reqwest::Client,
    api_key: String,
    backoff: BackoffConfig,
}

impl RealBackend {
    /// Build from the `BLUEFLAME_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_key(std::env::var("BLUEFLAME_API_KEY").ok())
    }

    /// Build from an explicit credential. `None` is a configuration error
    /// raised before any client is constructed or network attempt made.
    pub fn from_key(api_key: Option<String>) -> Result<Self, CoreError> {
        let api_key = api_key.ok_or_else(|| {
            CoreError::Configuration(
                "BLUEFLAME_API_KEY missing; set the variable or enable MOCK_MODE=true".into(),
            )
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            backoff: BackoffConfig::default(),
        })
    }

    /// The actual network request. Intentionally unimplemented.
    async fn send_request(&self, _prompt_key: &str, _bpm: u16) -> Result<Value, CoreError> {
        // Credential and client are in place for the eventual integration.
        let _ = (&self.client, &self.api_key);
        Err(CoreError::UnimplementedBackend(
            "real generation call is not implemented; run with MOCK_MODE=true".into(),
        ))
    }
}

#[async_trait]
impl GenerationBackend for RealBackend {
    async fn call(&self, prompt_key: &str, bpm: u16) -> Result<Value, CoreError> {
        let mut delay = self.backoff.initial_delay;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.send_request(prompt_key, bpm).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.backoff.max_attempts => {
                    tracing::error!(
                        prompt_key,
                        attempt,
                        error = %e,
                        "Generation call failed, attempts exhausted",
                    );
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(
                        prompt_key,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Generation call failed, retrying",
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay, &self.backoff);
                }
            }
        }
    }
}
