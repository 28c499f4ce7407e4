//! Outbound clients for the hosted model and speech services.
//!
//! Each service sits behind a small trait so the pipelines can be driven by
//! scripted fakes in tests.

pub mod gemini_api;
pub mod openrouter_api;
pub mod speech_api;

use crate::config::Config;
use crate::error::TutorError;
use crate::types::gemini::Part;
use crate::types::openrouter::ChatCompletion;
use async_trait::async_trait;
use backon::ExponentialBuilder;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub use gemini_api::GeminiApi;
pub use openrouter_api::OpenRouterApi;
pub use speech_api::{ElevenLabsSpeech, GoogleTranslateSpeech};

/// Single-prompt text generation (Gemini).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, TutorError> {
        self.generate_parts(vec![Part::text(prompt)]).await
    }

    async fn generate_parts(&self, parts: Vec<Part>) -> Result<String, TutorError>;
}

/// System + user chat completion against a named model (OpenRouter).
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete(&self, request: &ChatCompletion) -> Result<String, TutorError>;
}

/// Narrate `text` into an audio file at `out`.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, out: &Path) -> Result<PathBuf, TutorError>;
}

pub fn default_retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(8))
        .with_max_times(3)
        .with_jitter()
}

/// Shared HTTP client for every outbound call.
pub fn build_http_client(cfg: &Config) -> Result<reqwest::Client, TutorError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(format!("math-tutor/{}", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        // Long generations and speech synthesis regularly take over a minute.
        .timeout(Duration::from_secs(300));
    if let Some(proxy_url) = cfg.proxy.as_ref() {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }
    Ok(builder.build()?)
}

/// Outbound request budget shared by the model clients.
pub fn build_rate_limiter(cfg: &Config) -> Arc<DefaultDirectRateLimiter> {
    let per_minute = NonZeroU32::new(cfg.requests_per_minute).unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)))
}
