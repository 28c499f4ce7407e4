use super::{ChatCompleter, default_retry_policy};
use crate::config::Config;
use crate::error::{TutorError, upstream_error};
use crate::types::openrouter::{ChatCompletion, ChatRequest, ChatResponse};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use governor::DefaultDirectRateLimiter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// OpenAI-compatible chat client for the OpenRouter model router.
#[derive(Clone)]
pub struct OpenRouterApi {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    referer: String,
    title: String,
    retry_policy: ExponentialBuilder,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl OpenRouterApi {
    pub fn new(
        cfg: &Config,
        client: reqwest::Client,
        limiter: Arc<DefaultDirectRateLimiter>,
    ) -> Result<Self, TutorError> {
        Ok(Self {
            client,
            endpoint: cfg.openrouter_base_url.join("chat/completions")?,
            api_key: cfg.openrouter_api_key.clone(),
            referer: cfg.openrouter_referer.clone(),
            title: cfg.app_title.clone(),
            retry_policy: default_retry_policy(),
            limiter,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn try_post(&self, body: &ChatRequest<'_>) -> Result<ChatResponse, TutorError> {
        self.limiter.until_ready().await;
        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(upstream_error(resp).await);
        }
        Ok(resp.json::<ChatResponse>().await?)
    }
}

#[async_trait]
impl ChatCompleter for OpenRouterApi {
    async fn complete(&self, request: &ChatCompletion) -> Result<String, TutorError> {
        let body = ChatRequest::from(request);

        let resp = (|| async { self.try_post(&body).await })
            .retry(self.retry_policy)
            .when(|e: &TutorError| e.is_retryable())
            .notify(|err, dur: Duration| {
                warn!(
                    model = %request.model,
                    "OpenRouter retrying after error {}, sleeping {:?}", err, dur
                );
            })
            .await?;

        info!(model = %request.model, "OpenRouter completion finished");
        resp.into_text().ok_or(TutorError::EmptyGeneration)
    }
}
