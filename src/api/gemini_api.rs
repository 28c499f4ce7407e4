use super::{TextGenerator, default_retry_policy};
use crate::config::Config;
use crate::error::{TutorError, upstream_error};
use crate::types::gemini::{GeminiResponse, GenerateContentRequest, Part};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use governor::DefaultDirectRateLimiter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Stateless-per-call Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiApi {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    retry_policy: ExponentialBuilder,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl GeminiApi {
    pub fn new(
        cfg: &Config,
        client: reqwest::Client,
        limiter: Arc<DefaultDirectRateLimiter>,
    ) -> Result<Self, TutorError> {
        let endpoint = cfg
            .gemini_base_url
            .join(&format!("models/{}:generateContent", cfg.gemini_model))?;
        Ok(Self {
            client,
            endpoint,
            api_key: cfg.gemini_api_key.clone(),
            retry_policy: default_retry_policy(),
            limiter,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn try_post(&self, body: &GenerateContentRequest) -> Result<GeminiResponse, TutorError> {
        self.limiter.until_ready().await;
        let resp = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(upstream_error(resp).await);
        }
        Ok(resp.json::<GeminiResponse>().await?)
    }
}

#[async_trait]
impl TextGenerator for GeminiApi {
    async fn generate_parts(&self, parts: Vec<Part>) -> Result<String, TutorError> {
        let body = GenerateContentRequest::user(parts);

        let resp = (|| async { self.try_post(&body).await })
            .retry(self.retry_policy)
            .when(|e: &TutorError| e.is_retryable())
            .notify(|err, dur: Duration| {
                warn!("Gemini retrying after error {}, sleeping {:?}", err, dur);
            })
            .await?;

        debug!(
            model_version = resp.modelVersion.as_deref().unwrap_or("-"),
            "Gemini generation finished"
        );
        resp.text().ok_or(TutorError::EmptyGeneration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{build_http_client, build_rate_limiter};

    #[test]
    fn endpoint_targets_configured_model() {
        let mut cfg = Config::default();
        cfg.gemini_model = "gemini-2.0-flash".into();
        let api = GeminiApi::new(
            &cfg,
            build_http_client(&cfg).unwrap(),
            build_rate_limiter(&cfg),
        )
        .unwrap();
        assert_eq!(
            api.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
