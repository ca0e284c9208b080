//! Remote SDG classifier client with request pacing

use super::config::ClassifierConfig;
use super::models::{ClassificationResult, ClassifyReply, RemoteResponse};
use super::rate_limiter::{RateLimiter, RateLimiterConfig};
use crate::metrics::METRICS;
use reqwest::Client;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Classification error types
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Empty or whitespace-only input, rejected before any remote call
    #[error("no text provided")]
    EmptyInput,

    /// Network failure, non-2xx status, or unparseable response body
    #[error("classifier request failed: {0}")]
    Remote(String),
}

impl From<Result<ClassificationResult, ClassifyError>> for ClassifyReply {
    fn from(outcome: Result<ClassificationResult, ClassifyError>) -> Self {
        match outcome {
            Ok(data) => ClassifyReply::Ok { data },
            Err(ClassifyError::EmptyInput) => ClassifyReply::Declined {
                reason: ClassifyError::EmptyInput.to_string(),
            },
            Err(err @ ClassifyError::Remote(_)) => ClassifyReply::Error {
                message: err.to_string(),
            },
        }
    }
}

/// HTTP client for the remote SDG classifier.
///
/// Every call makes exactly one outbound POST, spaced by the shared rate
/// limiter; there are no retries.
pub struct ClassifierClient {
    http: Client,
    config: ClassifierConfig,
    limiter: RateLimiter,
}

impl ClassifierClient {
    /// Create a new classifier client
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifyError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClassifyError::Remote(e.to_string()))?;

        let limiter = RateLimiter::new(RateLimiterConfig {
            min_interval: config.rate_limit_interval(),
        });

        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    /// Classify a piece of text.
    ///
    /// Rejects empty input locally, waits out the rate-limit slot, then
    /// performs one POST and normalizes the response.
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifyError> {
        let start = Instant::now();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            METRICS.record_classify("declined");
            return Err(ClassifyError::EmptyInput);
        }

        self.wait_for_slot().await;

        let result = self.call_classify_api(trimmed).await;

        match &result {
            Ok(data) => {
                debug!("classification succeeded: {} predictions", data.predictions.len());
                METRICS.record_classify("success");
            }
            Err(e) => {
                error!("classification failed: {}", e);
                METRICS.record_classify("error");
            }
        }

        METRICS
            .classify_request_duration
            .observe(start.elapsed().as_secs_f64());

        result
    }

    /// Probe the remote endpoint through the same rate-limited path.
    ///
    /// The classification payload is not exposed to the caller.
    pub async fn test_connection(&self) -> Result<(), ClassifyError> {
        let probe = self.config.probe_text.clone();
        match self.classify(&probe).await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!("connection probe failed: {}", e);
                Err(e)
            }
        }
    }

    /// Sleep until this call's reserved dispatch slot opens
    async fn wait_for_slot(&self) {
        let delay = self.limiter.delay_from(Instant::now());

        if delay.is_zero() {
            METRICS.record_rate_limit(false);
        } else {
            METRICS.record_rate_limit(true);
            debug!("rate limit: delaying dispatch by {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }

    /// Call the remote classification API
    async fn call_classify_api(&self, text: &str) -> Result<ClassificationResult, ClassifyError> {
        debug!("calling classifier: {} chars", text.len());

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| ClassifyError::Remote(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClassifyError::Remote(format!(
                "Status {}: {}",
                status, error_text
            )));
        }

        let remote: RemoteResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Remote(e.to_string()))?;

        Ok(remote.into())
    }

    /// Maximum text length callers should submit
    pub fn max_text_len(&self) -> usize {
        self.config.max_text_len
    }
}
