// Capable backend: hosted inference API (Hugging Face style)

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{estimate_tokens, BackendResponse, ModelBackend};
use crate::config::CapableBackendConfig;
use crate::errors::RouteError;
use crate::router::ModelKind;

/// Higher-latency, remotely hosted model with stronger reasoning.
#[derive(Clone)]
pub struct CapableBackend {
    client: Client,
    api_url: String,
    api_key: String,
    max_tokens: u32,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

impl CapableBackend {
    pub fn new(config: &CapableBackendConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("Capable backend requires an API key")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client for capable backend")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    fn timeout_error(&self) -> RouteError {
        RouteError::BackendTimeout {
            backend: ModelKind::Capable,
            timeout_secs: self.timeout.as_secs(),
        }
    }

    fn unavailable(&self, message: impl Into<String>) -> RouteError {
        RouteError::BackendUnavailable {
            backend: ModelKind::Capable,
            message: message.into(),
        }
    }
}

#[async_trait]
impl ModelBackend for CapableBackend {
    async fn generate(&self, query: &str) -> Result<BackendResponse, RouteError> {
        let payload = json!({
            "inputs": query,
            "parameters": {
                "max_new_tokens": self.max_tokens,
                "return_full_text": false,
            },
            "options": {
                "wait_for_model": true,
            },
        });

        tracing::debug!(url = %self.api_url, "Calling capable backend");
        let start = Instant::now();

        let send = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send();
        let response = match tokio::time::timeout(self.timeout, send).await {
            Err(_) => return Err(self.timeout_error()),
            Ok(Err(e)) if e.is_timeout() => return Err(self.timeout_error()),
            Ok(Err(e)) => return Err(self.unavailable(e.to_string())),
            Ok(Ok(response)) => response,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.unavailable(format!("status {}: {}", status, body)));
        }

        // The inference API returns a one-element array of completions
        let completions: Vec<GeneratedText> = response
            .json()
            .await
            .map_err(|e| self.unavailable(format!("invalid response body: {}", e)))?;
        let text = completions
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or_else(|| self.unavailable("empty completion list"))?;

        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(latency_ms, "Capable backend responded");

        // The hosted API does not report usage; fall back to the shared
        // whitespace proxy so the counterfactual stays comparable.
        Ok(BackendResponse {
            input_tokens: estimate_tokens(query),
            output_tokens: estimate_tokens(&text),
            text,
            latency_ms,
        })
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Capable
    }

    fn model_name(&self) -> &str {
        &self.api_url
    }
}
