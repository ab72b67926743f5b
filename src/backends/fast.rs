// Fast backend: local model server (Ollama-style generate endpoint)

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{estimate_tokens, BackendResponse, ModelBackend};
use crate::config::FastBackendConfig;
use crate::errors::RouteError;
use crate::router::ModelKind;

/// Low-latency, locally hosted model reached over HTTP.
#[derive(Clone)]
pub struct FastBackend {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    /// Tokens consumed by the prompt, when the server reports them.
    prompt_eval_count: Option<u32>,
    /// Tokens generated, when the server reports them.
    eval_count: Option<u32>,
}

impl FastBackend {
    pub fn new(config: &FastBackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client for fast backend")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    fn timeout_error(&self) -> RouteError {
        RouteError::BackendTimeout {
            backend: ModelKind::Fast,
            timeout_secs: self.timeout.as_secs(),
        }
    }

    fn unavailable(&self, message: impl Into<String>) -> RouteError {
        RouteError::BackendUnavailable {
            backend: ModelKind::Fast,
            message: message.into(),
        }
    }
}

#[async_trait]
impl ModelBackend for FastBackend {
    async fn generate(&self, query: &str) -> Result<BackendResponse, RouteError> {
        let url = format!("{}/api/generate", self.base_url);
        let payload = GenerateRequest {
            model: &self.model,
            prompt: query,
            stream: false,
        };

        tracing::debug!(model = %self.model, %url, "Calling fast backend");
        let start = Instant::now();

        let send = self.client.post(&url).json(&payload).send();
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

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| self.unavailable(format!("invalid response body: {}", e)))?;

        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(latency_ms, "Fast backend responded");

        Ok(BackendResponse {
            input_tokens: generated
                .prompt_eval_count
                .unwrap_or_else(|| estimate_tokens(query)),
            output_tokens: generated
                .eval_count
                .unwrap_or_else(|| estimate_tokens(&generated.response)),
            text: generated.response,
            latency_ms,
        })
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Fast
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
