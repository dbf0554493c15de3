// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cloudflare Workers AI text generation over the REST API

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::WorkersAiConfig;
use super::generative::{GenerationError, TextGenerator};

/// Workers AI `ai/run` client
pub struct WorkersAiClient {
    client: Client,
    config: WorkersAiConfig,
}

impl WorkersAiClient {
    pub fn new(config: WorkersAiConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .user_agent(concat!("wiki-answer-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GenerationError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// `<base>/accounts/<account>/ai/run/<model>`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_id,
            self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    result: Option<RunResult>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

fn default_success() -> bool {
    true
}

impl RunResponse {
    fn into_text(self) -> Result<String, GenerationError> {
        if !self.success {
            let reason = self
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(GenerationError::Rejected(reason));
        }
        Ok(self.result.and_then(|r| r.response).unwrap_or_default())
    }
}

#[async_trait]
impl TextGenerator for WorkersAiClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        debug!(model = %self.config.model, max_tokens, "Workers AI request");

        let response = self
            .client
            .post(self.endpoint())
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.config.api_token.expose()),
            )
            .json(&RunRequest { prompt, max_tokens })
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::ApiError {
                status: status.as_u16(),
            });
        }

        let body: RunResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.without_url().to_string()))?;
        body.into_text()
    }

    fn name(&self) -> &'static str {
        "workers-ai"
    }
}
