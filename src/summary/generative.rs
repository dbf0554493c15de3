// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Language-model answers with template fallback

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

use super::prompt::build_prompt;
use super::template::TemplateSummarizer;
use super::Summarizer;
use crate::search::Article;

/// Errors from a text-generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Request never got a response
    #[error("Generation request failed: {0}")]
    Request(String),

    /// Non-success HTTP status
    #[error("Generation API error: {status}")]
    ApiError { status: u16 },

    /// Backend answered but reported failure
    #[error("Generation rejected: {0}")]
    Rejected(String),

    /// Response body did not have the expected shape
    #[error("Invalid generation response: {0}")]
    InvalidResponse(String),
}

/// External text-generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt` within a `max_tokens` budget
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Summarizer that asks a [`TextGenerator`] and masks its failures
///
/// Any generation error, or blank output, yields exactly the text the
/// template summarizer would have produced.
pub struct GenerativeSummarizer {
    generator: Arc<dyn TextGenerator>,
    fallback: TemplateSummarizer,
    preferred_space: Option<String>,
    prompt_excerpt_chars: usize,
    max_tokens: u32,
}

impl GenerativeSummarizer {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        fallback: TemplateSummarizer,
        preferred_space: Option<String>,
        prompt_excerpt_chars: usize,
        max_tokens: u32,
    ) -> Self {
        Self {
            generator,
            fallback,
            preferred_space,
            prompt_excerpt_chars,
            max_tokens,
        }
    }
}

#[async_trait]
impl Summarizer for GenerativeSummarizer {
    async fn summarize(&self, question: &str, articles: &[Article]) -> String {
        let prompt = build_prompt(
            question,
            articles,
            self.preferred_space.as_deref(),
            self.prompt_excerpt_chars,
        );

        let start = Instant::now();
        match self.generator.generate(&prompt, self.max_tokens).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    "Generated answer with {} in {}ms",
                    self.generator.name(),
                    start.elapsed().as_millis()
                );
                text.trim().to_string()
            }
            Ok(_) => {
                warn!(
                    "{} returned no text, using template summary",
                    self.generator.name()
                );
                self.fallback.render(question, articles)
            }
            Err(e) => {
                warn!(
                    "{} generation failed: {}, using template summary",
                    self.generator.name(),
                    e
                );
                self.fallback.render(question, articles)
            }
        }
    }

    fn name(&self) -> &'static str {
        "generative"
    }
}
