// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer summarization
//!
//! Two interchangeable [`Summarizer`]s: a deterministic template and a
//! language-model summarizer that falls back to the template.

pub mod config;
pub mod generative;
pub mod prompt;
pub mod template;
pub mod workers_ai;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::search::Article;

pub use config::{SummaryConfig, SummaryStrategy, WorkersAiConfig};
pub use generative::{GenerationError, GenerativeSummarizer, TextGenerator};
pub use prompt::build_prompt;
pub use template::{Headline, TemplateSummarizer};
pub use workers_ai::WorkersAiClient;

/// Produces the `answer` text for a non-empty list of ranked articles
///
/// Infallible by contract: implementations absorb their own failures.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, question: &str, articles: &[Article]) -> String;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// Build the summarizer selected by `config`
pub fn build_summarizer(
    config: &SummaryConfig,
    preferred_space: Option<String>,
) -> Result<Arc<dyn Summarizer>, GenerationError> {
    let headline = match config.strategy {
        SummaryStrategy::Template => Headline::Short,
        SummaryStrategy::Generative => Headline::Conversational,
    };
    let template = TemplateSummarizer::new(preferred_space.clone(), config.summary_excerpt_chars)
        .with_headline(headline);

    match (config.strategy, &config.workers_ai) {
        (SummaryStrategy::Generative, Some(ai)) => {
            let generator = Arc::new(WorkersAiClient::new(ai.clone())?);
            info!("Generative summaries enabled (model {})", ai.model);
            Ok(Arc::new(GenerativeSummarizer::new(
                generator,
                template,
                preferred_space,
                config.prompt_excerpt_chars,
                config.max_tokens,
            )))
        }
        (SummaryStrategy::Generative, None) => {
            warn!("Generative summaries requested without CF_ACCOUNT_ID/CF_API_TOKEN, using template");
            Ok(Arc::new(template))
        }
        (SummaryStrategy::Template, _) => Ok(Arc::new(template)),
    }
}
