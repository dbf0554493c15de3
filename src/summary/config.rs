// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for answer summarization

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::config::Secret;

pub const DEFAULT_AI_MODEL: &str = "@cf/meta/llama-3-8b-instruct";
pub const DEFAULT_AI_API_BASE: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
/// Excerpt length inside the template answer text
pub const SUMMARY_EXCERPT_CHARS: usize = 200;
/// Excerpt length of each article in the generation prompt
pub const PROMPT_EXCERPT_CHARS: usize = 500;

/// How the `answer` text is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryStrategy {
    /// Deterministic text built from the ranked articles
    Template,
    /// Language-model answer, template text when generation fails
    Generative,
}

impl FromStr for SummaryStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(SummaryStrategy::Template),
            "generative" | "ai" => Ok(SummaryStrategy::Generative),
            other => Err(format!("Unknown summary strategy: {}", other)),
        }
    }
}

impl fmt::Display for SummaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryStrategy::Template => f.write_str("template"),
            SummaryStrategy::Generative => f.write_str("generative"),
        }
    }
}

/// Workers AI account binding
#[derive(Debug, Clone)]
pub struct WorkersAiConfig {
    pub account_id: String,
    pub api_token: Secret,
    pub api_base: String,
    pub model: String,
}

/// Configuration for summarization
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub strategy: SummaryStrategy,
    /// Present only when both account id and token are set
    pub workers_ai: Option<WorkersAiConfig>,
    /// Generated-token budget per answer
    pub max_tokens: u32,
    pub summary_excerpt_chars: usize,
    pub prompt_excerpt_chars: usize,
    /// Unparseable `SUMMARY_STRATEGY` value, rejected by `validate()`
    pub invalid_strategy: Option<String>,
}

impl SummaryConfig {
    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let workers_ai = match (get("CF_ACCOUNT_ID"), get("CF_API_TOKEN")) {
            (Some(account_id), Some(token)) => Some(WorkersAiConfig {
                account_id,
                api_token: Secret::new(token),
                api_base: get("CF_API_BASE").unwrap_or_else(|| DEFAULT_AI_API_BASE.to_string()),
                model: get("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            }),
            _ => None,
        };

        let (strategy, invalid_strategy) = match get("SUMMARY_STRATEGY") {
            Some(raw) => match raw.parse() {
                Ok(strategy) => (strategy, None),
                Err(_) => {
                    warn!("Ignoring unknown SUMMARY_STRATEGY {:?}", raw);
                    (defaults.strategy, Some(raw))
                }
            },
            None => (defaults.strategy, None),
        };

        Self {
            strategy,
            workers_ai,
            max_tokens: get("AI_MAX_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_tokens),
            summary_excerpt_chars: defaults.summary_excerpt_chars,
            prompt_excerpt_chars: defaults.prompt_excerpt_chars,
            invalid_strategy,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(raw) = &self.invalid_strategy {
            return Err(format!(
                "Invalid SUMMARY_STRATEGY {:?} (expected \"template\" or \"generative\")",
                raw
            ));
        }
        if self.max_tokens == 0 {
            return Err("AI max tokens must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Strategy that can actually run with this configuration
    ///
    /// Generative summarization without a Workers AI binding falls back to
    /// the template strategy.
    pub fn effective_strategy(&self) -> SummaryStrategy {
        match (self.strategy, &self.workers_ai) {
            (SummaryStrategy::Generative, None) => SummaryStrategy::Template,
            (strategy, _) => strategy,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            strategy: SummaryStrategy::Template,
            workers_ai: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            summary_excerpt_chars: SUMMARY_EXCERPT_CHARS,
            prompt_excerpt_chars: PROMPT_EXCERPT_CHARS,
            invalid_strategy: None,
        }
    }
}
