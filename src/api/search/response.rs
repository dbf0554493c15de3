// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer response types and composition

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::search::{extract_text, Article};
use crate::summary::Summarizer;

/// Excerpt length shown with each returned article
pub const DISPLAY_EXCERPT_CHARS: usize = 150;

/// Answer returned when the search matched nothing
pub const NO_RESULTS_ANSWER: &str = "I couldn't find any relevant articles in the knowledge base about your question. Could you try rephrasing it or asking about a different topic?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
}

/// Article reference as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub title: String,
    pub space: String,
    /// Absolute page URL
    pub url: String,
    pub excerpt: String,
}

/// Response body of the assistant endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    pub articles: Vec<ArticleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl AnswerPayload {
    /// Payload for an empty search result
    pub fn no_results() -> Self {
        Self {
            answer: NO_RESULTS_ANSWER.to_string(),
            articles: Vec::new(),
            confidence: Some(Confidence::Low),
        }
    }
}

impl ArticleSummary {
    pub fn from_article(article: &Article, domain: &str, excerpt_chars: usize) -> Self {
        Self {
            title: article.title.clone(),
            space: article.space_name.clone(),
            url: article.url(domain),
            excerpt: extract_text(&article.html_body, excerpt_chars),
        }
    }
}

/// Builds answer payloads from ranked articles
pub struct ResponseComposer {
    summarizer: Arc<dyn Summarizer>,
    excerpt_chars: usize,
}

impl ResponseComposer {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            summarizer,
            excerpt_chars: DISPLAY_EXCERPT_CHARS,
        }
    }

    pub fn summarizer_name(&self) -> &'static str {
        self.summarizer.name()
    }

    /// Compose the payload for `articles`, in ranked order
    ///
    /// The summarizer is never consulted for an empty list.
    pub async fn compose(&self, question: &str, articles: &[Article], domain: &str) -> AnswerPayload {
        if articles.is_empty() {
            return AnswerPayload::no_results();
        }

        debug!(
            "Summarizing {} articles with {}",
            articles.len(),
            self.summarizer.name()
        );
        let answer = self.summarizer.summarize(question, articles).await;

        AnswerPayload {
            answer,
            articles: articles
                .iter()
                .map(|a| ArticleSummary::from_article(a, domain, self.excerpt_chars))
                .collect(),
            confidence: Some(Confidence::High),
        }
    }
}
