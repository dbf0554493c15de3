// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Deterministic answer text built from the ranked articles

use async_trait::async_trait;
use std::fmt::Write;

use super::Summarizer;
use crate::search::{extract_text, Article};

/// Layout of the opening sentence and the preferred-space callout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Headline {
    /// `related to "<q>".` with the callout as its own paragraph
    #[default]
    Short,
    /// `related to your question about "<q>".` with the callout on the same line
    Conversational,
}

/// Template summarizer, always available
#[derive(Debug, Clone)]
pub struct TemplateSummarizer {
    preferred_space: Option<String>,
    excerpt_chars: usize,
    headline: Headline,
}

impl TemplateSummarizer {
    pub fn new(preferred_space: Option<String>, excerpt_chars: usize) -> Self {
        Self {
            preferred_space,
            excerpt_chars,
            headline: Headline::default(),
        }
    }

    pub fn with_headline(mut self, headline: Headline) -> Self {
        self.headline = headline;
        self
    }

    /// Render the answer text
    pub fn render(&self, question: &str, articles: &[Article]) -> String {
        let count = articles.len();
        let plural = if count > 1 { "s" } else { "" };
        let (mut summary, separator) = match self.headline {
            Headline::Short => (
                format!("I found {} article{} related to \"{}\".", count, plural, question),
                "\n\n",
            ),
            Headline::Conversational => (
                format!(
                    "I found {} article{} related to your question about \"{}\".",
                    count, plural, question
                ),
                " ",
            ),
        };

        if let Some(space) = &self.preferred_space {
            let in_space = articles.iter().filter(|a| a.in_space(space)).count();
            if in_space > 0 {
                let _ = write!(
                    summary,
                    "{}{} of these are from the {} knowledge base.",
                    separator, in_space, space
                );
            }
        }

        summary.push_str("\n\nHere's what I found:\n\n");

        for (index, article) in articles.iter().enumerate() {
            let _ = write!(
                summary,
                "{}. **{}** ({})\n{}\n\n",
                index + 1,
                article.title,
                article.space_name,
                extract_text(&article.html_body, self.excerpt_chars)
            );
        }

        summary.push_str("Please check the article links below for complete details.");
        summary
    }
}

#[async_trait]
impl Summarizer for TemplateSummarizer {
    async fn summarize(&self, question: &str, articles: &[Article]) -> String {
        self.render(question, articles)
    }

    fn name(&self) -> &'static str {
        "template"
    }
}
