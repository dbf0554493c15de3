// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt construction for generated answers

use crate::search::{extract_text, Article};

/// Build the generation prompt for `question` over `articles`
///
/// Each article contributes its title, space and an excerpt of at most
/// `excerpt_chars` characters.
pub fn build_prompt(
    question: &str,
    articles: &[Article],
    preferred_space: Option<&str>,
    excerpt_chars: usize,
) -> String {
    let context = articles
        .iter()
        .map(|article| {
            format!(
                "Article: \"{}\" ({})\n{}",
                article.title,
                article.space_name,
                extract_text(&article.html_body, excerpt_chars)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let audience = match preferred_space {
        Some(space) => format!(" for the {} team", space),
        None => String::new(),
    };

    format!(
        "You are a helpful Confluence knowledge base assistant{audience}.\n\
         \n\
         User Question: \"{question}\"\n\
         \n\
         Available Information from Confluence:\n\
         {context}\n\
         \n\
         Answer the user's question using the Confluence articles above. \
         Explain clearly and in a friendly, conversational tone. When the \
         question asks what something is, define it and describe its purpose.\n\
         \n\
         Guidelines:\n\
         - Combine information when several articles are relevant\n\
         - Say so when the available information is incomplete\n\
         - Give real explanations rather than a list of article titles\n\
         \n\
         Answer:"
    )
}
