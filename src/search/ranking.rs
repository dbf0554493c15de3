// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Preferred-space ranking

use super::types::Article;

/// Move articles from `preferred_space` to the front and cap the list
///
/// Both partitions keep their upstream order. With no preferred space the
/// input order is kept and only the cap applies.
pub fn rank(articles: Vec<Article>, preferred_space: Option<&str>, cap: usize) -> Vec<Article> {
    let Some(space) = preferred_space else {
        return articles.into_iter().take(cap).collect();
    };

    let (preferred, others): (Vec<Article>, Vec<Article>) =
        articles.into_iter().partition(|a| a.in_space(space));

    preferred.into_iter().chain(others).take(cap).collect()
}
