// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Builds the CQL query, runs it against the wiki, broadens a space-scoped
//! query once when it fails or finds nothing, and ranks the result.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::config::{Credentials, SearchConfig};
use super::cql::CqlQuery;
use super::provider::WikiApi;
use super::ranking::rank;
use super::types::{Article, SearchError, WikiSearchResponse};

/// Wiki search with preferred-space ranking
pub struct WikiSearchService {
    api: Arc<dyn WikiApi>,
    config: SearchConfig,
}

impl WikiSearchService {
    pub fn new(api: Arc<dyn WikiApi>, config: SearchConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search and rank articles for `query`
    ///
    /// With scoped search enabled the preferred space is queried first; an
    /// error or an empty result triggers one broadened query whose error, if
    /// any, is returned.
    pub async fn search_articles(
        &self,
        credentials: &Credentials,
        query: &str,
    ) -> Result<Vec<Article>, SearchError> {
        let start = Instant::now();
        let cql = self.build_query(query);

        let articles = if cql.is_scoped() {
            match self.fetch(credentials, &cql).await {
                Ok(articles) if !articles.is_empty() => articles,
                Ok(_) => {
                    debug!("No results in preferred space, broadening search");
                    self.fetch(credentials, &cql.broadened()).await?
                }
                Err(e) => {
                    warn!("Scoped search failed: {}, broadening search", e);
                    self.fetch(credentials, &cql.broadened()).await?
                }
            }
        } else {
            self.fetch(credentials, &cql).await?
        };

        let found = articles.len();
        let ranked = rank(
            articles,
            self.config.preferred_space.as_deref(),
            self.config.result_cap,
        );

        info!(
            "Search complete: {} results ({} kept) from {} in {}ms",
            found,
            ranked.len(),
            self.api.name(),
            start.elapsed().as_millis()
        );

        Ok(ranked)
    }

    /// Run the unscoped query and return the upstream document as-is
    ///
    /// `result_cap` doubles as the upstream `limit` here since nothing is
    /// ranked or trimmed afterwards.
    pub async fn search_raw(
        &self,
        credentials: &Credentials,
        query: &str,
    ) -> Result<serde_json::Value, SearchError> {
        self.api
            .search(credentials, &CqlQuery::text(query), self.config.result_cap)
            .await
    }

    fn build_query(&self, query: &str) -> CqlQuery {
        let cql = CqlQuery::text(query);
        match &self.config.preferred_space {
            Some(space) if self.config.scope_to_preferred_space => cql.in_space(space.clone()),
            _ => cql,
        }
    }

    async fn fetch(
        &self,
        credentials: &Credentials,
        cql: &CqlQuery,
    ) -> Result<Vec<Article>, SearchError> {
        let value = self
            .api
            .search(credentials, cql, self.config.search_limit)
            .await?;
        Ok(WikiSearchResponse::from_value(value)?.into_articles())
    }
}
