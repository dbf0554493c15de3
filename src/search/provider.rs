// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wiki search API trait definition

use async_trait::async_trait;

use super::config::Credentials;
use super::cql::CqlQuery;
use super::types::SearchError;

/// Transport for the wiki content search API
///
/// Implementations issue exactly one request per call and return the
/// upstream JSON document untouched; retries and ranking live in
/// [`super::service::WikiSearchService`].
#[async_trait]
pub trait WikiApi: Send + Sync {
    /// Run one CQL search
    ///
    /// # Arguments
    /// * `credentials` - Account used for Basic auth, plus the wiki host
    /// * `cql` - Query expression
    /// * `limit` - Maximum number of results requested upstream
    async fn search(
        &self,
        credentials: &Credentials,
        cql: &CqlQuery,
        limit: usize,
    ) -> Result<serde_json::Value, SearchError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
