// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Confluence content search API client
//!
//! One GET per call against `/wiki/rest/api/content/search`, authenticated
//! with HTTP Basic auth. No timeout is set beyond the client defaults.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use tracing::debug;

use super::config::Credentials;
use super::cql::CqlQuery;
use super::provider::WikiApi;
use super::types::SearchError;

const SEARCH_PATH: &str = "/wiki/rest/api/content/search";
/// Page body (rendered view) and space metadata
const EXPAND: &str = "body.view,space";

/// Confluence Cloud search client
pub struct ConfluenceClient {
    client: Client,
    api_base_url: Option<String>,
}

impl ConfluenceClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `api_base_url` - Replaces `https://<domain>` when set
    pub fn new(api_base_url: Option<String>) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(concat!("wiki-answer-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Transport {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_base_url,
        })
    }

    /// Full search endpoint for `domain`
    pub fn endpoint(&self, domain: &str) -> String {
        match &self.api_base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), SEARCH_PATH),
            None => format!("https://{}{}", domain, SEARCH_PATH),
        }
    }
}

#[async_trait]
impl WikiApi for ConfluenceClient {
    async fn search(
        &self,
        credentials: &Credentials,
        cql: &CqlQuery,
        limit: usize,
    ) -> Result<serde_json::Value, SearchError> {
        let cql = cql.to_string();
        debug!(cql = %cql, limit, "Confluence search");
        let limit = limit.to_string();

        let response = self
            .client
            .get(self.endpoint(&credentials.domain))
            .header(AUTHORIZATION, credentials.authorization_header())
            .header(ACCEPT, "application/json")
            .query(&[
                ("cql", cql.as_str()),
                ("limit", limit.as_str()),
                ("expand", EXPAND),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Transport {
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::ApiError {
                status: status.as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| SearchError::InvalidResponse {
                message: format!("JSON parse error: {}", e.without_url()),
            })
    }

    fn name(&self) -> &'static str {
        "confluence"
    }
}
