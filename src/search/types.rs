// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for wiki search

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Space name used when the wiki omits space metadata
pub const UNKNOWN_SPACE: &str = "Unknown";

/// A single matched wiki page, normalized from the upstream payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Page title
    pub title: String,
    /// Name of the space the page lives in ("Unknown" when absent)
    pub space_name: String,
    /// Rendered page body (view representation), empty when absent
    pub html_body: String,
    /// Path of the page relative to `https://<domain>/wiki`
    pub web_path: String,
}

impl Article {
    /// Build the absolute, browser-facing URL of this page
    pub fn url(&self, domain: &str) -> String {
        format!("https://{}/wiki{}", domain, self.web_path)
    }

    pub fn in_space(&self, space: &str) -> bool {
        self.space_name == space
    }
}

/// Search response envelope returned by the wiki content search API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikiSearchResponse {
    #[serde(default)]
    pub results: Vec<WikiContent>,
}

/// One entry of `results` in the wiki search response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikiContent {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<WikiSpace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<WikiBody>,
    #[serde(default, rename = "_links")]
    pub links: WikiLinks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikiSpace {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikiBody {
    #[serde(default)]
    pub view: Option<WikiView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikiView {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikiLinks {
    #[serde(default)]
    pub webui: String,
}

impl From<WikiContent> for Article {
    fn from(content: WikiContent) -> Self {
        Article {
            title: content.title,
            space_name: content
                .space
                .and_then(|s| s.name)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_SPACE.to_string()),
            html_body: content
                .body
                .and_then(|b| b.view)
                .and_then(|v| v.value)
                .unwrap_or_default(),
            web_path: content.links.webui,
        }
    }
}

impl WikiSearchResponse {
    /// Parse an upstream JSON document, treating a missing `results` field as empty
    pub fn from_value(value: serde_json::Value) -> Result<Self, SearchError> {
        serde_json::from_value(value).map_err(|e| SearchError::InvalidResponse {
            message: e.to_string(),
        })
    }

    pub fn into_articles(self) -> Vec<Article> {
        self.results.into_iter().map(Article::from).collect()
    }
}

/// Errors that can occur while talking to the wiki search API
#[derive(Debug, Error)]
pub enum SearchError {
    /// Non-success HTTP status from the wiki API
    #[error("Confluence API error: {status}")]
    ApiError {
        /// HTTP status code
        status: u16,
    },

    /// Transport failure before any status was received
    #[error("Confluence request failed: {message}")]
    Transport { message: String },

    /// Body was not the JSON document we expected
    #[error("Invalid Confluence response: {message}")]
    InvalidResponse { message: String },
}

impl SearchError {
    /// Upstream HTTP status, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::ApiError { status } => Some(*status),
            _ => None,
        }
    }
}
