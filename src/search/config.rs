// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for wiki search

use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;

use crate::config::Secret;

/// Wiki host used when `CONFLUENCE_DOMAIN` is unset
pub const DEFAULT_DOMAIN: &str = "example.atlassian.net";
/// Space whose pages are ranked first when `PREFERRED_SPACE` is unset
pub const DEFAULT_PREFERRED_SPACE: &str = "Platform Operations";
pub const DEFAULT_RESULT_CAP: usize = 5;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Configuration for wiki search
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Account email for Basic auth
    pub email: Option<String>,
    /// API token for Basic auth (redacted in Debug output)
    pub api_token: Option<Secret>,
    /// Wiki host, e.g. `acme.atlassian.net`
    pub domain: String,
    /// Override for `https://<domain>` on API calls (stub servers, proxies)
    pub api_base_url: Option<String>,
    /// Space ranked ahead of all others
    pub preferred_space: Option<String>,
    /// Search the preferred space first and broaden when that fails or is empty
    pub scope_to_preferred_space: bool,
    /// Maximum number of ranked articles returned
    pub result_cap: usize,
    /// `limit` sent to the wiki API
    pub search_limit: usize,
}

/// Credentials for one outbound wiki request
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub api_token: Secret,
    pub domain: String,
}

impl Credentials {
    /// `Authorization` header value for HTTP Basic auth
    pub fn authorization_header(&self) -> String {
        let raw = format!("{}:{}", self.email, self.api_token.expose());
        format!("Basic {}", STANDARD.encode(raw))
    }
}

/// Names of the settings that were missing when building [`Credentials`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCredentials(pub Vec<&'static str>);

impl fmt::Display for MissingCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Please set {} environment variable{}",
            self.0.join(" and "),
            if self.0.len() > 1 { "s" } else { "" }
        )
    }
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

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

        Self {
            email: get("CONFLUENCE_EMAIL"),
            api_token: get("CONFLUENCE_API_KEY").map(Secret::new),
            domain: get("CONFLUENCE_DOMAIN").unwrap_or(defaults.domain),
            api_base_url: get("CONFLUENCE_API_BASE_URL"),
            preferred_space: match get("PREFERRED_SPACE") {
                Some(v) if v == "-" || v.eq_ignore_ascii_case("none") => None,
                Some(v) => Some(v),
                None => defaults.preferred_space,
            },
            scope_to_preferred_space: get("SCOPE_TO_PREFERRED_SPACE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.scope_to_preferred_space),
            result_cap: get("RESULT_CAP")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.result_cap),
            search_limit: get("SEARCH_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.search_limit),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.result_cap == 0 {
            return Err("Result cap must be greater than 0".to_string());
        }
        if self.search_limit == 0 {
            return Err("Search limit must be greater than 0".to_string());
        }
        if self.scope_to_preferred_space && self.preferred_space.is_none() {
            return Err("Scoped search requires a preferred space".to_string());
        }
        Ok(())
    }

    /// Credentials for a wiki request, or the names of what is missing
    pub fn credentials(&self) -> Result<Credentials, MissingCredentials> {
        let mut missing = Vec::new();
        if self.email.is_none() {
            missing.push("CONFLUENCE_EMAIL");
        }
        if self.api_token.is_none() {
            missing.push("CONFLUENCE_API_KEY");
        }
        if self.domain.trim().is_empty() {
            missing.push("CONFLUENCE_DOMAIN");
        }

        match (&self.email, &self.api_token) {
            (Some(email), Some(token)) if missing.is_empty() => Ok(Credentials {
                email: email.clone(),
                api_token: token.clone(),
                domain: self.domain.clone(),
            }),
            _ => Err(MissingCredentials(missing)),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            email: None,
            api_token: None,
            domain: DEFAULT_DOMAIN.to_string(),
            api_base_url: None,
            preferred_space: Some(DEFAULT_PREFERRED_SPACE.to_string()),
            scope_to_preferred_space: false,
            result_cap: DEFAULT_RESULT_CAP,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}
