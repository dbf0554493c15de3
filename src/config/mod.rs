// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service-wide configuration
//!
//! Loaded once at start-up from the process environment and shared
//! read-only with every request.

use axum::http::Method;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::search::SearchConfig;
use crate::summary::SummaryConfig;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8787";
/// `max-age` for successful answers with results
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 300;

/// Which flavour of the endpoint this process serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndpointMode {
    /// `GET ?query=` → raw upstream JSON
    Proxy,
    /// `POST {"question"}` → answer payload
    Assistant,
}

impl EndpointMode {
    pub fn allowed_method(self) -> Method {
        match self {
            EndpointMode::Proxy => Method::GET,
            EndpointMode::Assistant => Method::POST,
        }
    }
}

impl FromStr for EndpointMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proxy" => Ok(EndpointMode::Proxy),
            "assistant" => Ok(EndpointMode::Assistant),
            other => Err(format!("Unknown endpoint mode: {}", other)),
        }
    }
}

impl fmt::Display for EndpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointMode::Proxy => f.write_str("proxy"),
            EndpointMode::Assistant => f.write_str("assistant"),
        }
    }
}

/// A string that never shows up in logs
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub mode: EndpointMode,
    pub search: SearchConfig,
    pub summary: SummaryConfig,
    pub cache_max_age_secs: u64,
    /// Unparseable `ENDPOINT_MODE` value, rejected by `validate()`
    pub invalid_mode: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mode, invalid_mode) = match lookup("ENDPOINT_MODE").filter(|v| !v.trim().is_empty()) {
            Some(raw) => match raw.parse() {
                Ok(mode) => (mode, None),
                Err(_) => {
                    warn!("Ignoring unknown ENDPOINT_MODE {:?}", raw);
                    (EndpointMode::Assistant, Some(raw))
                }
            },
            None => (EndpointMode::Assistant, None),
        };

        Self {
            listen_addr: lookup("LISTEN_ADDR")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            mode,
            search: SearchConfig::from_lookup(&lookup),
            summary: SummaryConfig::from_lookup(&lookup),
            cache_max_age_secs: lookup("CACHE_MAX_AGE_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_CACHE_MAX_AGE_SECS),
            invalid_mode,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(raw) = &self.invalid_mode {
            return Err(format!(
                "Invalid ENDPOINT_MODE {:?} (expected \"proxy\" or \"assistant\")",
                raw
            ));
        }
        self.search.validate()?;
        self.summary.validate()?;
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            mode: EndpointMode::Assistant,
            search: SearchConfig::default(),
            summary: SummaryConfig::default(),
            cache_max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
            invalid_mode: None,
        }
    }
}
