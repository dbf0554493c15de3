// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the wiki answer proxy

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Full version string with feature description
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"), "-wiki-answers");

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "cql-search",
    "space-scoped-search",
    "preferred-space-ranking",
    "template-summaries",
    "workers-ai-summaries",
    "raw-proxy-mode",
    "cors",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Wiki Answer Proxy {}", VERSION_NUMBER)
}

/// Get full version info as JSON
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "features": FEATURES,
    })
}
