// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wiki search module
//!
//! Talks to the Confluence content search API and turns its payload into
//! ranked [`Article`]s:
//! - CQL query building with optional space scoping
//! - One broadening retry for space-scoped queries
//! - Preferred-space ranking with a result cap
//! - HTML to plain-text excerpts

pub mod confluence;
pub mod config;
pub mod cql;
pub mod extractor;
pub mod provider;
pub mod ranking;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use confluence::ConfluenceClient;
pub use config::{Credentials, MissingCredentials, SearchConfig};
pub use cql::CqlQuery;
pub use extractor::extract_text;
pub use provider::WikiApi;
pub use ranking::rank;
pub use service::WikiSearchService;
pub use types::{Article, SearchError, UNKNOWN_SPACE};
