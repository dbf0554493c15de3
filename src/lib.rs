// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod search;
pub mod summary;
pub mod version;

pub use api::{create_app, AppState};
pub use config::{EndpointMode, ServiceConfig};
pub use search::{Article, WikiSearchService};
pub use summary::{Summarizer, SummaryStrategy};
