// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    Router,
};
use std::{future::Future, io, net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::search::{answer_handler, ResponseComposer};
use crate::config::{EndpointMode, ServiceConfig};
use crate::search::{ConfluenceClient, WikiApi, WikiSearchService};
use crate::summary::{build_summarizer, Summarizer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub search: Arc<WikiSearchService>,
    pub composer: Arc<ResponseComposer>,
}

impl AppState {
    /// Assemble state from explicit collaborators
    pub fn new(config: ServiceConfig, api: Arc<dyn WikiApi>, summarizer: Arc<dyn Summarizer>) -> Self {
        let search = WikiSearchService::new(api, config.search.clone());
        Self {
            config: Arc::new(config),
            search: Arc::new(search),
            composer: Arc::new(ResponseComposer::new(summarizer)),
        }
    }

    /// Assemble state with the Confluence client and the configured summarizer
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        let api = ConfluenceClient::new(config.search.api_base_url.clone())
            .context("Failed to create Confluence client")?;
        let summarizer = build_summarizer(&config.summary, config.search.preferred_space.clone())
            .context("Failed to create summarizer")?;

        Ok(Self::new(config, Arc::new(api), summarizer))
    }
}

/// CORS policy: any origin, the mode's method plus preflight, JSON bodies
pub fn cors_layer(mode: EndpointMode) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([mode.allowed_method(), Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the router; every path is served by the same handler
pub fn create_app(state: AppState) -> Router {
    let mode = state.config.mode;

    Router::new()
        .fallback(answer_handler)
        .layer(cors_layer(mode))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(state: AppState) -> Result<()> {
    let addr: SocketAddr = state
        .config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", state.config.listen_addr))?;
    let mode = state.config.mode;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("{} endpoint listening on {}", mode, addr);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(signal::ctrl_c()).await
}

/// Resolves once `signal` fires; never resolves if listening for it failed
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
