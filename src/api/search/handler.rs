// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request handler shared by both endpoint modes

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, info, warn};

use super::request::{check_method, query_param, AskRequest};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::config::EndpointMode;

/// Entry point for every non-preflight request, on any path
///
/// # Proxy mode
/// `GET ?query=<text>` returns the raw wiki search JSON.
///
/// # Assistant mode
/// `POST {"question": "<text>"}` returns `{answer, articles, confidence}`.
///
/// # Errors
/// - 405: wrong method for the mode
/// - 400: missing input, or unparseable JSON body
/// - 413: body over the extractor's size limit
/// - 500: credentials not configured, or the wiki search failed
///
/// Input is validated before credentials are checked, and no outbound
/// call is made when either check fails.
pub async fn answer_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let mode = state.config.mode;
    let result = match mode {
        EndpointMode::Proxy => proxy(&state, &method, &uri).await,
        EndpointMode::Assistant => assist(&state, &method, body).await,
    };

    result.unwrap_or_else(|e| {
        if e.status_code().is_server_error() {
            error!("{} request failed: {}", mode, e);
        } else {
            warn!("{} request rejected: {}", mode, e);
        }
        e.into_response()
    })
}

async fn proxy(state: &AppState, method: &Method, uri: &Uri) -> Result<Response, ApiError> {
    check_method(method, EndpointMode::Proxy)?;
    let query = query_param(uri)?;
    debug!("Proxy query: {:?}", query);

    let credentials = state
        .config
        .search
        .credentials()
        .map_err(ApiError::MissingConfiguration)?;

    let raw = state.search.search_raw(&credentials, &query).await?;
    Ok((cache_headers(state), Json(raw)).into_response())
}

async fn assist(
    state: &AppState,
    method: &Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    check_method(method, EndpointMode::Assistant)?;
    let body = body?;
    let question = AskRequest::from_body(&body)?.validate()?;
    debug!("Question: {:?}", question);

    let credentials = state
        .config
        .search
        .credentials()
        .map_err(ApiError::MissingConfiguration)?;

    let articles = state.search.search_articles(&credentials, &question).await?;
    let payload = state
        .composer
        .compose(&question, &articles, &credentials.domain)
        .await;

    info!(
        "Answered with {} articles ({})",
        payload.articles.len(),
        state.composer.summarizer_name()
    );

    if articles.is_empty() {
        Ok(Json(payload).into_response())
    } else {
        Ok((cache_headers(state), Json(payload)).into_response())
    }
}

fn cache_headers(state: &AppState) -> [(header::HeaderName, String); 1] {
    [(
        header::CACHE_CONTROL,
        format!("public, max-age={}", state.config.cache_max_age_secs),
    )]
}
