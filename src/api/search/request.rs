// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Input validation for the search endpoint

use axum::http::{Method, Uri};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::config::EndpointMode;

/// Request body for the assistant endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    /// Free-text question (required, non-blank)
    #[serde(default)]
    pub question: Option<String>,
}

impl AskRequest {
    /// Parse a raw JSON body
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
    }

    /// Validate the request and return the trimmed question
    pub fn validate(&self) -> Result<String, ApiError> {
        non_blank(self.question.as_deref()).ok_or(ApiError::MissingInput {
            mode: EndpointMode::Assistant,
        })
    }
}

/// Reject any method other than the one `mode` serves
pub fn check_method(method: &Method, mode: EndpointMode) -> Result<(), ApiError> {
    if *method == mode.allowed_method() {
        Ok(())
    } else {
        Err(ApiError::MethodNotAllowed {
            method: method.clone(),
            mode,
        })
    }
}

/// The `query` URL parameter, trimmed and non-empty
pub fn query_param(uri: &Uri) -> Result<String, ApiError> {
    let raw = uri.query().unwrap_or_default();
    let value = url::form_urlencoded::parse(raw.as_bytes())
        .find(|(key, _)| key == "query")
        .map(|(_, value)| value.into_owned());

    non_blank(value.as_deref()).ok_or(ApiError::MissingInput {
        mode: EndpointMode::Proxy,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
