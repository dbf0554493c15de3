// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::rejection::BytesRejection,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EndpointMode;
use crate::search::{MissingCredentials, SearchError};

/// Displayable text for callers when the server side fails
pub const APOLOGY_ANSWER: &str =
    "I'm having trouble processing your question right now. Please try again in a moment.";

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: Method, mode: EndpointMode },

    #[error("Missing {} input", .mode)]
    MissingInput { mode: EndpointMode },

    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    /// Body could not be read (too large, or the stream failed)
    #[error("Unreadable body ({status}): {reason}")]
    UnreadableBody { status: StatusCode, reason: String },

    #[error("Service not configured: {0}")]
    MissingConfiguration(MissingCredentials),

    #[error(transparent)]
    Upstream(#[from] SearchError),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorBody {
        let (error, message, answer) = match self {
            ApiError::MethodNotAllowed { mode, .. } => (
                "Method not allowed",
                Some(match mode {
                    EndpointMode::Proxy => {
                        "Please use GET method with a \"query\" URL parameter".to_string()
                    }
                    EndpointMode::Assistant => {
                        "Please use POST method with JSON body containing \"question\" field"
                            .to_string()
                    }
                }),
                None,
            ),
            ApiError::MissingInput { mode } => match mode {
                EndpointMode::Proxy => (
                    "Query parameter is required",
                    Some("Please provide a \"query\" URL parameter".to_string()),
                    None,
                ),
                EndpointMode::Assistant => (
                    "Question is required",
                    Some("Please provide a \"question\" field in the JSON body".to_string()),
                    None,
                ),
            },
            ApiError::InvalidBody(detail) => (
                "Invalid JSON body",
                Some(format!(
                    "Please send a JSON object with a \"question\" field ({})",
                    detail
                )),
                None,
            ),
            ApiError::UnreadableBody { status, reason } => (
                if *status == StatusCode::PAYLOAD_TOO_LARGE {
                    "Request body too large"
                } else {
                    "Invalid request body"
                },
                Some(reason.clone()),
                None,
            ),
            ApiError::MissingConfiguration(missing) => (
                "Service not configured",
                Some(missing.to_string()),
                Some(APOLOGY_ANSWER.to_string()),
            ),
            ApiError::Upstream(e) => (
                "Internal server error",
                Some(e.to_string()),
                Some(APOLOGY_ANSWER.to_string()),
            ),
        };

        ErrorBody {
            error: error.to_string(),
            message,
            answer,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MissingInput { .. } | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::UnreadableBody { status, .. } => *status,
            ApiError::MissingConfiguration(_) | ApiError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::UnreadableBody {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
