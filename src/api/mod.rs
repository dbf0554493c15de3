// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod http_server;
pub mod search;

pub use errors::{ApiError, ErrorBody, APOLOGY_ANSWER};
pub use http_server::{create_app, start_server, AppState};
pub use search::{answer_handler, AnswerPayload, ArticleSummary, AskRequest, Confidence};
