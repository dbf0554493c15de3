// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wiki search endpoint
//!
//! One handler answers on every path. Depending on the configured mode it
//! either proxies the raw search JSON or composes an answer payload.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::answer_handler;
pub use request::AskRequest;
pub use response::{
    AnswerPayload, ArticleSummary, Confidence, ResponseComposer, DISPLAY_EXCERPT_CHARS,
    NO_RESULTS_ANSWER,
};
