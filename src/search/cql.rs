// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! CQL expression builder for the wiki content search API

use std::fmt;

/// A full-text query, optionally restricted to one space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CqlQuery {
    text: String,
    space: Option<String>,
}

impl CqlQuery {
    /// Full-text match on `text` across all spaces
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            space: None,
        }
    }

    /// Restrict the query to pages in `space`
    pub fn in_space(mut self, space: impl Into<String>) -> Self {
        self.space = Some(space.into());
        self
    }

    pub fn is_scoped(&self) -> bool {
        self.space.is_some()
    }

    /// Same text match with the space filter dropped
    pub fn broadened(&self) -> Self {
        Self::text(self.text.clone())
    }
}

/// Quote a CQL string literal
fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

impl fmt::Display for CqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.space {
            Some(space) => write!(
                f,
                "space = {} AND text ~ {}",
                quoted(space),
                quoted(&self.text)
            ),
            None => write!(f, "text ~ {}", quoted(&self.text)),
        }
    }
}
