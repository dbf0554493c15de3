// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Plain-text extraction from rendered page HTML
//!
//! Best-effort only: markup is removed with a tag pattern rather than a
//! parser, so partial or malformed HTML never fails, it just leaves the
//! unmatched fragments in the text.

use regex::Regex;
use std::sync::OnceLock;

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Named entities decoded after tag stripping, in this order
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
];

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

/// Extract readable text from `html`, capped at `max_chars` characters
///
/// Tags become single spaces, a small set of named entities is decoded,
/// whitespace runs collapse to one space. Longer text is cut to `max_chars`
/// characters, right-trimmed and suffixed with `...`, so the result is never
/// longer than `max_chars + 3` characters.
pub fn extract_text(html: &str, max_chars: usize) -> String {
    let stripped = tag_pattern().replace_all(html, " ");

    let mut decoded = stripped.into_owned();
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }

    let cleaned = clean_text(&decoded);
    truncate_content(&cleaned, max_chars)
}

/// Normalize whitespace
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to `max_chars` characters and append the ellipsis
///
/// Text that already carries the ellipsis within the `max_chars + 3` bound
/// is left alone, which keeps re-extraction of our own output stable.
fn truncate_content(text: &str, max_chars: usize) -> String {
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }
    if len <= max_chars + ELLIPSIS.len() && text.ends_with(ELLIPSIS) {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}{}", truncated.trim_end(), ELLIPSIS)
}
