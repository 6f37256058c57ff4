// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Initial state embedded in a server-rendered list page.

use std::sync::LazyLock;

use regex::Regex;

static HAS_MORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-has-more\s*=\s*"(true|false|True|False)""#).unwrap());

static CSRF_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<input\b[^>]*\bname\s*=\s*"csrfmiddlewaretoken"[^>]*>"#).unwrap()
});

static VALUE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bvalue\s*=\s*"([^"]*)""#).unwrap());

/// State the list controller is hydrated from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageBootstrap {
    /// The sentinel's `data-has-more` flag; `false` when absent.
    pub has_more: bool,
    /// The hidden forgery-protection field, if the page carries one.
    pub csrf_token: Option<String>,
}

/// Extracts the sentinel flag and the forgery-protection token from page markup.
pub fn parse_bootstrap(html: &str) -> PageBootstrap {
    let has_more = HAS_MORE
        .captures(html)
        .and_then(|c| c.get(1))
        .is_some_and(|m| m.as_str().eq_ignore_ascii_case("true"));

    let csrf_token = CSRF_INPUT
        .find(html)
        .and_then(|input| VALUE_ATTR.captures(input.as_str()))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|t| !t.is_empty());

    PageBootstrap {
        has_more,
        csrf_token,
    }
}
