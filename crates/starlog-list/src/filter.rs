// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter state <-> query string.
//!
//! The list's filters live in the page URL so filtered views can be
//! bookmarked; these functions are the only place that URL is built or read.

use starlog_core::FilterState;
use url::form_urlencoded;

/// Builds the canonical query string for `filters`.
///
/// Fields appear in the fixed order `session`, `object_type`, `search`; blank
/// fields are omitted. Returns `""` when nothing is set, otherwise `?k=v&...`.
pub fn build_query_string(filters: &FilterState) -> String {
    let query = encode_query(filters, None);
    if query.is_empty() {
        query
    } else {
        format!("?{query}")
    }
}

/// Encodes `filters` (and an optional page number) without the leading `?`.
pub fn encode_query(filters: &FilterState, page: Option<u32>) -> String {
    let filters = filters.normalized();
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in [
        ("session", &filters.session),
        ("object_type", &filters.object_type),
        ("search", &filters.search),
    ] {
        if let Some(value) = value {
            serializer.append_pair(name, value);
        }
    }
    if let Some(page) = page {
        serializer.append_pair("page", &page.to_string());
    }
    serializer.finish()
}

/// Reads the filter fields out of a query string (leading `?` optional).
///
/// Unrelated parameters such as `page` are ignored.
pub fn parse_query(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filters = FilterState::default();
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match name.as_ref() {
            "session" => &mut filters.session,
            "object_type" => &mut filters.object_type,
            "search" => &mut filters.search,
            _ => continue,
        };
        *slot = Some(value.into_owned());
    }
    filters.normalized()
}

/// Full navigation target for `path` filtered by `filters`.
pub fn list_url(path: &str, filters: &FilterState) -> String {
    format!("{path}{}", build_query_string(filters))
}
