// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session slugs: `<owner>-<YYYY>-<MM>-<DD>[-<sequence>]`.

use chrono::{DateTime, Utc};

/// Extracts the `YYYY-MM-DD` date embedded in a session slug.
///
/// Slugs with fewer than four hyphen-delimited segments are returned unchanged.
pub fn extract_session_date(slug: &str) -> String {
    let parts: Vec<&str> = slug.split('-').collect();
    if parts.len() < 4 {
        return slug.to_string();
    }
    format!("{}-{}-{}", parts[1], parts[2], parts[3])
}

/// Builds a unique slug for a session owned by `owner` starting at `start`.
///
/// The base slug is `<owner>-<YYYY-MM-DD>`; while `exists` reports a clash,
/// `-1`, `-2`, ... are appended.
pub fn generate_session_slug(
    owner: &str,
    start: DateTime<Utc>,
    exists: impl Fn(&str) -> bool,
) -> String {
    let base = format!("{}-{}", slugify(owner), start.format("%Y-%m-%d"));
    let mut candidate = base.clone();
    let mut suffix = 1u32;
    while exists(&candidate) {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    candidate
}

/// Lowercases `value` and drops everything but ASCII letters and digits, so
/// the owner stays a single hyphen-free slug segment.
fn slugify(value: &str) -> String {
    let out: String = value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if out.is_empty() {
        "observer".to_string()
    } else {
        out
    }
}
