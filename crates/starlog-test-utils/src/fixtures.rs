// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload builders.

use chrono::{DateTime, Duration, TimeZone, Utc};
use starlog_core::{ObservationPage, ObservationSummary};

/// Fixed reference instant for deterministic timestamps.
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 22, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A list item of the given type, created `id` minutes before [`reference_time`].
pub fn summary(id: u64, type_class: &str) -> ObservationSummary {
    let created_at = reference_time() - Duration::minutes(id as i64);
    ObservationSummary {
        id,
        object_type: "Planet".to_string(),
        object_name: format!("Object {id}"),
        session_slug: "1-2026-01-05".to_string(),
        created_at,
        date_time: created_at,
        type_class: type_class.to_string(),
    }
}

/// A page of `solarsystem` items with the given ids.
pub fn page(ids: &[u64], has_next: bool) -> ObservationPage {
    ObservationPage {
        observations: ids.iter().map(|&id| summary(id, "solarsystem")).collect(),
        has_next,
    }
}
