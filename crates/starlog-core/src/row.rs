// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row view-model for the observation list.
//!
//! Rendering is split in two: [`ObservationRow::from_summary`] derives every
//! presentation value from the raw payload, and a [`crate::ListView`]
//! implementation turns the row into markup (or terminal output).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::routes;
use crate::slug::extract_session_date;
use crate::types::{ObservationKey, ObservationSummary, ObservationType};

/// Presentation values for one list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationRow {
    pub id: u64,
    pub type_class: String,
    /// `None` when `type_class` is not one of the known types.
    pub observation_type: Option<ObservationType>,
    pub object_name: String,
    pub object_type: String,
    /// Session date taken from the slug, upper-cased.
    pub session_date: String,
    pub created_display: String,
    pub created_relative: String,
    pub detail_url: Option<String>,
}

impl ObservationRow {
    /// Derives a row from a list payload item, with relative age measured at `now`.
    pub fn from_summary(summary: &ObservationSummary, now: DateTime<Utc>) -> Self {
        let observation_type = summary.observation_type();
        let detail_url = observation_type
            .map(|ty| routes::detail_path(&ObservationKey::new(ty, summary.id)));

        Self {
            id: summary.id,
            type_class: summary.type_class.clone(),
            observation_type,
            object_name: summary.object_name.clone(),
            object_type: summary.object_type.clone(),
            session_date: extract_session_date(&summary.session_slug).to_uppercase(),
            created_display: format_timestamp(summary.created_at),
            created_relative: relative_time(summary.created_at, now),
            detail_url,
        }
    }

    /// Key used by delete and detail actions, if the type is known.
    pub fn key(&self) -> Option<ObservationKey> {
        self.observation_type
            .map(|ty| ObservationKey::new(ty, self.id))
    }
}

/// Absolute creation timestamp, e.g. `Jan 5, 2026 21:30 UTC`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %H:%M UTC").to_string()
}

/// Absolute calendar date, e.g. `Jan 5, 2026`.
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Coarse human-relative age of `at` as seen from `now`.
///
/// Under a minute (including timestamps in the future) is "Just now"; then
/// minutes, hours and days up to a week; older entries show the date.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);

    if elapsed.num_seconds() < 60 {
        return "Just now".to_string();
    }
    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{days}d ago");
    }
    format_date(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn relative_time_thresholds() {
        let t = now();
        assert_eq!(relative_time(t - Duration::seconds(30), t), "Just now");
        assert_eq!(relative_time(t - Duration::minutes(5), t), "5m ago");
        assert_eq!(relative_time(t - Duration::hours(3), t), "3h ago");
        assert_eq!(relative_time(t - Duration::days(2), t), "2d ago");
        assert_eq!(relative_time(t - Duration::days(10), t), "Jan 10, 2026");
    }

    #[test]
    fn relative_time_boundaries_are_half_open() {
        let t = now();
        assert_eq!(relative_time(t - Duration::seconds(60), t), "1m ago");
        assert_eq!(relative_time(t - Duration::minutes(60), t), "1h ago");
        assert_eq!(relative_time(t - Duration::hours(24), t), "1d ago");
        assert_eq!(relative_time(t - Duration::days(7), t), "Jan 13, 2026");
    }

    #[test]
    fn future_timestamps_are_just_now() {
        let t = now();
        assert_eq!(relative_time(t + Duration::minutes(10), t), "Just now");
    }

    #[test]
    fn row_derives_presentation_values() {
        let summary = ObservationSummary {
            id: 9,
            object_type: "Planet".into(),
            object_name: "Jupiter".into(),
            session_slug: "3-2026-01-19-1".into(),
            created_at: now() - Duration::hours(2),
            date_time: now() - Duration::hours(4),
            type_class: "solarsystem".into(),
        };
        let row = ObservationRow::from_summary(&summary, now());
        assert_eq!(row.session_date, "2026-01-19");
        assert_eq!(row.created_relative, "2h ago");
        assert_eq!(row.created_display, "Jan 20, 2026 10:00 UTC");
        assert_eq!(
            row.detail_url.as_deref(),
            Some("/observations/detail/solarsystem/9/")
        );
        assert_eq!(
            row.key(),
            Some(ObservationKey::new(ObservationType::SolarSystem, 9))
        );
    }

    #[test]
    fn unparseable_slug_is_upper_cased_verbatim() {
        let summary = ObservationSummary {
            id: 1,
            object_type: "Star".into(),
            object_name: "Vega".into(),
            session_slug: "tonight".into(),
            created_at: now(),
            date_time: now(),
            type_class: "nebula".into(),
        };
        let row = ObservationRow::from_summary(&summary, now());
        assert_eq!(row.session_date, "TONIGHT");
        assert!(row.detail_url.is_none());
        assert!(row.key().is_none());
    }
}
