// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the list controller, form selector, client and gateway.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The closed set of observation subtypes.
///
/// The string form doubles as the `type_class` segment in detail and delete
/// URLs and as the form-selector key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ObservationType {
    SolarSystem,
    Star,
    DeepSky,
    SpecialEvent,
}

impl ObservationType {
    /// URL and form key for this type.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::SolarSystem => "Solar System",
            Self::Star => "Star",
            Self::DeepSky => "Deep Sky",
            Self::SpecialEvent => "Special Event",
        }
    }
}

/// Identifies one persisted observation: ids are only unique per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObservationKey {
    pub type_class: ObservationType,
    pub id: u64,
}

impl ObservationKey {
    pub fn new(type_class: ObservationType, id: u64) -> Self {
        Self { type_class, id }
    }
}

impl std::fmt::Display for ObservationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.type_class, self.id)
    }
}

/// Client-visible projection of a persisted observation, as sent by the list endpoint.
///
/// `type_class` stays a raw string on the wire: the list renders rows of
/// unknown types, but refuses to build delete or detail URLs for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSummary {
    pub id: u64,
    pub object_type: String,
    pub object_name: String,
    pub session_slug: String,
    pub created_at: DateTime<Utc>,
    pub date_time: DateTime<Utc>,
    pub type_class: String,
}

impl ObservationSummary {
    /// Parses `type_class` against the closed enum.
    pub fn observation_type(&self) -> Option<ObservationType> {
        self.type_class.parse().ok()
    }
}

/// One page of the list endpoint's JSON payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationPage {
    pub observations: Vec<ObservationSummary>,
    pub has_next: bool,
}

/// Delete endpoint payload: `{success: true, message}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteResponse {
    pub fn deleted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// List filters, mirroring the page's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FilterState {
    /// Builds a filter set, treating blank strings as absent.
    pub fn new(session: &str, object_type: &str, search: &str) -> Self {
        Self {
            session: non_blank(session),
            object_type: non_blank(object_type),
            search: non_blank(search),
        }
    }

    /// Copy with blank values dropped.
    pub fn normalized(&self) -> Self {
        Self {
            session: self.session.as_deref().and_then(non_blank),
            object_type: self.object_type.as_deref().and_then(non_blank),
            search: self.search.as_deref().and_then(non_blank),
        }
    }

    pub fn is_empty(&self) -> bool {
        let n = self.normalized();
        n.session.is_none() && n.object_type.is_none() && n.search.is_none()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| value.to_string())
}

/// Which filter control changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Session,
    ObjectType,
    Search,
}

/// Document scroll geometry, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    /// Unscrolled distance left below the viewport.
    pub fn remaining(&self) -> f64 {
        self.document_height - (self.scroll_top + self.viewport_height)
    }
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: Severity,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// An observing outing grouping observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservingSession {
    pub id: u64,
    pub slug: String,
    pub datetime_start_ut: DateTime<Utc>,
    #[serde(default)]
    pub datetime_end_ut: Option<DateTime<Utc>>,
    #[serde(default)]
    pub site_name: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating an observing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSession {
    pub datetime_start_ut: DateTime<Utc>,
    #[serde(default)]
    pub datetime_end_ut: Option<DateTime<Utc>>,
    #[serde(default)]
    pub site_name: String,
}

/// Request body for creating an observation from a submitted type form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewObservation {
    pub session: String,
    pub type_class: ObservationType,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// Full record returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationDetail {
    #[serde(flatten)]
    pub summary: ObservationSummary,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub distance_light_years: Option<f64>,
    #[serde(default)]
    pub distance_display: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn observation_type_keys_round_trip() {
        for ty in ObservationType::iter() {
            assert_eq!(ObservationType::from_str(ty.key()).unwrap(), ty);
        }
        assert_eq!(ObservationType::DeepSky.key(), "deepsky");
        assert!(ObservationType::from_str("comet").is_err());
    }

    #[test]
    fn observation_type_serializes_as_key() {
        let json = serde_json::to_string(&ObservationType::SolarSystem).unwrap();
        assert_eq!(json, "\"solarsystem\"");
    }

    #[test]
    fn summary_deserializes_list_payload_item() {
        let json = r#"{
            "id": 7,
            "object_type": "Star",
            "object_name": "Betelgeuse",
            "session_slug": "1-2026-01-05-2",
            "created_at": "2026-01-05T21:30:00Z",
            "date_time": "2026-01-05T20:00:00Z",
            "type_class": "star"
        }"#;
        let summary: ObservationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, 7);
        assert_eq!(summary.observation_type(), Some(ObservationType::Star));
    }

    #[test]
    fn unknown_type_class_is_not_parsed() {
        let summary = ObservationSummary {
            id: 1,
            object_type: "x".into(),
            object_name: "y".into(),
            session_slug: "s".into(),
            created_at: Utc::now(),
            date_time: Utc::now(),
            type_class: "../admin".into(),
        };
        assert_eq!(summary.observation_type(), None);
    }

    #[test]
    fn delete_response_shapes() {
        let ok: DeleteResponse =
            serde_json::from_str(r#"{"success": true, "message": "Deleted"}"#).unwrap();
        assert_eq!(ok, DeleteResponse::deleted("Deleted"));

        let failed: DeleteResponse =
            serde_json::from_str(r#"{"success": false, "error": "X"}"#).unwrap();
        assert_eq!(failed, DeleteResponse::failed("X"));
    }

    #[test]
    fn filter_state_drops_blank_values() {
        let filters = FilterState::new("S1", "  ", "");
        assert_eq!(filters.session.as_deref(), Some("S1"));
        assert!(filters.object_type.is_none());
        assert!(filters.search.is_none());
        assert!(!filters.is_empty());
        assert!(FilterState::new("", "", " ").is_empty());
    }

    #[test]
    fn scroll_remaining_distance() {
        let metrics = ScrollMetrics {
            scroll_top: 1000.0,
            viewport_height: 800.0,
            document_height: 2000.0,
        };
        assert_eq!(metrics.remaining(), 200.0);
    }
}
