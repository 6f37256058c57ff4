// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON fixture loading for a freshly started gateway.
//!
//! A seed file holds `sessions` (as they would be posted to `/sessions/`) and
//! `observations` (as posted to the add endpoint), with optional creation
//! times and catalog data for distances.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use starlog_core::StarlogError;
use starlog_core::distance::{distance_from_lighttime, distance_from_parallax};
use starlog_core::types::{NewObservation, NewSession};
use tracing::info;

use crate::store::ObservationStore;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    #[serde(default)]
    pub sessions: Vec<NewSession>,
    #[serde(default)]
    pub observations: Vec<SeedObservation>,
}

/// An observation plus the data the add form does not carry.
#[derive(Debug, Deserialize)]
pub struct SeedObservation {
    #[serde(flatten)]
    pub observation: NewObservation,
    /// Defaults to the load time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Stellar parallax in milliarcseconds.
    #[serde(default)]
    pub parallax_mas: Option<f64>,
    /// One-way light time in minutes, for solar system bodies.
    #[serde(default)]
    pub lighttime_minutes: Option<f64>,
}

impl SeedObservation {
    fn distance_light_years(&self) -> Result<Option<f64>, StarlogError> {
        if let Some(mas) = self.parallax_mas {
            return Ok(Some(distance_from_parallax(mas)?.light_years));
        }
        if let Some(minutes) = self.lighttime_minutes {
            return Ok(Some(distance_from_lighttime(minutes)?.light_years));
        }
        Ok(None)
    }
}

/// Reads a seed file from disk.
pub async fn read_seed(path: &Path) -> Result<Seed, StarlogError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        StarlogError::Config(format!("failed to read seed file {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        StarlogError::Config(format!("invalid seed file {}: {e}", path.display()))
    })
}

impl ObservationStore {
    /// Inserts every session, then every observation, of `seed`.
    pub async fn load_seed(&self, seed: Seed, now: DateTime<Utc>) -> Result<(), StarlogError> {
        let sessions = seed.sessions.len();
        let observations = seed.observations.len();

        for session in seed.sessions {
            self.create_session(session, now).await?;
        }
        for entry in seed.observations {
            let distance = entry.distance_light_years()?;
            let created_at = entry.created_at.unwrap_or(now);
            self.insert(entry.observation, created_at, distance).await?;
        }

        info!(sessions, observations, "seed data loaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use starlog_core::{FilterState, ObservationKey, ObservationType};

    const SEED: &str = r#"{
        "sessions": [
            {"datetime_start_ut": "2026-01-05T20:00:00Z", "site_name": "Backyard"}
        ],
        "observations": [
            {
                "session": "observer-2026-01-05",
                "type_class": "star",
                "fields": {"star_name": "Sirius"},
                "created_at": "2026-01-05T21:00:00Z",
                "parallax_mas": 379.21
            },
            {
                "session": "observer-2026-01-05",
                "type_class": "solarsystem",
                "fields": {"celestial_body": "jupiter"},
                "lighttime_minutes": 43.2
            }
        ]
    }"#;

    #[tokio::test]
    async fn seed_populates_store_with_distances() {
        let now = Utc.with_ymd_and_hms(2026, 1, 6, 0, 0, 0).unwrap();
        let store = ObservationStore::new("observer");
        let seed: Seed = serde_json::from_str(SEED).unwrap();

        store.load_seed(seed, now).await.unwrap();

        assert_eq!(store.count(&FilterState::default()).await, 2);
        let sirius = store
            .detail(&ObservationKey::new(ObservationType::Star, 1))
            .await
            .unwrap();
        assert_eq!(sirius.summary.object_name, "Sirius");
        assert!((sirius.distance_light_years.unwrap() - 8.5967).abs() < 1e-3);
        assert_eq!(sirius.distance_display.as_deref(), Some("50.5 trillion miles"));

        let page = store.list(&FilterState::default(), 1, 10).await;
        assert_eq!(page.observations[0].object_name, "Jupiter");
    }

    #[tokio::test]
    async fn bad_parallax_fails_the_load() {
        let store = ObservationStore::new("observer");
        let seed: Seed = serde_json::from_str(
            r#"{
                "sessions": [{"datetime_start_ut": "2026-01-05T20:00:00Z"}],
                "observations": [{
                    "session": "observer-2026-01-05",
                    "type_class": "star",
                    "fields": {"star_name": "X"},
                    "parallax_mas": 0
                }]
            }"#,
        )
        .unwrap();
        let now = Utc.with_ymd_and_hms(2026, 1, 6, 0, 0, 0).unwrap();
        assert!(store.load_seed(seed, now).await.is_err());
    }

    #[tokio::test]
    async fn missing_file_is_a_config_error() {
        let err = read_seed(Path::new("/nonexistent/starlog-seed.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, StarlogError::Config(_)));
    }
}
