// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory observation and session store.
//!
//! Observation ids are allocated per type, so an observation is addressed by
//! its [`ObservationKey`]. Lists are ordered newest `created_at` first.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use starlog_core::distance::{MILES_PER_LIGHT_YEAR, humanize_distance_miles};
use starlog_core::slug::generate_session_slug;
use starlog_core::types::{NewObservation, NewSession, ObservationDetail, ObservingSession};
use starlog_core::{
    FilterState, ObservationKey, ObservationPage, ObservationSummary, ObservationType,
    StarlogError,
};
use starlog_forms::catalog;
use tokio::sync::RwLock;
use tracing::{debug, info};

const MAX_SITE_NAME_CHARS: usize = 50;

/// One persisted observation.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObservation {
    pub key: ObservationKey,
    pub session_slug: String,
    pub fields: BTreeMap<String, String>,
    pub object_name: String,
    pub created_at: DateTime<Utc>,
    pub date_time: DateTime<Utc>,
    pub distance_light_years: Option<f64>,
}

impl StoredObservation {
    pub fn summary(&self) -> ObservationSummary {
        ObservationSummary {
            id: self.key.id,
            object_type: self.key.type_class.label().to_string(),
            object_name: self.object_name.clone(),
            session_slug: self.session_slug.clone(),
            created_at: self.created_at,
            date_time: self.date_time,
            type_class: self.key.type_class.key().to_string(),
        }
    }

    pub fn detail(&self) -> ObservationDetail {
        ObservationDetail {
            summary: self.summary(),
            fields: self.fields.clone(),
            distance_light_years: self.distance_light_years,
            distance_display: self
                .distance_light_years
                .map(|ly| humanize_distance_miles(Some(ly * MILES_PER_LIGHT_YEAR))),
        }
    }

    fn matches(&self, filters: &FilterState) -> bool {
        if let Some(session) = &filters.session
            && &self.session_slug != session
        {
            return false;
        }
        if let Some(object_type) = &filters.object_type
            && self.key.type_class.label() != object_type
        {
            return false;
        }
        if let Some(search) = &filters.search {
            return self
                .object_name
                .to_lowercase()
                .contains(&search.trim().to_lowercase());
        }
        true
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    sessions: Vec<ObservingSession>,
    observations: BTreeMap<ObservationKey, StoredObservation>,
    next_ids: BTreeMap<ObservationType, u64>,
    next_session_id: u64,
}

impl StoreInner {
    fn filtered(&self, filters: &FilterState) -> Vec<&StoredObservation> {
        let filters = filters.normalized();
        let mut matching: Vec<&StoredObservation> = self
            .observations
            .values()
            .filter(|o| o.matches(&filters))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.key.cmp(&a.key))
        });
        matching
    }

    fn session(&self, slug: &str) -> Option<&ObservingSession> {
        self.sessions.iter().find(|s| s.slug == slug)
    }
}

/// Observations plus the sessions they belong to.
#[derive(Debug)]
pub struct ObservationStore {
    owner: String,
    inner: RwLock<StoreInner>,
}

impl ObservationStore {
    /// An empty store whose session slugs are prefixed with `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// One page of the filtered list. Page numbers start at 1.
    ///
    /// Pages past the end are empty with `has_next: false`.
    pub async fn list(
        &self,
        filters: &FilterState,
        page: u32,
        page_size: usize,
    ) -> ObservationPage {
        let inner = self.inner.read().await;
        let matching = inner.filtered(filters);
        let page_size = page_size.max(1);
        let start = (page.max(1) as usize - 1).saturating_mul(page_size);
        if start >= matching.len() {
            return ObservationPage::default();
        }
        let end = (start + page_size).min(matching.len());
        ObservationPage {
            observations: matching[start..end].iter().map(|o| o.summary()).collect(),
            has_next: end < matching.len(),
        }
    }

    /// Number of observations matching `filters`.
    pub async fn count(&self, filters: &FilterState) -> usize {
        self.inner.read().await.filtered(filters).len()
    }

    pub async fn detail(&self, key: &ObservationKey) -> Result<ObservationDetail, StarlogError> {
        self.inner
            .read()
            .await
            .observations
            .get(key)
            .map(StoredObservation::detail)
            .ok_or_else(|| not_found(key))
    }

    pub async fn delete(&self, key: &ObservationKey) -> Result<StoredObservation, StarlogError> {
        let removed = self.inner.write().await.observations.remove(key);
        match removed {
            Some(observation) => {
                info!(%key, "observation deleted");
                Ok(observation)
            }
            None => Err(not_found(key)),
        }
    }

    /// Sessions, latest start first.
    pub async fn sessions(&self) -> Vec<ObservingSession> {
        let mut sessions = self.inner.read().await.sessions.clone();
        sessions.sort_by(|a, b| b.datetime_start_ut.cmp(&a.datetime_start_ut));
        sessions
    }

    /// Validates and stores a session, generating its slug.
    pub async fn create_session(
        &self,
        new: NewSession,
        now: DateTime<Utc>,
    ) -> Result<ObservingSession, StarlogError> {
        validate_session(&new, now)?;

        let mut inner = self.inner.write().await;
        let slug = generate_session_slug(&self.owner, new.datetime_start_ut, |candidate| {
            inner.session(candidate).is_some()
        });
        inner.next_session_id += 1;
        let session = ObservingSession {
            id: inner.next_session_id,
            slug,
            datetime_start_ut: new.datetime_start_ut,
            datetime_end_ut: new.datetime_end_ut,
            site_name: new.site_name.trim().to_string(),
            created_at: now,
        };
        inner.sessions.push(session.clone());
        info!(slug = %session.slug, "session created");
        Ok(session)
    }

    /// Validates and stores a submitted observation form.
    pub async fn create_observation(
        &self,
        new: NewObservation,
        now: DateTime<Utc>,
    ) -> Result<ObservationDetail, StarlogError> {
        self.insert(new, now, None).await
    }

    /// Stores an observation with an explicit creation time and distance.
    pub(crate) async fn insert(
        &self,
        new: NewObservation,
        created_at: DateTime<Utc>,
        distance_light_years: Option<f64>,
    ) -> Result<ObservationDetail, StarlogError> {
        let ty = new.type_class;
        catalog::validate_fields(ty, &new.fields)?;

        let mut inner = self.inner.write().await;
        let date_time = inner
            .session(&new.session)
            .map(|s| s.datetime_start_ut)
            .ok_or_else(|| {
                StarlogError::Validation(format!("unknown observing session `{}`", new.session))
            })?;

        let id = {
            let next = inner.next_ids.entry(ty).or_insert(0);
            *next += 1;
            *next
        };
        let observation = StoredObservation {
            key: ObservationKey::new(ty, id),
            object_name: catalog::object_name(ty, &new.fields)
                .unwrap_or_else(|| ty.label().to_string()),
            session_slug: new.session,
            fields: new.fields,
            created_at,
            date_time,
            distance_light_years,
        };
        debug!(key = %observation.key, name = %observation.object_name, "observation stored");
        let detail = observation.detail();
        inner.observations.insert(observation.key, observation);
        Ok(detail)
    }
}

fn not_found(key: &ObservationKey) -> StarlogError {
    StarlogError::NotFound {
        kind: "observation".into(),
        id: key.to_string(),
    }
}

/// Session rules: start not in the future, end after start, short site name.
pub fn validate_session(new: &NewSession, now: DateTime<Utc>) -> Result<(), StarlogError> {
    if new.datetime_start_ut > now {
        return Err(StarlogError::Validation(
            "Start time cannot be in the future.".into(),
        ));
    }
    if let Some(end) = new.datetime_end_ut
        && end <= new.datetime_start_ut
    {
        return Err(StarlogError::Validation(
            "End time must be after start time.".into(),
        ));
    }
    if new.site_name.trim().chars().count() > MAX_SITE_NAME_CHARS {
        return Err(StarlogError::Validation(format!(
            "Site name must be at most {MAX_SITE_NAME_CHARS} characters."
        )));
    }
    Ok(())
}
