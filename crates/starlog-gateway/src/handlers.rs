// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the observation and session routes.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use starlog_core::routes::{AJAX_HEADER, AJAX_HEADER_VALUE};
use starlog_core::types::{NewObservation, NewSession, ObservationDetail, ObservingSession};
use starlog_core::{
    DeleteResponse, FilterState, ObservationKey, ObservationRow, ObservationType, StarlogError,
};
use starlog_forms::catalog::{self, FieldSpec};
use strum::IntoEnumIterator;

use crate::error::ApiError;
use crate::render::{ListPage, render_list_page};
use crate::server::GatewayState;

pub const DELETED: &str = "Observation deleted successfully.";
pub const NOT_FOUND: &str = "Observation not found.";

/// Query string of the list route.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    /// Kept as text: anything that is not a positive integer means page 1.
    #[serde(default)]
    pub page: Option<String>,
}

impl ListQuery {
    fn filters(&self) -> FilterState {
        FilterState {
            session: self.session.clone(),
            object_type: self.object_type.clone(),
            search: self.search.clone(),
        }
        .normalized()
    }

    fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub observations: usize,
}

/// One entry of the add route's form catalog.
#[derive(Debug, Serialize)]
pub struct FormCatalog {
    pub type_class: ObservationType,
    pub label: &'static str,
    pub fields: Vec<&'static FieldSpec>,
}

fn is_programmatic(headers: &HeaderMap) -> bool {
    headers
        .get(AJAX_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case(AJAX_HEADER_VALUE))
}

/// Parses the `{type_class}/{id}` path segments; `None` for anything unknown.
fn parse_key(type_class: &str, id: &str) -> Option<ObservationKey> {
    let ty = type_class.parse::<ObservationType>().ok()?;
    let id = id.parse::<u64>().ok()?;
    Some(ObservationKey::new(ty, id))
}

/// GET `<list_path>`: JSON page for programmatic requests, HTML otherwise.
pub async fn get_list(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let filters = query.filters();
    let page_number = query.page();
    let page = state
        .store
        .list(&filters, page_number, state.settings.page_size)
        .await;

    if is_programmatic(&headers) {
        tracing::debug!(
            page = page_number,
            returned = page.observations.len(),
            has_next = page.has_next,
            "serving observation page"
        );
        return Json(page).into_response();
    }

    let now = Utc::now();
    let rows: Vec<ObservationRow> = page
        .observations
        .iter()
        .map(|s| ObservationRow::from_summary(s, now))
        .collect();
    let total = state.store.count(&filters).await;
    let session_slugs: Vec<String> = state
        .store
        .sessions()
        .await
        .into_iter()
        .map(|s| s.slug)
        .collect();

    Html(render_list_page(&ListPage {
        list_path: &state.settings.list_path,
        add_path: &state.settings.add_path,
        csrf_token: state.settings.csrf.as_str(),
        filters: &filters,
        session_slugs: &session_slugs,
        rows: &rows,
        total,
        has_more: page.has_next,
    }))
    .into_response()
}

/// POST `/observations/delete/{type_class}/{id}/`.
pub async fn post_delete(
    State(state): State<GatewayState>,
    Path((type_class, id)): Path<(String, String)>,
) -> (StatusCode, Json<DeleteResponse>) {
    let Some(key) = parse_key(&type_class, &id) else {
        tracing::debug!(%type_class, %id, "delete for unknown observation path");
        return (StatusCode::NOT_FOUND, Json(DeleteResponse::failed(NOT_FOUND)));
    };

    match state.store.delete(&key).await {
        Ok(_) => (StatusCode::OK, Json(DeleteResponse::deleted(DELETED))),
        Err(StarlogError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, Json(DeleteResponse::failed(NOT_FOUND)))
        }
        Err(e) => {
            tracing::error!(%key, error = %e, "delete failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeleteResponse::failed(e.to_string())),
            )
        }
    }
}

/// GET `/observations/detail/{type_class}/{id}/`.
pub async fn get_detail(
    State(state): State<GatewayState>,
    Path((type_class, id)): Path<(String, String)>,
) -> Result<Json<ObservationDetail>, ApiError> {
    let key = parse_key(&type_class, &id).ok_or_else(|| StarlogError::NotFound {
        kind: "observation".into(),
        id: format!("{type_class}/{id}"),
    })?;
    Ok(Json(state.store.detail(&key).await?))
}

/// GET `<add_path>`: the per-type form definitions.
pub async fn get_add_catalog() -> Json<Vec<FormCatalog>> {
    Json(
        ObservationType::iter()
            .map(|ty| FormCatalog {
                type_class: ty,
                label: ty.label(),
                fields: catalog::fields_for(ty).collect(),
            })
            .collect(),
    )
}

/// POST `<add_path>`: creates an observation in an existing session.
pub async fn post_add(
    State(state): State<GatewayState>,
    Json(new): Json<NewObservation>,
) -> Result<(StatusCode, Json<ObservationDetail>), ApiError> {
    let detail = state.store.create_observation(new, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET `/sessions/`.
pub async fn get_sessions(State(state): State<GatewayState>) -> Json<Vec<ObservingSession>> {
    Json(state.store.sessions().await)
}

/// POST `/sessions/`.
pub async fn post_session(
    State(state): State<GatewayState>,
    Json(new): Json<NewSession>,
) -> Result<(StatusCode, Json<ObservingSession>), ApiError> {
    let session = state.store.create_session(new, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET `/health`.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        observations: state.store.count(&FilterState::default()).await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_page_numbers_fall_back_to_first() {
        for raw in ["", "0", "-3", "abc", "2.5"] {
            let query = ListQuery {
                page: Some(raw.to_string()),
                ..Default::default()
            };
            assert_eq!(query.page(), 1, "page {raw:?}");
        }
        let query = ListQuery {
            page: Some(" 4 ".into()),
            ..Default::default()
        };
        assert_eq!(query.page(), 4);
    }

    #[test]
    fn blank_filters_are_dropped() {
        let query = ListQuery {
            session: Some(String::new()),
            object_type: Some("Star".into()),
            search: Some("  ".into()),
            page: None,
        };
        assert_eq!(query.filters(), FilterState::new("", "Star", ""));
    }

    #[test]
    fn key_parsing_rejects_unknown_segments() {
        assert_eq!(
            parse_key("deepsky", "12"),
            Some(ObservationKey::new(ObservationType::DeepSky, 12))
        );
        assert!(parse_key("asteroid", "1").is_none());
        assert!(parse_key("star", "x").is_none());
    }

    #[test]
    fn programmatic_marker_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_programmatic(&headers));
        headers.insert(AJAX_HEADER, AJAX_HEADER_VALUE.parse().unwrap());
        assert!(is_programmatic(&headers));
    }
}
