// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of [`StarlogError`] onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use starlog_core::StarlogError;

/// Error body of every route except delete.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler error wrapper implementing [`IntoResponse`].
#[derive(Debug)]
pub struct ApiError(pub StarlogError);

impl From<StarlogError> for ApiError {
    fn from(err: StarlogError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for(&self.0)
    }
}

pub fn status_for(err: &StarlogError) -> StatusCode {
    match err {
        StarlogError::NotFound { .. } => StatusCode::NOT_FOUND,
        StarlogError::Precondition(_)
        | StarlogError::Validation(_)
        | StarlogError::Rejected { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let error = match self.0 {
            StarlogError::Validation(message) | StarlogError::Precondition(message) => message,
            StarlogError::Rejected { message } => message,
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
