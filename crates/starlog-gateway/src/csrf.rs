// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Forgery-token check for state-changing routes.
//!
//! Unsafe requests must carry `X-CSRFToken` equal to the token the server
//! embeds in its list page. GET, HEAD and OPTIONS pass unchecked. Mismatches
//! are refused with 403 and a `{success: false, error}` body, which both the
//! delete flow and the add flow surface verbatim.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use starlog_core::DeleteResponse;
use starlog_core::routes::CSRF_HEADER;

pub const CSRF_FAILED: &str = "CSRF verification failed. Reload the page and try again.";

/// The token every state-changing request must present.
#[derive(Clone)]
pub struct CsrfToken(pub Arc<str>);

impl std::fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CsrfToken").field(&"[redacted]").finish()
    }
}

impl CsrfToken {
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self(token.into())
    }

    /// A random token for servers started without a configured one.
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub async fn csrf_middleware(
    State(expected): State<CsrfToken>,
    request: Request,
    next: Next,
) -> Response {
    if matches!(*request.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok());
    let present = presented.is_some();

    if presented == Some(expected.as_str()) {
        return next.run(request).await;
    }

    tracing::warn!(
        path = %request.uri().path(),
        present,
        "rejecting request with bad forgery token"
    );
    (
        StatusCode::FORBIDDEN,
        Json(DeleteResponse::failed(CSRF_FAILED)),
    )
        .into_response()
}
