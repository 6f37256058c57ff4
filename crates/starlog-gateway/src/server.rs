// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use starlog_core::StarlogError;
use starlog_core::routes::SESSIONS_PATH;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::csrf::{CsrfToken, csrf_middleware};
use crate::handlers;
use crate::store::ObservationStore;

pub const DETAIL_ROUTE: &str = "/observations/detail/{type_class}/{id}/";
pub const DELETE_ROUTE: &str = "/observations/delete/{type_class}/{id}/";

/// Request-independent gateway settings (mirrors `[gateway]`/`[list]` config).
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub list_path: String,
    pub add_path: String,
    /// Observations per list page.
    pub page_size: usize,
    pub csrf: CsrfToken,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub store: Arc<ObservationStore>,
    pub settings: Arc<GatewaySettings>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl GatewayState {
    pub fn new(store: Arc<ObservationStore>, settings: GatewaySettings) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Address to bind.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the application router.
///
/// Routes:
/// - GET `<list_path>` (HTML page, or JSON with `X-Requested-With`)
/// - GET `/observations/detail/{type_class}/{id}/`
/// - POST `/observations/delete/{type_class}/{id}/`
/// - GET/POST `<add_path>` (form catalog / create)
/// - GET/POST `/sessions/`
/// - GET `/health`
///
/// Every POST must carry the forgery token.
pub fn build_router(state: GatewayState) -> Router {
    let csrf = state.settings.csrf.clone();
    let list_path = state.settings.list_path.clone();
    let add_path = state.settings.add_path.clone();

    Router::new()
        .route("/health", get(handlers::get_health))
        .route(&list_path, get(handlers::get_list))
        .route(DETAIL_ROUTE, get(handlers::get_detail))
        .route(DELETE_ROUTE, post(handlers::post_delete))
        .route(
            &add_path,
            get(handlers::get_add_catalog).post(handlers::post_add),
        )
        .route(
            SESSIONS_PATH,
            get(handlers::get_sessions).post(handlers::post_session),
        )
        .route_layer(axum_middleware::from_fn_with_state(csrf, csrf_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `config` and serves until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), StarlogError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| StarlogError::transport(format!("failed to bind gateway to {addr}: {e}"), e))?;

    tracing::info!("Gateway server listening on {addr}");
    serve_on(listener, state, shutdown).await
}

/// Serves on an already bound listener until `shutdown` resolves.
pub async fn serve_on(
    listener: TcpListener,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), StarlogError> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| StarlogError::transport(format!("gateway server error: {e}"), e))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
