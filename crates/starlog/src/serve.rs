// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `starlog serve` command implementation.
//!
//! Builds the in-memory store (optionally seeded), resolves the forgery
//! token and runs the gateway until Ctrl+C.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use starlog_config::StarlogConfig;
use starlog_core::StarlogError;
use starlog_gateway::{
    CsrfToken, GatewaySettings, GatewayState, ObservationStore, ServerConfig, read_seed,
    start_server,
};
use tracing::{info, warn};

/// Command-line overrides of the `[gateway]` section.
#[derive(Debug, Default, Clone)]
pub struct ServeOverrides {
    pub port: Option<u16>,
    pub seed: Option<PathBuf>,
}

/// Gateway settings derived from configuration.
pub fn gateway_settings(config: &StarlogConfig) -> GatewaySettings {
    let csrf = match &config.gateway.csrf_token {
        Some(token) => CsrfToken::new(token.as_str()),
        None => {
            info!("no gateway.csrf_token configured; generated one for this run");
            CsrfToken::generate()
        }
    };
    GatewaySettings {
        list_path: config.list.path.clone(),
        add_path: config.list.add_path.clone(),
        page_size: config.gateway.page_size,
        csrf,
    }
}

async fn build_store(
    config: &StarlogConfig,
    seed: Option<&Path>,
) -> Result<ObservationStore, StarlogError> {
    let store = ObservationStore::new(config.gateway.owner.as_str());
    if let Some(path) = seed {
        let seed = read_seed(path).await?;
        store.load_seed(seed, Utc::now()).await?;
        info!(path = %path.display(), "store seeded");
    }
    Ok(store)
}

/// Runs the `starlog serve` command.
pub async fn run_serve(
    config: &StarlogConfig,
    overrides: ServeOverrides,
) -> Result<(), StarlogError> {
    let seed = overrides
        .seed
        .or_else(|| config.gateway.seed_path.as_ref().map(PathBuf::from));
    let store = build_store(config, seed.as_deref()).await?;

    let state = GatewayState::new(Arc::new(store), gateway_settings(config));
    let server = ServerConfig {
        host: config.gateway.bind_address.clone(),
        port: overrides.port.unwrap_or(config.gateway.port),
    };

    start_server(&server, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("shutdown requested");
    })
    .await
}
