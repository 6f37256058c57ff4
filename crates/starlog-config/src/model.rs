// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed `starlog.toml` tables.
//!
//! Every table denies unknown keys so a typo fails at load time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The whole configuration; every table may be omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StarlogConfig {
    /// HTTP client settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Observation list behavior.
    #[serde(default)]
    pub list: ListConfig,

    /// Notification settings.
    #[serde(default)]
    pub toast: ToastConfig,

    /// Gateway server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Origin of the Starlog server, e.g. `http://127.0.0.1:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client-side request timeout. Unset means the transport default applies.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// User-Agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_user_agent() -> String {
    format!("starlog/{}", env!("CARGO_PKG_VERSION"))
}

/// Observation list configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ListConfig {
    /// Path of the list page.
    #[serde(default = "default_list_path")]
    pub path: String,

    /// Path of the add-observation flow, linked from the empty state.
    #[serde(default = "default_add_path")]
    pub add_path: String,

    /// Remaining scroll distance (px) at which the next page loads.
    #[serde(default = "default_scroll_threshold_px")]
    pub scroll_threshold_px: u32,

    /// Quiet period before a search keystroke applies the filters.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Quiet period before a scroll event is checked.
    #[serde(default = "default_scroll_debounce_ms")]
    pub scroll_debounce_ms: u64,

    /// Row fade-out length before detachment.
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            path: default_list_path(),
            add_path: default_add_path(),
            scroll_threshold_px: default_scroll_threshold_px(),
            search_debounce_ms: default_search_debounce_ms(),
            scroll_debounce_ms: default_scroll_debounce_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

fn default_list_path() -> String {
    "/observations/list/".to_string()
}

fn default_add_path() -> String {
    "/observations/add/".to_string()
}

fn default_scroll_threshold_px() -> u32 {
    200
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_scroll_debounce_ms() -> u64 {
    100
}

fn default_fade_ms() -> u64 {
    300
}

/// Notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToastConfig {
    /// How long a toast stays visible.
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration_ms(),
        }
    }
}

impl ToastConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

fn default_toast_duration_ms() -> u64 {
    5000
}

/// Gateway server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Address to bind.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Observations per list page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Forgery-protection token. Generated at startup when unset.
    #[serde(default)]
    pub csrf_token: Option<String>,

    /// JSON fixture loaded into the store at startup.
    #[serde(default)]
    pub seed_path: Option<String>,

    /// Owner name that prefixes generated session slugs.
    #[serde(default = "default_owner")]
    pub owner: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            page_size: default_page_size(),
            csrf_token: None,
            seed_path: None,
            owner: default_owner(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_page_size() -> usize {
    10
}

fn default_owner() -> String {
    "observer".to_string()
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
