// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Range and format checks that serde cannot express.

use std::net::IpAddr;

use crate::diagnostic::ConfigError;
use crate::model::StarlogConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Problems found so far, keyed by dotted setting name.
#[derive(Default)]
struct Problems(Vec<ConfigError>);

impl Problems {
    fn add(&mut self, key: &'static str, problem: impl Into<String>) {
        let message = format!("{key} {}", problem.into());
        self.0.push(ConfigError::Validation { key, message });
    }

    fn check(&mut self, ok: bool, key: &'static str, problem: impl Into<String>) {
        if !ok {
            self.add(key, problem);
        }
    }
}

/// Checks every setting and reports all problems at once.
pub fn validate_config(config: &StarlogConfig) -> Result<(), Vec<ConfigError>> {
    let mut problems = Problems::default();

    let base_url = config.client.base_url.trim();
    match url::Url::parse(base_url) {
        Ok(url) => problems.check(
            matches!(url.scheme(), "http" | "https"),
            "client.base_url",
            format!("must use http or https, got `{}`", url.scheme()),
        ),
        Err(e) => problems.add("client.base_url", format!("`{base_url}` is not a valid URL: {e}")),
    }
    problems.check(
        config.client.request_timeout_secs != Some(0),
        "client.request_timeout_secs",
        "must be at least 1 when set",
    );

    problems.check(
        config.list.path.starts_with('/'),
        "list.path",
        format!("must start with `/`, got `{}`", config.list.path),
    );
    problems.check(
        config.list.add_path.starts_with('/'),
        "list.add_path",
        format!("must start with `/`, got `{}`", config.list.add_path),
    );
    problems.check(
        config.list.scroll_threshold_px > 0,
        "list.scroll_threshold_px",
        "must be greater than 0",
    );

    problems.check(
        config.toast.duration_ms > 0,
        "toast.duration_ms",
        "must be greater than 0",
    );

    let gateway = &config.gateway;
    problems.check(
        (1..=100).contains(&gateway.page_size),
        "gateway.page_size",
        format!("must be between 1 and 100, got {}", gateway.page_size),
    );
    let host = gateway.bind_address.trim();
    if host.is_empty() {
        problems.add("gateway.bind_address", "must not be empty");
    } else if host.parse::<IpAddr>().is_err() && !is_hostname(host) {
        problems.add(
            "gateway.bind_address",
            format!("`{host}` is not an IP address or hostname"),
        );
    }
    problems.check(
        gateway.csrf_token.as_deref().is_none_or(|t| !t.trim().is_empty()),
        "gateway.csrf_token",
        "must not be blank when set",
    );
    problems.check(
        !gateway.owner.is_empty() && gateway.owner.chars().all(|c| c.is_ascii_alphanumeric()),
        "gateway.owner",
        format!(
            "must be ASCII letters and digits only, got `{}`; it is the first segment of session slugs",
            gateway.owner
        ),
    );

    problems.check(
        LOG_LEVELS.contains(&config.logging.log_level.as_str()),
        "logging.log_level",
        format!(
            "must be one of {}, got `{}`",
            LOG_LEVELS.join(", "),
            config.logging.log_level
        ),
    );

    if problems.0.is_empty() {
        Ok(())
    } else {
        Err(problems.0)
    }
}

fn is_hostname(host: &str) -> bool {
    host.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
