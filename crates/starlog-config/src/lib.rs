// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Starlog configuration: the `[client]`, `[list]`, `[toast]`, `[gateway]`
//! and `[logging]` tables of `starlog.toml`.
//!
//! Unknown keys are rejected, and every problem is reported at once as a
//! miette diagnostic.
//!
//! ```no_run
//! let config = starlog_config::load_and_validate().expect("config errors");
//! println!("gateway at {}", config.client.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::StarlogConfig;

/// Loads from the search paths and environment, then validates.
pub fn load_and_validate() -> Result<StarlogConfig, Vec<ConfigError>> {
    finish(loader::load_config(), || {
        loader::search_paths()
            .into_iter()
            .filter_map(|path| read_source(&path))
            .collect()
    })
}

/// Loads from `path` and the environment, then validates.
pub fn load_and_validate_path(path: &Path) -> Result<StarlogConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Loads a TOML document over the defaults, then validates.
pub fn load_and_validate_str(toml_content: &str) -> Result<StarlogConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

#[allow(clippy::result_large_err)]
fn finish(
    loaded: Result<StarlogConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<StarlogConfig, Vec<ConfigError>> {
    let config = loaded.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    tracing::debug!(
        base_url = %config.client.base_url,
        list = %config.list.path,
        "configuration loaded"
    );
    Ok(config)
}

/// `(display path, content)` of a config file, for pointing diagnostics at it.
///
/// Figment records relative files by their absolute path, so relative paths
/// are resolved against the working directory first.
fn read_source(path: &Path) -> Option<(String, String)> {
    let path = std::path::absolute(path).ok()?;
    let content = std::fs::read_to_string(&path).ok()?;
    Some((path.display().to_string(), content))
}
