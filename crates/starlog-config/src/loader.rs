// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered loading of `starlog.toml`.
//!
//! Compiled defaults come first, then each file from [`search_paths`] that
//! exists, then `STARLOG_*` variables. Later layers win.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use crate::model::StarlogConfig;

/// Tables that `STARLOG_<TABLE>_<KEY>` variables may address.
const SECTIONS: [&str; 5] = ["client", "list", "toast", "gateway", "logging"];

/// Config files in merge order: system, then user, then working directory.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/starlog/starlog.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("starlog").join("starlog.toml"));
    }
    paths.push(PathBuf::from("starlog.toml"));
    paths
}

/// Loads from the search paths plus the environment.
pub fn load_config() -> Result<StarlogConfig, figment::Error> {
    build_figment().extract()
}

/// Loads one TOML document over the defaults, ignoring files and environment.
pub fn load_config_from_str(toml_content: &str) -> Result<StarlogConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Loads one file (instead of the search paths) plus the environment.
pub fn load_config_from_path(path: &Path) -> Result<StarlogConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

pub fn build_figment() -> Figment {
    search_paths()
        .into_iter()
        .fold(defaults(), |figment, path| figment.merge(Toml::file(path)))
        .merge(env_provider())
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(StarlogConfig::default()))
}

/// Maps `STARLOG_LIST_SCROLL_THRESHOLD_PX` to `list.scroll_threshold_px`.
///
/// Only the first underscore after the table name separates; keys keep theirs.
fn env_provider() -> Env {
    Env::prefixed("STARLOG_").map(|key| {
        let key = key.as_str();
        SECTIONS
            .iter()
            .find_map(|section| {
                let rest = key.strip_prefix(section)?.strip_prefix('_')?;
                Some(format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key.to_string())
            .into()
    })
}
