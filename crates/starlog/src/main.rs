// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Starlog - a personal astronomical observation log.
//!
//! This is the binary entry point: it serves the gateway and drives the list
//! and add-observation controllers from a terminal.

mod add;
mod browse;
mod serve;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use starlog_config::StarlogConfig;
use starlog_core::{FilterState, StarlogError};

/// Starlog - a personal astronomical observation log.
#[derive(Parser, Debug)]
#[command(name = "starlog", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the observation gateway.
    Serve {
        /// Port to bind (overrides gateway.port).
        #[arg(long)]
        port: Option<u16>,
        /// JSON seed file (overrides gateway.seed_path).
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// List observations, loading further pages until exhausted.
    Browse {
        /// Session slug to filter by.
        #[arg(long)]
        session: Option<String>,
        /// Object type label to filter by, e.g. "Deep Sky".
        #[arg(long = "type")]
        object_type: Option<String>,
        /// Case-insensitive substring of the object name.
        #[arg(long)]
        search: Option<String>,
        /// Stop after loading this many additional pages.
        #[arg(long)]
        pages: Option<u32>,
    },
    /// Delete one observation after confirmation.
    Delete {
        /// Observation type key (solarsystem, star, deepsky, specialevent).
        type_class: String,
        id: u64,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Show one observation.
    Show { type_class: String, id: u64 },
    /// Add an observation interactively.
    Add,
    /// Print the effective configuration as TOML.
    Config,
}

fn browse_filters(
    session: Option<&str>,
    object_type: Option<&str>,
    search: Option<&str>,
) -> FilterState {
    FilterState::new(
        session.unwrap_or_default(),
        object_type.unwrap_or_default(),
        search.unwrap_or_default(),
    )
}

fn load_config(path: Option<&PathBuf>) -> StarlogConfig {
    let loaded = match path {
        Some(path) => starlog_config::load_and_validate_path(path),
        None => starlog_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            starlog_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("starlog={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

/// The configuration as TOML, with the forgery token masked.
fn render_config(config: &StarlogConfig) -> Result<String, StarlogError> {
    let mut shown = config.clone();
    if shown.gateway.csrf_token.is_some() {
        shown.gateway.csrf_token = Some("[redacted]".to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| StarlogError::Internal(format!("failed to render configuration: {e}")))
}

async fn run(cli: Cli, config: StarlogConfig) -> Result<(), StarlogError> {
    match cli.command {
        Some(Commands::Serve { port, seed }) => {
            serve::run_serve(&config, serve::ServeOverrides { port, seed }).await
        }
        Some(Commands::Browse {
            session,
            object_type,
            search,
            pages,
        }) => {
            let filters =
                browse_filters(session.as_deref(), object_type.as_deref(), search.as_deref());
            browse::run_browse(&config, filters, pages).await
        }
        Some(Commands::Delete {
            type_class,
            id,
            yes,
        }) => browse::run_delete(&config, &type_class, id, yes).await,
        Some(Commands::Show { type_class, id }) => {
            browse::run_show(&config, &type_class, id).await
        }
        Some(Commands::Add) => add::run_add(&config).await,
        Some(Commands::Config) => {
            print!("{}", render_config(&config)?);
            Ok(())
        }
        None => {
            println!("starlog: use --help for available commands");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config.logging.log_level);

    if let Err(e) = run(cli, config).await {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
