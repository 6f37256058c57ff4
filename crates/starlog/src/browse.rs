// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `starlog browse`, `starlog delete` and `starlog show`.
//!
//! Each command hydrates an [`ObservationListController`] from the gateway's
//! list page exactly as a browser would: the HTML page supplies the
//! `has_more` flag and the forgery token, and the first JSON page stands in
//! for the server-rendered rows.

use std::sync::Arc;

use chrono::Utc;
use colored::Colorize;
use starlog_client::HttpObservationApi;
use starlog_config::StarlogConfig;
use starlog_core::{FilterState, ObservationApi, ObservationKey, ObservationRow, StarlogError};
use starlog_list::{
    DeleteStatus, ListCollaborators, ListContext, ListSettings, LoadOutcome,
    ObservationListController, ToastStack,
};
use tracing::{debug, info};

use crate::terminal::{StdinPrompt, TerminalListView, TerminalNavigator, ToastPrinter};

/// A hydrated list plus the terminal pieces attached to it.
pub struct TerminalList {
    pub api: Arc<HttpObservationApi>,
    pub controller: Arc<ObservationListController>,
    pub toasts: ToastPrinter,
}

/// Loads the list page for `filters` and builds its controller.
///
/// With `print_first_page`, the first page is printed as the browser would
/// render it; otherwise its rows are attached silently.
pub async fn open_list(
    config: &StarlogConfig,
    filters: &FilterState,
    assume_yes: bool,
    print_first_page: bool,
) -> Result<TerminalList, StarlogError> {
    let api = Arc::new(HttpObservationApi::new(&config.client)?);
    let list_path = config.list.path.as_str();

    let bootstrap = api.fetch_bootstrap(list_path, filters).await?;
    let first = api.fetch_page(list_path, filters, 1).await?;
    debug!(
        rows = first.observations.len(),
        has_more = bootstrap.has_more,
        "list page loaded"
    );

    let now = Utc::now();
    let rows: Vec<ObservationRow> = first
        .observations
        .iter()
        .map(|s| ObservationRow::from_summary(s, now))
        .collect();
    let view = if print_first_page {
        let view = TerminalListView::new();
        if rows.is_empty() {
            println!("No observations yet. Add one at {}", config.list.add_path.underline());
        }
        view.show_initial(rows);
        Arc::new(view)
    } else {
        Arc::new(TerminalListView::with_rows(rows))
    };

    let toast_stack = ToastStack::new(config.toast.duration());
    let toasts = ToastPrinter::new(toast_stack.subscribe());

    let controller = ObservationListController::new(
        ListContext {
            path: list_path.to_string(),
            query: query_string(filters),
            has_more: bootstrap.has_more,
            csrf_token: bootstrap.csrf_token,
            add_url: config.list.add_path.clone(),
        },
        ListCollaborators {
            api: api.clone(),
            view,
            notifier: Arc::new(toast_stack),
            navigator: Arc::new(TerminalNavigator),
            prompt: Arc::new(StdinPrompt { assume_yes }),
        },
        ListSettings::from(&config.list),
    );

    Ok(TerminalList {
        api,
        controller,
        toasts,
    })
}

/// The list URL query string for `filters`.
fn query_string(filters: &FilterState) -> String {
    starlog_list::encode_query(filters, None)
}

/// Prints the list, then loads further pages until exhausted or `max_pages`
/// additional pages have been fetched.
pub async fn run_browse(
    config: &StarlogConfig,
    filters: FilterState,
    max_pages: Option<u32>,
) -> Result<(), StarlogError> {
    let mut list = open_list(config, &filters, false, true).await?;
    let mut loaded = 0u32;

    loop {
        if max_pages.is_some_and(|max| loaded >= max) {
            break;
        }
        // Terminal output has no viewport, so the scroll check always passes.
        let outcome = list.controller.load_more().await;
        list.toasts.drain();
        match outcome? {
            LoadOutcome::Appended { has_more, .. } => {
                loaded += 1;
                if !has_more {
                    break;
                }
            }
            LoadOutcome::Exhausted | LoadOutcome::Skipped => break,
        }
    }

    if list.controller.has_more() {
        println!(
            "{}",
            format!("more available: {}", list.controller.apply_filters()).dimmed()
        );
    }
    info!(pages = list.controller.current_page(), "browse finished");
    Ok(())
}

/// Deletes one observation through the list controller.
pub async fn run_delete(
    config: &StarlogConfig,
    type_class: &str,
    id: u64,
    assume_yes: bool,
) -> Result<(), StarlogError> {
    let mut list = open_list(config, &FilterState::default(), assume_yes, false).await?;
    let outcome = list.controller.delete_observation(id, type_class).await;
    list.toasts.drain();
    match outcome? {
        DeleteStatus::Deleted => info!(type_class, id, "observation deleted"),
        DeleteStatus::Cancelled => println!("{}", "Delete cancelled.".dimmed()),
        DeleteStatus::AlreadyPending => {}
    }
    Ok(())
}

/// Prints one observation's detail record.
pub async fn run_show(
    config: &StarlogConfig,
    type_class: &str,
    id: u64,
) -> Result<(), StarlogError> {
    let mut list = open_list(config, &FilterState::default(), true, false).await?;
    let navigated = list.controller.navigate_to_detail(id, type_class);
    list.toasts.drain();
    navigated?;

    let ty = type_class.parse().map_err(|_| {
        StarlogError::Precondition(format!("Unknown observation type `{type_class}`."))
    })?;
    let key = ObservationKey::new(ty, id);
    let detail = list.api.observation_detail(&key).await?;

    println!("{}", detail.summary.object_name.bold());
    println!("  {:<14} {}", "type", detail.summary.object_type);
    println!("  {:<14} {}", "session", detail.summary.session_slug);
    println!(
        "  {:<14} {}",
        "observed",
        detail.summary.date_time.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(distance) = &detail.distance_display {
        println!("  {:<14} {}", "distance", distance);
    }
    for (name, value) in &detail.fields {
        let shown = starlog_forms::catalog::display_value(key.type_class, name, value);
        println!("  {:<14} {}", name.replace('_', " "), shown);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_is_canonical_and_bare() {
        assert_eq!(query_string(&FilterState::default()), "");
        assert_eq!(
            query_string(&FilterState::new("S1", "Deep Sky", "m 31")),
            "session=S1&object_type=Deep+Sky&search=m+31"
        );
    }
}
