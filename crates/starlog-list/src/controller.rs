// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The observation list controller.
//!
//! Owns the filter set, the pagination cursor and the rendered rows of one
//! list page. Page 1 is delivered with the page itself; the controller only
//! ever fetches page 2 onwards.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use starlog_config::model::ListConfig;
use starlog_core::routes;
use starlog_core::{
    FilterField, FilterState, ListView, Navigator, Notifier, ObservationApi, ObservationKey,
    ObservationRow, ObservationType, Prompt, StarlogError, Toast,
};
use tracing::{debug, info, warn};

use crate::debounce::Debouncer;
use crate::filter::{list_url, parse_query};
use crate::scroll::near_bottom;

const CONFIRM_DELETE: &str =
    "Are you sure you want to delete this observation? This action cannot be undone.";
const LOAD_FAILED: &str = "Failed to load more observations. Please try again.";
const DELETE_FAILED: &str = "An error occurred while deleting the observation.";
const DELETED: &str = "Observation deleted successfully.";
const MISSING_TOKEN: &str = "Security token not found. Please refresh the page and try again.";

/// Initial state embedded in the server-rendered page.
#[derive(Debug, Clone, Default)]
pub struct ListContext {
    /// Path of the list page, without query string.
    pub path: String,
    /// The page URL's query string (leading `?` optional).
    pub query: String,
    /// The sentinel's initial "more pages" flag.
    pub has_more: bool,
    /// Forgery-protection token from the page's hidden field, if present.
    pub csrf_token: Option<String>,
    /// Target of the empty-state link.
    pub add_url: String,
}

/// Timing and threshold knobs.
#[derive(Debug, Clone)]
pub struct ListSettings {
    /// Distance from the bottom, in pixels, at which scrolling loads the next page.
    pub scroll_threshold_px: u32,
    /// Quiet period after the last search keystroke before filters apply.
    pub search_debounce: Duration,
    /// Quiet period after the last scroll event before the position is checked.
    pub scroll_debounce: Duration,
    /// How long a deleted row fades before it is detached.
    pub fade: Duration,
}

impl From<&ListConfig> for ListSettings {
    fn from(config: &ListConfig) -> Self {
        Self {
            scroll_threshold_px: config.scroll_threshold_px,
            search_debounce: Duration::from_millis(config.search_debounce_ms),
            scroll_debounce: Duration::from_millis(config.scroll_debounce_ms),
            fade: Duration::from_millis(config.fade_ms),
        }
    }
}

impl Default for ListSettings {
    fn default() -> Self {
        Self::from(&ListConfig::default())
    }
}

/// Everything the controller talks to.
#[derive(Clone)]
pub struct ListCollaborators {
    pub api: Arc<dyn ObservationApi>,
    pub view: Arc<dyn ListView>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub prompt: Arc<dyn Prompt>,
}

/// Result of a [`ObservationListController::load_more`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A fetch was already in flight, or there is nothing left to load.
    Skipped,
    /// Rows were appended and the cursor advanced.
    Appended { rows: usize, has_more: bool },
    /// The next page came back empty.
    Exhausted,
}

/// Result of a [`ObservationListController::delete_observation`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    /// The user declined the confirmation.
    Cancelled,
    /// A delete for this row is already in flight.
    AlreadyPending,
    /// The row was deleted and detached.
    Deleted,
}

#[derive(Debug, Clone, Copy)]
struct PageCursor {
    current_page: u32,
    has_more: bool,
}

/// Clears the loading flag however the fetch ends.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Filterable, incrementally loaded observation list with per-row delete.
pub struct ObservationListController {
    api: Arc<dyn ObservationApi>,
    view: Arc<dyn ListView>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    prompt: Arc<dyn Prompt>,
    settings: ListSettings,
    path: String,
    add_url: String,
    csrf_token: Option<String>,
    filters: FilterState,
    cursor: Mutex<PageCursor>,
    loading: AtomicBool,
    deleting: Mutex<HashSet<ObservationKey>>,
    search_debounce: Debouncer,
    scroll_debounce: Debouncer,
}

impl ObservationListController {
    /// Hydrates the controller from the page and reflects the filters into the controls.
    pub fn new(
        context: ListContext,
        collaborators: ListCollaborators,
        settings: ListSettings,
    ) -> Arc<Self> {
        let filters = parse_query(&context.query);
        collaborators.view.set_filter_inputs(&filters);
        debug!(
            path = %context.path,
            ?filters,
            has_more = context.has_more,
            "observation list initialized"
        );

        Arc::new(Self {
            api: collaborators.api,
            view: collaborators.view,
            notifier: collaborators.notifier,
            navigator: collaborators.navigator,
            prompt: collaborators.prompt,
            search_debounce: Debouncer::new(settings.search_debounce),
            scroll_debounce: Debouncer::new(settings.scroll_debounce),
            settings,
            path: context.path,
            add_url: context.add_url,
            csrf_token: context.csrf_token,
            filters,
            cursor: Mutex::new(PageCursor {
                current_page: 1,
                has_more: context.has_more,
            }),
            loading: AtomicBool::new(false),
            deleting: Mutex::new(HashSet::new()),
        })
    }

    /// Filters this list was loaded with.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn current_page(&self) -> u32 {
        self.cursor().current_page
    }

    pub fn has_more(&self) -> bool {
        self.cursor().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Navigates to the list filtered by the current control values.
    ///
    /// Returns the URL navigated to.
    pub fn apply_filters(&self) -> String {
        self.search_debounce.cancel();
        let filters = self.view.filter_inputs().normalized();
        let url = list_url(&self.path, &filters);
        info!(%url, "applying list filters");
        self.navigator.navigate(&url);
        url
    }

    /// Clears every filter control and navigates to the bare list path.
    pub fn clear_filters(&self) -> String {
        self.search_debounce.cancel();
        self.view.set_filter_inputs(&FilterState::default());
        info!(path = %self.path, "clearing list filters");
        self.navigator.navigate(&self.path);
        self.path.clone()
    }

    /// Reacts to a filter control change.
    ///
    /// Session and type changes apply at once; search keystrokes apply after
    /// the search quiet period.
    pub fn on_filter_changed(self: &Arc<Self>, field: FilterField) {
        match field {
            FilterField::Session | FilterField::ObjectType => {
                self.apply_filters();
            }
            FilterField::Search => {
                let this = Arc::clone(self);
                self.search_debounce.call(move || async move {
                    this.apply_filters();
                });
            }
        }
    }

    /// Reacts to a scroll event: after the scroll quiet period, loads the
    /// next page if the viewport is near the bottom.
    pub fn on_scroll(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.scroll_debounce.call(move || async move {
            let metrics = this.view.scroll_metrics();
            if near_bottom(&metrics, this.settings.scroll_threshold_px)
                && let Err(e) = this.load_more().await
            {
                debug!(error = %e, "scroll-triggered load failed");
            }
        });
    }

    /// Fetches and appends the next page.
    ///
    /// At most one fetch is in flight at a time; calls made meanwhile, or
    /// after the list is exhausted, return [`LoadOutcome::Skipped`]. A failed
    /// fetch leaves the cursor untouched so the next trigger retries.
    pub async fn load_more(&self) -> Result<LoadOutcome, StarlogError> {
        if !self.has_more() {
            return Ok(LoadOutcome::Skipped);
        }
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("load already in flight");
            return Ok(LoadOutcome::Skipped);
        }
        let _guard = LoadingGuard(&self.loading);

        let next_page = self.current_page() + 1;
        debug!(page = next_page, "loading next page");

        let page = match self
            .api
            .fetch_page(&self.path, &self.filters, next_page)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!(page = next_page, error = %e, "failed to load observations");
                self.notifier.notify(Toast::error(LOAD_FAILED));
                return Err(e);
            }
        };

        if page.observations.is_empty() {
            self.cursor().has_more = false;
            self.ensure_end_sentinel();
            info!(page = next_page, "observation list exhausted");
            return Ok(LoadOutcome::Exhausted);
        }

        let now = Utc::now();
        for summary in &page.observations {
            self.view
                .append_row(&ObservationRow::from_summary(summary, now));
        }
        {
            let mut cursor = self.cursor();
            cursor.current_page = next_page;
            cursor.has_more = page.has_next;
        }
        if !page.has_next {
            self.ensure_end_sentinel();
        }

        let rows = page.observations.len();
        debug!(page = next_page, rows, has_more = page.has_next, "page appended");
        Ok(LoadOutcome::Appended {
            rows,
            has_more: page.has_next,
        })
    }

    /// Confirms, then deletes one observation and removes its row.
    ///
    /// Failures re-enable the row's delete control, show an error toast and
    /// are returned to the caller.
    pub async fn delete_observation(
        &self,
        id: u64,
        type_class: &str,
    ) -> Result<DeleteStatus, StarlogError> {
        let key = ObservationKey::new(self.parse_type(type_class)?, id);
        if self.deleting().contains(&key) {
            return Ok(DeleteStatus::AlreadyPending);
        }

        if !self.prompt.confirm(CONFIRM_DELETE) {
            debug!(%key, "delete cancelled");
            return Ok(DeleteStatus::Cancelled);
        }

        let Some(token) = self.csrf_token.as_deref().filter(|t| !t.trim().is_empty()) else {
            warn!(%key, "delete aborted: forgery-protection token missing");
            self.notifier.notify(Toast::error(MISSING_TOKEN));
            return Err(StarlogError::Precondition(MISSING_TOKEN.to_string()));
        };

        if !self.deleting().insert(key) {
            return Ok(DeleteStatus::AlreadyPending);
        }
        self.view.set_delete_busy(&key, true);
        info!(%key, "deleting observation");

        let outcome = match self.api.delete_observation(&key, token).await {
            Ok(response) if response.success => Ok(response.message),
            Ok(response) => Err(StarlogError::Rejected {
                message: response.error.unwrap_or_default(),
            }),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(message) => {
                let message = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DELETED.to_string());
                self.notifier.notify(Toast::success(message));

                self.view.begin_row_removal(&key);
                tokio::time::sleep(self.settings.fade).await;
                self.view.detach_row(&key);
                self.deleting().remove(&key);
                self.refresh_count();
                Ok(DeleteStatus::Deleted)
            }
            Err(e) => {
                warn!(%key, error = %e, "delete failed");
                self.deleting().remove(&key);
                self.view.set_delete_busy(&key, false);
                self.notifier.notify(Toast::error(e.user_message(DELETE_FAILED)));
                Err(e)
            }
        }
    }

    /// Navigates to an observation's detail page.
    pub fn navigate_to_detail(&self, id: u64, type_class: &str) -> Result<String, StarlogError> {
        let key = ObservationKey::new(self.parse_type(type_class)?, id);
        let url = routes::detail_path(&key);
        self.navigator.navigate(&url);
        Ok(url)
    }

    /// Validates a row's `type_class` before it is put into a URL.
    fn parse_type(&self, type_class: &str) -> Result<ObservationType, StarlogError> {
        type_class.parse().map_err(|_| {
            let message = format!("Unknown observation type `{type_class}`.");
            warn!(type_class, "rejecting unknown observation type");
            self.notifier.notify(Toast::error(message.clone()));
            StarlogError::Precondition(message)
        })
    }

    fn ensure_end_sentinel(&self) {
        if !self.view.has_end_sentinel() {
            self.view.insert_end_sentinel();
        }
    }

    fn refresh_count(&self) {
        let count = self.view.row_count();
        let label = if count == 1 { "observation" } else { "observations" };
        self.view.set_count(count, label);
        if count == 0 {
            self.view.show_empty_state(&self.add_url);
        }
    }

    fn cursor(&self) -> MutexGuard<'_, PageCursor> {
        self.cursor.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn deleting(&self) -> MutexGuard<'_, HashSet<ObservationKey>> {
        self.deleting.lock().unwrap_or_else(|e| e.into_inner())
    }
}
