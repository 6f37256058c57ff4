// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the observation list controller.

use std::sync::Arc;
use std::time::Duration;

use starlog_core::{
    DeleteResponse, FilterField, FilterState, ObservationKey, ObservationRow, ObservationType,
    ScrollMetrics, Severity, StarlogError,
};
use starlog_list::{
    DeleteStatus, ListCollaborators, ListContext, ListSettings, LoadOutcome,
    ObservationListController,
};
use starlog_test_utils::fixtures::{page, reference_time, summary};
use starlog_test_utils::{
    MockApi, RecordingListView, RecordingNavigator, RecordingNotifier, ScriptedPrompt,
};

const LIST: &str = "/observations/list/";
const ADD: &str = "/observations/add/";

struct Harness {
    api: Arc<MockApi>,
    view: Arc<RecordingListView>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
    prompt: Arc<ScriptedPrompt>,
    controller: Arc<ObservationListController>,
}

struct HarnessBuilder {
    api: MockApi,
    view: RecordingListView,
    prompt: ScriptedPrompt,
    context: ListContext,
}

impl HarnessBuilder {
    fn new() -> Self {
        Self {
            api: MockApi::new(),
            view: RecordingListView::new(),
            prompt: ScriptedPrompt::accepting(),
            context: ListContext {
                path: LIST.to_string(),
                query: String::new(),
                has_more: true,
                csrf_token: Some("tok".to_string()),
                add_url: ADD.to_string(),
            },
        }
    }

    fn api(mut self, api: MockApi) -> Self {
        self.api = api;
        self
    }

    /// Seeds the first page with `solarsystem` rows.
    fn rows(mut self, ids: &[u64]) -> Self {
        let rows = ids
            .iter()
            .map(|&id| ObservationRow::from_summary(&summary(id, "solarsystem"), reference_time()))
            .collect();
        self.view = RecordingListView::with_rows(rows);
        self
    }

    fn prompt(mut self, prompt: ScriptedPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    fn query(mut self, query: &str) -> Self {
        self.context.query = query.to_string();
        self
    }

    fn has_more(mut self, has_more: bool) -> Self {
        self.context.has_more = has_more;
        self
    }

    fn csrf_token(mut self, token: Option<&str>) -> Self {
        self.context.csrf_token = token.map(str::to_string);
        self
    }

    fn build(self) -> Harness {
        let api = Arc::new(self.api);
        let view = Arc::new(self.view);
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let prompt = Arc::new(self.prompt);
        let controller = ObservationListController::new(
            self.context,
            ListCollaborators {
                api: api.clone(),
                view: view.clone(),
                notifier: notifier.clone(),
                navigator: navigator.clone(),
                prompt: prompt.clone(),
            },
            ListSettings::default(),
        );
        Harness {
            api,
            view,
            notifier,
            navigator,
            prompt,
            controller,
        }
    }
}

fn key(id: u64) -> ObservationKey {
    ObservationKey::new(ObservationType::SolarSystem, id)
}

// --- filters ---

#[tokio::test]
async fn filters_are_hydrated_from_the_page_url() {
    let h = HarnessBuilder::new()
        .query("?session=S1&search=orion")
        .build();

    let expected = FilterState::new("S1", "", "orion");
    assert_eq!(h.controller.filters(), &expected);
    assert_eq!(h.view.snapshot().inputs, expected);
}

#[tokio::test]
async fn apply_filters_navigates_with_canonical_query() {
    let h = HarnessBuilder::new().build();
    h.view.type_filters(FilterState::new("S1", "", "orion"));

    let url = h.controller.apply_filters();

    assert_eq!(url, "/observations/list/?session=S1&search=orion");
    assert_eq!(h.navigator.urls(), vec![url]);
}

#[tokio::test]
async fn apply_filters_without_values_navigates_to_bare_path() {
    let h = HarnessBuilder::new().build();
    h.view.type_filters(FilterState::new(" ", "", ""));

    assert_eq!(h.controller.apply_filters(), LIST);
}

#[tokio::test]
async fn clear_filters_resets_controls_and_navigates() {
    let h = HarnessBuilder::new()
        .query("?session=S1&object_type=Planet")
        .build();

    let url = h.controller.clear_filters();

    assert_eq!(url, LIST);
    assert!(h.view.snapshot().inputs.is_empty());
    assert_eq!(h.navigator.last().as_deref(), Some(LIST));
}

#[tokio::test]
async fn select_changes_apply_immediately() {
    let h = HarnessBuilder::new().build();
    h.view.type_filters(FilterState::new("", "Star", ""));

    h.controller.on_filter_changed(FilterField::ObjectType);

    assert_eq!(
        h.navigator.urls(),
        vec!["/observations/list/?object_type=Star".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn search_typing_is_debounced() {
    let h = HarnessBuilder::new().build();

    for text in ["o", "or", "orion"] {
        h.view.type_filters(FilterState::new("", "", text));
        h.controller.on_filter_changed(FilterField::Search);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(h.navigator.urls().is_empty());

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(
        h.navigator.urls(),
        vec!["/observations/list/?search=orion".to_string()]
    );
}

// --- pagination ---

#[tokio::test]
async fn load_more_appends_next_page_with_same_filters() {
    let h = HarnessBuilder::new()
        .api(MockApi::with_pages(vec![page(&[11, 12], true)]))
        .rows(&[1, 2])
        .query("?object_type=Planet")
        .build();

    let outcome = h.controller.load_more().await.unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Appended {
            rows: 2,
            has_more: true
        }
    );
    assert_eq!(h.view.row_ids(), vec![1, 2, 11, 12]);
    assert_eq!(h.controller.current_page(), 2);
    assert!(h.controller.has_more());

    let calls = h.api.fetch_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].page, 2);
    assert_eq!(calls[0].path, LIST);
    assert_eq!(calls[0].filters, FilterState::new("", "Planet", ""));
}

#[tokio::test]
async fn last_page_inserts_a_single_end_sentinel() {
    let h = HarnessBuilder::new()
        .api(MockApi::with_pages(vec![page(&[11], true), page(&[21], false)]))
        .build();

    h.controller.load_more().await.unwrap();
    assert_eq!(h.view.snapshot().end_sentinels, 0);

    let outcome = h.controller.load_more().await.unwrap();
    assert_eq!(
        outcome,
        LoadOutcome::Appended {
            rows: 1,
            has_more: false
        }
    );
    assert_eq!(h.controller.current_page(), 3);

    assert_eq!(h.controller.load_more().await.unwrap(), LoadOutcome::Skipped);
    assert_eq!(h.api.fetch_count().await, 2);
    assert_eq!(h.view.snapshot().end_sentinels, 1);
}

#[tokio::test]
async fn empty_page_exhausts_the_list() {
    let h = HarnessBuilder::new()
        .api(MockApi::with_pages(vec![page(&[], true)]))
        .rows(&[1])
        .build();

    assert_eq!(h.controller.load_more().await.unwrap(), LoadOutcome::Exhausted);
    assert!(!h.controller.has_more());
    assert_eq!(h.controller.current_page(), 1);
    assert_eq!(h.view.snapshot().end_sentinels, 1);
    assert_eq!(h.view.row_ids(), vec![1]);
}

#[tokio::test]
async fn nothing_is_fetched_when_first_page_was_the_last() {
    let h = HarnessBuilder::new().has_more(false).build();

    assert_eq!(h.controller.load_more().await.unwrap(), LoadOutcome::Skipped);
    assert_eq!(h.api.fetch_count().await, 0);
}

#[tokio::test]
async fn concurrent_loads_issue_one_request() {
    let h = HarnessBuilder::new()
        .api(MockApi::with_pages(vec![page(&[11, 12], true)]).gated())
        .build();

    let first = {
        let controller = h.controller.clone();
        tokio::spawn(async move { controller.load_more().await })
    };
    while h.api.fetch_count().await == 0 {
        tokio::task::yield_now().await;
    }
    assert!(h.controller.is_loading());

    assert_eq!(h.controller.load_more().await.unwrap(), LoadOutcome::Skipped);

    h.api.release();
    let outcome = first.await.unwrap().unwrap();
    assert!(matches!(outcome, LoadOutcome::Appended { rows: 2, .. }));
    assert_eq!(h.api.fetch_count().await, 1);
    assert!(!h.controller.is_loading());
}

#[tokio::test]
async fn failed_fetch_toasts_and_retries_same_page() {
    let api = MockApi::new();
    api.push_fetch_error("connection reset").await;
    api.push_page(page(&[11], true)).await;
    let h = HarnessBuilder::new().api(api).build();

    let err = h.controller.load_more().await.unwrap_err();
    assert!(matches!(err, StarlogError::Transport { .. }));
    assert_eq!(h.controller.current_page(), 1);
    assert!(h.controller.has_more());
    assert!(!h.controller.is_loading());
    let toast = h.notifier.last().unwrap();
    assert_eq!(toast.severity, Severity::Error);

    h.controller.load_more().await.unwrap();
    let pages: Vec<u32> = h.api.fetch_calls().await.iter().map(|c| c.page).collect();
    assert_eq!(pages, vec![2, 2]);
    assert_eq!(h.controller.current_page(), 2);
}

#[tokio::test(start_paused = true)]
async fn scrolling_near_bottom_loads_after_quiet_period() {
    let h = HarnessBuilder::new()
        .api(MockApi::with_pages(vec![page(&[11], true)]))
        .build();
    h.view.set_scroll(ScrollMetrics {
        scroll_top: 1650.0,
        viewport_height: 800.0,
        document_height: 2600.0,
    });

    for _ in 0..5 {
        h.controller.on_scroll();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(h.api.fetch_count().await, 0);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(h.api.fetch_count().await, 1);
    assert_eq!(h.view.row_ids(), vec![11]);
}

#[tokio::test(start_paused = true)]
async fn scrolling_far_from_bottom_does_not_load() {
    let h = HarnessBuilder::new().build();
    h.view.set_scroll(ScrollMetrics {
        scroll_top: 0.0,
        viewport_height: 800.0,
        document_height: 2600.0,
    });

    h.controller.on_scroll();
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(h.api.fetch_count().await, 0);
}

// --- delete ---

#[tokio::test(start_paused = true)]
async fn delete_removes_row_and_updates_count() {
    let h = HarnessBuilder::new().rows(&[1, 2]).build();

    let status = h
        .controller
        .delete_observation(1, "solarsystem")
        .await
        .unwrap();

    assert_eq!(status, DeleteStatus::Deleted);
    assert_eq!(h.view.row_ids(), vec![2]);
    let snapshot = h.view.snapshot();
    assert_eq!(snapshot.fading, vec![key(1)]);
    assert_eq!(snapshot.count, Some((1, "observation".to_string())));
    assert!(snapshot.empty_state.is_none());

    assert_eq!(h.api.delete_calls().await, vec![(key(1), "tok".to_string())]);
    let toast = h.notifier.last().unwrap();
    assert_eq!(toast.severity, Severity::Success);
    assert_eq!(toast.message, "Observation deleted successfully.");
    assert_eq!(h.prompt.confirmations().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn deleting_last_row_shows_empty_state() {
    let h = HarnessBuilder::new().rows(&[1]).build();

    h.controller
        .delete_observation(1, "solarsystem")
        .await
        .unwrap();

    let snapshot = h.view.snapshot();
    assert!(snapshot.rows.is_empty());
    assert_eq!(snapshot.count, Some((0, "observations".to_string())));
    assert_eq!(snapshot.empty_state.as_deref(), Some(ADD));
}

#[tokio::test(start_paused = true)]
async fn row_detaches_only_after_fade() {
    let h = HarnessBuilder::new().rows(&[1, 2]).build();

    let task = {
        let controller = h.controller.clone();
        tokio::spawn(async move { controller.delete_observation(2, "solarsystem").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(h.view.snapshot().fading, vec![key(2)]);
    assert_eq!(h.view.row_ids(), vec![1, 2]);

    task.await.unwrap().unwrap();
    assert_eq!(h.view.row_ids(), vec![1]);
}

#[tokio::test]
async fn server_rejection_restores_row_and_shows_message() {
    let api = MockApi::new();
    api.push_delete(DeleteResponse::failed("Observation is locked"))
        .await;
    let h = HarnessBuilder::new().api(api).rows(&[1, 2]).build();

    let err = h
        .controller
        .delete_observation(2, "solarsystem")
        .await
        .unwrap_err();

    assert!(matches!(err, StarlogError::Rejected { .. }));
    assert_eq!(h.view.row_ids(), vec![1, 2]);
    assert!(h.view.snapshot().busy.is_empty());
    let toast = h.notifier.last().unwrap();
    assert_eq!(toast.severity, Severity::Error);
    assert_eq!(toast.message, "Observation is locked");
}

#[tokio::test]
async fn rejection_without_message_uses_generic_text() {
    let api = MockApi::new();
    api.push_delete(DeleteResponse {
        success: false,
        message: None,
        error: None,
    })
    .await;
    let h = HarnessBuilder::new().api(api).rows(&[1]).build();

    h.controller
        .delete_observation(1, "solarsystem")
        .await
        .unwrap_err();

    assert_eq!(
        h.notifier.last().unwrap().message,
        "An error occurred while deleting the observation."
    );
}

#[tokio::test]
async fn transport_failure_uses_generic_text() {
    let api = MockApi::new();
    api.push_delete_error("connection refused").await;
    let h = HarnessBuilder::new().api(api).rows(&[1]).build();

    let err = h
        .controller
        .delete_observation(1, "solarsystem")
        .await
        .unwrap_err();

    assert!(matches!(err, StarlogError::Transport { .. }));
    assert_eq!(h.view.row_ids(), vec![1]);
    assert_eq!(
        h.notifier.last().unwrap().message,
        "An error occurred while deleting the observation."
    );
}

#[tokio::test]
async fn declined_confirmation_does_nothing() {
    let h = HarnessBuilder::new()
        .prompt(ScriptedPrompt::declining())
        .rows(&[1])
        .build();

    let status = h
        .controller
        .delete_observation(1, "solarsystem")
        .await
        .unwrap();

    assert_eq!(status, DeleteStatus::Cancelled);
    assert!(h.api.delete_calls().await.is_empty());
    assert!(h.notifier.toasts().is_empty());
    assert_eq!(h.view.row_ids(), vec![1]);
}

#[tokio::test]
async fn missing_token_aborts_before_request() {
    let h = HarnessBuilder::new().csrf_token(None).rows(&[1]).build();

    let err = h
        .controller
        .delete_observation(1, "solarsystem")
        .await
        .unwrap_err();

    assert!(matches!(err, StarlogError::Precondition(_)));
    assert!(h.api.delete_calls().await.is_empty());
    assert_eq!(h.notifier.last().unwrap().severity, Severity::Error);
    assert!(h.view.snapshot().busy.is_empty());
}

#[tokio::test]
async fn unknown_type_is_rejected_before_confirmation() {
    let h = HarnessBuilder::new().rows(&[1]).build();

    let err = h
        .controller
        .delete_observation(1, "../admin")
        .await
        .unwrap_err();

    assert!(matches!(err, StarlogError::Precondition(_)));
    assert!(h.prompt.confirmations().is_empty());
    assert!(h.api.delete_calls().await.is_empty());
}

#[tokio::test]
async fn second_delete_of_same_row_is_ignored_while_pending() {
    let h = HarnessBuilder::new().rows(&[1]).build();

    let first = {
        let controller = h.controller.clone();
        tokio::spawn(async move { controller.delete_observation(1, "solarsystem").await })
    };
    while h.api.delete_calls().await.is_empty() {
        tokio::task::yield_now().await;
    }

    let second = h
        .controller
        .delete_observation(1, "solarsystem")
        .await
        .unwrap();
    assert_eq!(second, DeleteStatus::AlreadyPending);

    assert_eq!(first.await.unwrap().unwrap(), DeleteStatus::Deleted);
    assert_eq!(h.api.delete_calls().await.len(), 1);
}

// --- navigation ---

#[tokio::test]
async fn detail_navigation_uses_type_and_id() {
    let h = HarnessBuilder::new().build();

    let url = h.controller.navigate_to_detail(5, "star").unwrap();

    assert_eq!(url, "/observations/detail/star/5/");
    assert_eq!(h.navigator.urls(), vec![url]);
}

#[tokio::test]
async fn detail_navigation_refuses_unknown_type() {
    let h = HarnessBuilder::new().build();

    assert!(h.controller.navigate_to_detail(5, "comet").is_err());
    assert!(h.navigator.urls().is_empty());
}
