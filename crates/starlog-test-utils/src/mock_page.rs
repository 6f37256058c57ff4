// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording doubles for the page-facing traits.
//!
//! Each double keeps a plain in-memory model of what a real page would show,
//! readable through snapshot accessors.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use starlog_core::{
    FilterState, FormView, ListView, Navigator, Notifier, ObservationKey, ObservationRow,
    ObservationType, Prompt, ScrollMetrics, Toast,
};
use strum::IntoEnumIterator;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// What the list region currently shows.
#[derive(Debug, Clone, Default)]
pub struct ListSnapshot {
    pub inputs: FilterState,
    pub rows: Vec<ObservationRow>,
    pub fading: Vec<ObservationKey>,
    pub busy: HashSet<ObservationKey>,
    pub count: Option<(usize, String)>,
    pub empty_state: Option<String>,
    pub end_sentinels: usize,
}

/// In-memory list region.
pub struct RecordingListView {
    state: Mutex<ListSnapshot>,
    scroll: Mutex<ScrollMetrics>,
}

impl RecordingListView {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ListSnapshot::default()),
            scroll: Mutex::new(ScrollMetrics::default()),
        }
    }

    /// A list already showing the server-rendered first page.
    pub fn with_rows(rows: Vec<ObservationRow>) -> Self {
        let view = Self::new();
        lock(&view.state).rows = rows;
        view
    }

    /// Simulates the user editing the filter controls.
    pub fn type_filters(&self, filters: FilterState) {
        lock(&self.state).inputs = filters;
    }

    pub fn set_scroll(&self, metrics: ScrollMetrics) {
        *lock(&self.scroll) = metrics;
    }

    pub fn snapshot(&self) -> ListSnapshot {
        lock(&self.state).clone()
    }

    /// Ids of the attached rows, in display order.
    pub fn row_ids(&self) -> Vec<u64> {
        lock(&self.state).rows.iter().map(|r| r.id).collect()
    }
}

impl Default for RecordingListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView for RecordingListView {
    fn filter_inputs(&self) -> FilterState {
        lock(&self.state).inputs.clone()
    }

    fn set_filter_inputs(&self, filters: &FilterState) {
        lock(&self.state).inputs = filters.clone();
    }

    fn append_row(&self, row: &ObservationRow) {
        lock(&self.state).rows.push(row.clone());
    }

    fn row_count(&self) -> usize {
        lock(&self.state).rows.len()
    }

    fn begin_row_removal(&self, key: &ObservationKey) {
        lock(&self.state).fading.push(*key);
    }

    fn detach_row(&self, key: &ObservationKey) {
        lock(&self.state)
            .rows
            .retain(|row| row.key().as_ref() != Some(key));
    }

    fn set_count(&self, count: usize, label: &str) {
        lock(&self.state).count = Some((count, label.to_string()));
    }

    fn show_empty_state(&self, add_url: &str) {
        lock(&self.state).empty_state = Some(add_url.to_string());
    }

    fn has_end_sentinel(&self) -> bool {
        lock(&self.state).end_sentinels > 0
    }

    fn insert_end_sentinel(&self) {
        lock(&self.state).end_sentinels += 1;
    }

    fn set_delete_busy(&self, key: &ObservationKey, busy: bool) {
        let mut state = lock(&self.state);
        if busy {
            state.busy.insert(*key);
        } else {
            state.busy.remove(key);
        }
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        *lock(&self.scroll)
    }
}

/// What the add-observation page currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub visible_forms: BTreeSet<ObservationType>,
    pub visible_intros: BTreeSet<ObservationType>,
    /// Session carried by each form's hidden field.
    pub sessions: BTreeMap<ObservationType, String>,
    pub hidden_session_controls: BTreeSet<ObservationType>,
    pub type_control_resets: usize,
}

/// In-memory add-observation page.
pub struct RecordingFormView {
    state: Mutex<FormSnapshot>,
    intros: BTreeSet<ObservationType>,
}

impl RecordingFormView {
    /// A page with an intro panel for every type.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FormSnapshot::default()),
            intros: ObservationType::iter().collect(),
        }
    }

    /// A page missing the intro panel for `ty`.
    pub fn without_intro(mut self, ty: ObservationType) -> Self {
        self.intros.remove(&ty);
        self
    }

    pub fn snapshot(&self) -> FormSnapshot {
        lock(&self.state).clone()
    }
}

impl Default for RecordingFormView {
    fn default() -> Self {
        Self::new()
    }
}

impl FormView for RecordingFormView {
    fn hide_all_forms(&self) {
        lock(&self.state).visible_forms.clear();
    }

    fn hide_all_intros(&self) {
        lock(&self.state).visible_intros.clear();
    }

    fn has_intro(&self, ty: ObservationType) -> bool {
        self.intros.contains(&ty)
    }

    fn show_intro(&self, ty: ObservationType) {
        lock(&self.state).visible_intros.insert(ty);
    }

    fn show_form(&self, ty: ObservationType) {
        lock(&self.state).visible_forms.insert(ty);
    }

    fn set_form_session(&self, ty: ObservationType, session: &str) {
        lock(&self.state).sessions.insert(ty, session.to_string());
    }

    fn hide_form_session_control(&self, ty: ObservationType) {
        lock(&self.state).hidden_session_controls.insert(ty);
    }

    fn reset_type_control(&self) {
        lock(&self.state).type_control_resets += 1;
    }
}

/// Captures every toast.
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        lock(&self.toasts).clone()
    }

    pub fn last(&self) -> Option<Toast> {
        lock(&self.toasts).last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        lock(&self.toasts).push(toast);
    }
}

/// Captures every navigation.
#[derive(Default)]
pub struct RecordingNavigator {
    urls: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn urls(&self) -> Vec<String> {
        lock(&self.urls).clone()
    }

    pub fn last(&self) -> Option<String> {
        lock(&self.urls).last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        lock(&self.urls).push(url.to_string());
    }
}

/// Answers every confirmation with a fixed choice and records the questions.
pub struct ScriptedPrompt {
    answer: AtomicBool,
    confirmations: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    /// A prompt that always confirms.
    pub fn accepting() -> Self {
        Self::answering(true)
    }

    /// A prompt that always declines.
    pub fn declining() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer: AtomicBool::new(answer),
            confirmations: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn set_answer(&self, answer: bool) {
        self.answer.store(answer, Ordering::Release);
    }

    pub fn confirmations(&self) -> Vec<String> {
        lock(&self.confirmations).clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        lock(&self.confirmations).push(message.to_string());
        self.answer.load(Ordering::Acquire)
    }

    fn alert(&self, message: &str) {
        lock(&self.alerts).push(message.to_string());
    }
}
