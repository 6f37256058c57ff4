// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal renditions of the page collaborators.
//!
//! The list and form controllers only see the view traits; these
//! implementations print to stdout with `colored` and keep just enough state
//! to answer the controllers' queries.

use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::sync::Mutex;

use colored::Colorize;
use starlog_core::{
    FilterState, FormView, ListView, Navigator, ObservationKey, ObservationRow, ObservationType,
    Prompt, ScrollMetrics, Severity, Toast,
};
use starlog_list::ToastEvent;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// One printed list line.
pub fn format_row(row: &ObservationRow) -> String {
    let key = match row.key() {
        Some(key) => key.to_string(),
        None => format!("{}/{}", row.type_class, row.id),
    };
    format!(
        "{:>16}  {}  {}  {}  {}",
        key.dimmed(),
        row.object_name.bold(),
        row.object_type.cyan(),
        row.session_date,
        row.created_relative.dimmed(),
    )
}

pub fn format_toast(toast: &Toast) -> String {
    match toast.severity {
        Severity::Success => format!("{} {}", "[ok]".green().bold(), toast.message),
        Severity::Error => format!("{} {}", "[error]".red().bold(), toast.message.red()),
    }
}

#[derive(Default)]
struct ListState {
    filters: FilterState,
    rows: Vec<ObservationRow>,
    busy: HashSet<ObservationKey>,
    end_sentinel: bool,
}

/// Observation list printed line by line.
#[derive(Default)]
pub struct TerminalListView {
    state: Mutex<ListState>,
}

impl TerminalListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints and attaches the server-rendered first page.
    pub fn show_initial(&self, rows: Vec<ObservationRow>) {
        for row in &rows {
            println!("{}", format_row(row));
        }
        lock(&self.state).rows = rows;
    }

    /// Attaches rows without printing them.
    pub fn with_rows(rows: Vec<ObservationRow>) -> Self {
        let view = Self::new();
        lock(&view.state).rows = rows;
        view
    }
}

impl ListView for TerminalListView {
    fn filter_inputs(&self) -> FilterState {
        lock(&self.state).filters.clone()
    }

    fn set_filter_inputs(&self, filters: &FilterState) {
        lock(&self.state).filters = filters.clone();
    }

    fn append_row(&self, row: &ObservationRow) {
        println!("{}", format_row(row));
        lock(&self.state).rows.push(row.clone());
    }

    fn row_count(&self) -> usize {
        lock(&self.state).rows.len()
    }

    fn begin_row_removal(&self, key: &ObservationKey) {
        println!("{}", format!("removing {key}").dimmed());
    }

    fn detach_row(&self, key: &ObservationKey) {
        lock(&self.state)
            .rows
            .retain(|row| row.key().as_ref() != Some(key));
    }

    fn set_count(&self, count: usize, label: &str) {
        println!("{}", format!("{count} {label}").bold());
    }

    fn show_empty_state(&self, add_url: &str) {
        println!("No observations yet. Add one at {}", add_url.underline());
    }

    fn has_end_sentinel(&self) -> bool {
        lock(&self.state).end_sentinel
    }

    fn insert_end_sentinel(&self) {
        lock(&self.state).end_sentinel = true;
        println!("{}", "No more observations".dimmed());
    }

    fn set_delete_busy(&self, key: &ObservationKey, busy: bool) {
        let mut state = lock(&self.state);
        if busy {
            state.busy.insert(*key);
        } else {
            state.busy.remove(key);
        }
        debug!(%key, busy, "delete control state");
    }

    /// A terminal has no viewport; the list always reads as scrolled to the end.
    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics::default()
    }
}

/// Short description shown above each type's prompts.
pub fn intro_for(ty: ObservationType) -> &'static str {
    match ty {
        ObservationType::SolarSystem => {
            "Planets, the Moon and the Sun: note seeing, phase and disk details."
        }
        ObservationType::Star => "Single and variable stars: record a magnitude estimate if you made one.",
        ObservationType::DeepSky => "Galaxies, nebulae and clusters: rate how hard the object was to see.",
        ObservationType::SpecialEvent => "Comets, meteor showers, eclipses and aurorae.",
    }
}

#[derive(Default)]
struct FormState {
    visible: Option<ObservationType>,
    session: Option<String>,
}

/// Add-observation page in the terminal: announces the active form.
#[derive(Default)]
pub struct TerminalFormView {
    state: Mutex<FormState>,
}

impl TerminalFormView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_form(&self) -> Option<ObservationType> {
        lock(&self.state).visible
    }

    pub fn form_session(&self) -> Option<String> {
        lock(&self.state).session.clone()
    }
}

impl FormView for TerminalFormView {
    fn hide_all_forms(&self) {
        lock(&self.state).visible = None;
    }

    fn hide_all_intros(&self) {}

    fn has_intro(&self, _ty: ObservationType) -> bool {
        true
    }

    fn show_intro(&self, ty: ObservationType) {
        println!("{}", intro_for(ty).dimmed());
    }

    fn show_form(&self, ty: ObservationType) {
        lock(&self.state).visible = Some(ty);
        println!("{}", format!("{} observation", ty.label()).bold().green());
    }

    fn set_form_session(&self, _ty: ObservationType, session: &str) {
        lock(&self.state).session = Some(session.to_string());
    }

    fn hide_form_session_control(&self, ty: ObservationType) {
        debug!(%ty, "session control hidden");
    }

    fn reset_type_control(&self) {
        debug!("type control reset");
    }
}

/// Prints navigation targets instead of following them.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, url: &str) {
        println!("{} {}", "->".dimmed(), url);
    }
}

/// Confirmations read from stdin; `assume_yes` skips the question.
pub struct StdinPrompt {
    pub assume_yes: bool,
}

/// `y`/`yes` in any case confirms; anything else declines.
pub fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl Prompt for StdinPrompt {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{message} [y/N] ");
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => parse_confirmation(&answer),
            Err(_) => false,
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message.yellow());
    }
}

/// Prints toast events as they arrive on a [`starlog_list::ToastStack`].
pub struct ToastPrinter {
    events: broadcast::Receiver<ToastEvent>,
}

impl ToastPrinter {
    pub fn new(events: broadcast::Receiver<ToastEvent>) -> Self {
        Self { events }
    }

    /// Prints every toast shown since the last call.
    pub fn drain(&mut self) -> usize {
        let mut printed = 0;
        loop {
            match self.events.try_recv() {
                Ok(ToastEvent::Shown { toast, .. }) => {
                    println!("{}", format_toast(&toast));
                    printed += 1;
                }
                Ok(ToastEvent::Dismissed { .. }) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "toast printer lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return printed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use starlog_core::ObservationSummary;
    use starlog_list::ToastStack;
    use std::time::Duration;

    fn row(type_class: &str) -> ObservationRow {
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 21, 0, 0).unwrap();
        ObservationRow::from_summary(
            &ObservationSummary {
                id: 4,
                object_type: "Deep Sky".into(),
                object_name: "M42".into(),
                session_slug: "observer-2026-01-05".into(),
                created_at: at,
                date_time: at,
                type_class: type_class.into(),
            },
            at,
        )
    }

    #[test]
    fn row_line_shows_key_and_name() {
        let line = format_row(&row("deepsky"));
        assert!(line.contains("deepsky/4"));
        assert!(line.contains("M42"));
        assert!(line.contains("2026-01-05"));
    }

    #[test]
    fn unknown_type_row_still_renders() {
        assert!(format_row(&row("asteroid")).contains("asteroid/4"));
    }

    #[test]
    fn confirmation_answers() {
        assert!(parse_confirmation("y\n"));
        assert!(parse_confirmation(" YES "));
        assert!(!parse_confirmation(""));
        assert!(!parse_confirmation("nope"));
    }

    #[test]
    fn list_view_tracks_rows_and_sentinel() {
        let view = TerminalListView::with_rows(vec![row("deepsky")]);
        assert_eq!(view.row_count(), 1);
        view.detach_row(&ObservationKey::new(ObservationType::DeepSky, 4));
        assert_eq!(view.row_count(), 0);
        assert!(!view.has_end_sentinel());
        view.insert_end_sentinel();
        assert!(view.has_end_sentinel());
    }

    #[test]
    fn form_view_remembers_visible_form() {
        let view = TerminalFormView::new();
        view.show_form(ObservationType::Star);
        view.set_form_session(ObservationType::Star, "S1");
        assert_eq!(view.visible_form(), Some(ObservationType::Star));
        assert_eq!(view.form_session().as_deref(), Some("S1"));
        view.hide_all_forms();
        assert_eq!(view.visible_form(), None);
    }

    #[tokio::test]
    async fn printer_drains_shown_toasts() {
        let stack = ToastStack::new(Duration::from_secs(5));
        let mut printer = ToastPrinter::new(stack.subscribe());
        stack.show(Toast::success("Observation deleted successfully."));
        stack.show(Toast::error("Failed"));
        assert_eq!(printer.drain(), 2);
        assert_eq!(printer.drain(), 0);
    }
}
