// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `starlog add` command implementation.
//!
//! Interactive add flow: choose (or create) an observing session, pick an
//! observation type through the form selector, answer that type's field
//! prompts, then post the form to the gateway.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use starlog_client::HttpObservationApi;
use starlog_config::StarlogConfig;
use starlog_core::routes::detail_path;
use starlog_core::types::{NewSession, ObservingSession};
use starlog_core::{FilterState, ObservationKey, ObservationType, StarlogError};
use starlog_forms::catalog::{FieldKind, FieldSpec, fields_for, validate_value};
use starlog_forms::ObservationFormSelector;
use strum::IntoEnumIterator;
use tracing::info;

use crate::terminal::{StdinPrompt, TerminalFormView};

/// Which session the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChoice {
    Existing(String),
    New,
}

/// Interprets the session answer: a 1-based list number, a slug, or `n`.
pub fn choose_session(
    answer: &str,
    sessions: &[ObservingSession],
) -> Result<SessionChoice, String> {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("n") || answer.eq_ignore_ascii_case("new") {
        return Ok(SessionChoice::New);
    }
    if let Ok(n) = answer.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| sessions.get(i))
            .map(|s| SessionChoice::Existing(s.slug.clone()))
            .ok_or_else(|| format!("no session numbered {n}"));
    }
    sessions
        .iter()
        .find(|s| s.slug == answer)
        .map(|s| SessionChoice::Existing(s.slug.clone()))
        .ok_or_else(|| format!("unknown session `{answer}`"))
}

/// `now` (or blank), RFC 3339, or `YYYY-MM-DD HH:MM` in UTC.
pub fn parse_start_time(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("now") {
        return Ok(now);
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("cannot read `{input}` as a time; use YYYY-MM-DD HH:MM"))
}

/// Prompt text for one field, listing choices and bounds.
pub fn field_prompt(spec: &FieldSpec) -> String {
    let hint = match spec.kind {
        FieldKind::Choice { choices } => {
            let values: Vec<&str> = choices.iter().map(|(v, _)| *v).collect();
            format!(" [{}]", values.join("/"))
        }
        FieldKind::Integer { min, max } => format!(" [{min}..{max}]"),
        FieldKind::Decimal { min, max } => format!(" [{min}..{max}]"),
        FieldKind::Text { .. } | FieldKind::LongText => String::new(),
    };
    let marker = if spec.required { "*" } else { "" };
    format!("{}{marker}{hint}> ", spec.label)
}

/// Asks for every field of `ty`, re-asking until each answer is valid.
///
/// Blank answers to optional fields are left out of the form.
pub fn collect_fields(
    ty: ObservationType,
    read: &mut impl FnMut(&str) -> Result<String, StarlogError>,
) -> Result<BTreeMap<String, String>, StarlogError> {
    let mut fields = BTreeMap::new();
    for spec in fields_for(ty) {
        if !spec.help.is_empty() {
            println!("{}", spec.help.dimmed());
        }
        loop {
            let answer = read(&field_prompt(spec))?;
            match validate_value(spec, &answer) {
                Ok(()) => {
                    let answer = answer.trim();
                    if !answer.is_empty() {
                        fields.insert(spec.name.to_string(), answer.to_string());
                    }
                    break;
                }
                Err(problem) => eprintln!("{}", problem.yellow()),
            }
        }
    }
    Ok(fields)
}

fn read_line(editor: &mut DefaultEditor, prompt: &str) -> Result<String, StarlogError> {
    match editor.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                let _ = editor.add_history_entry(line.as_str());
            }
            Ok(line)
        }
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
            Err(StarlogError::Precondition("Add cancelled.".to_string()))
        }
        Err(e) => Err(StarlogError::Internal(format!("failed to read input: {e}"))),
    }
}

/// Runs the interactive add flow against the configured gateway.
pub async fn run_add(config: &StarlogConfig) -> Result<(), StarlogError> {
    let api = HttpObservationApi::new(&config.client)?;
    let bootstrap = api
        .fetch_bootstrap(&config.list.path, &FilterState::default())
        .await?;
    let token = bootstrap.csrf_token.ok_or_else(|| {
        StarlogError::Precondition(
            "Security token not found. Please refresh the page and try again.".to_string(),
        )
    })?;

    let mut editor = DefaultEditor::new()
        .map_err(|e| StarlogError::Internal(format!("failed to initialize readline: {e}")))?;
    let mut read = |prompt: &str| read_line(&mut editor, prompt);

    println!("{}", "starlog add".bold().green());
    let sessions = api.list_sessions().await?;
    for (i, session) in sessions.iter().enumerate() {
        println!("  {:>2}. {}  {}", i + 1, session.slug, session.site_name.dimmed());
    }

    let slug = loop {
        let answer = read("session (number, slug, or `n` for a new one)> ")?;
        match choose_session(&answer, &sessions) {
            Ok(SessionChoice::Existing(slug)) => break slug,
            Ok(SessionChoice::New) => {
                let start = loop {
                    let raw = read("start time UTC (`now` or YYYY-MM-DD HH:MM)> ")?;
                    match parse_start_time(&raw, Utc::now()) {
                        Ok(start) => break start,
                        Err(problem) => eprintln!("{}", problem.yellow()),
                    }
                };
                let site_name = read("site name> ")?;
                let new = NewSession {
                    datetime_start_ut: start,
                    datetime_end_ut: None,
                    site_name: site_name.trim().to_string(),
                };
                match api.create_session(&new, &token).await {
                    Ok(session) => {
                        println!("created session {}", session.slug.bold());
                        break session.slug;
                    }
                    Err(e) => {
                        let message = e.user_message("Could not create the session.");
                        eprintln!("{}", message.red());
                    }
                }
            }
            Err(problem) => eprintln!("{}", problem.yellow()),
        }
    };

    let mut selector = ObservationFormSelector::new(
        Arc::new(TerminalFormView::new()),
        Arc::new(StdinPrompt { assume_yes: false }),
    );
    selector.select_session(Some(slug))?;

    let keys: Vec<&str> = ObservationType::iter().map(|ty| ty.key()).collect();
    let type_prompt = format!("type [{}]> ", keys.join("/"));
    let ty = loop {
        let answer = read(&type_prompt)?;
        match selector.select_type_key(&answer) {
            Ok(()) => {
                if let Some(ty) = selector.selected_type() {
                    break ty;
                }
            }
            Err(e) => eprintln!("{}", e.to_string().yellow()),
        }
    };

    let fields = collect_fields(ty, &mut read)?;
    let submission = selector.submission(fields)?;
    let detail = api
        .create_observation(&submission, &config.list.add_path, &token)
        .await?;

    let key = ObservationKey::new(ty, detail.summary.id);
    info!(%key, "observation created");
    println!(
        "{} {} ({})",
        "saved".green().bold(),
        detail.summary.object_name.bold(),
        detail_path(&key)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::VecDeque;

    fn session(slug: &str) -> ObservingSession {
        ObservingSession {
            id: 1,
            slug: slug.into(),
            datetime_start_ut: Utc.with_ymd_and_hms(2026, 1, 5, 20, 0, 0).unwrap(),
            datetime_end_ut: None,
            site_name: String::new(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 20, 0, 0).unwrap(),
        }
    }

    #[test]
    fn session_answers() {
        let sessions = vec![session("observer-2026-01-05"), session("observer-2026-01-04")];
        assert_eq!(
            choose_session("2", &sessions),
            Ok(SessionChoice::Existing("observer-2026-01-04".into()))
        );
        assert_eq!(
            choose_session("observer-2026-01-05", &sessions),
            Ok(SessionChoice::Existing("observer-2026-01-05".into()))
        );
        assert_eq!(choose_session(" N ", &sessions), Ok(SessionChoice::New));
        assert!(choose_session("0", &sessions).is_err());
        assert!(choose_session("3", &sessions).is_err());
        assert!(choose_session("nope", &sessions).is_err());
    }

    #[test]
    fn start_time_formats() {
        let now = Utc.with_ymd_and_hms(2026, 1, 6, 1, 2, 3).unwrap();
        assert_eq!(parse_start_time("", now), Ok(now));
        assert_eq!(parse_start_time("NOW", now), Ok(now));
        assert_eq!(
            parse_start_time("2026-01-05 21:30", now),
            Ok(Utc.with_ymd_and_hms(2026, 1, 5, 21, 30, 0).unwrap())
        );
        assert_eq!(
            parse_start_time("2026-01-05T23:30:00+02:00", now),
            Ok(Utc.with_ymd_and_hms(2026, 1, 5, 21, 30, 0).unwrap())
        );
        assert!(parse_start_time("yesterday", now).is_err());
    }

    #[test]
    fn prompts_show_requirements() {
        let spec = starlog_forms::catalog::field_spec(ObservationType::Star, "star_name").unwrap();
        assert_eq!(field_prompt(spec), "Star name*> ");
        let spec =
            starlog_forms::catalog::field_spec(ObservationType::DeepSky, "visibility_rating")
                .unwrap();
        assert!(field_prompt(spec).contains("easy/moderate"));
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let mut answers: VecDeque<&str> = VecDeque::from(vec![
            "",     // star name is required
            "Vega", // star_name
            "99",   // magnitude out of range
            "0.0",  // magnitude
        ]);
        let mut asked = Vec::new();
        let mut read = |prompt: &str| -> Result<String, StarlogError> {
            asked.push(prompt.to_string());
            Ok(answers.pop_front().unwrap_or("").to_string())
        };

        let fields = collect_fields(ObservationType::Star, &mut read).unwrap();

        assert_eq!(fields.get("star_name").map(String::as_str), Some("Vega"));
        assert_eq!(fields.get("magnitude_estimate").map(String::as_str), Some("0.0"));
        assert_eq!(fields.len(), 2);
        assert_eq!(asked.iter().filter(|p| p.starts_with("Star name")).count(), 2);
    }

    #[test]
    fn cancelled_input_stops_collection() {
        let mut read = |_: &str| -> Result<String, StarlogError> {
            Err(StarlogError::Precondition("Add cancelled.".into()))
        };
        assert!(collect_fields(ObservationType::DeepSky, &mut read).is_err());
    }
}
