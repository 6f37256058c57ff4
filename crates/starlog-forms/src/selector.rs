// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session-then-type selection on the add-observation page.
//!
//! The outer session selector is the single source of truth for the session:
//! it is pushed into whichever type form is shown, and each form's own
//! session control is hidden. At most one form (and one intro panel) is
//! visible, and only while both a session and a type are chosen.

use std::collections::BTreeMap;
use std::sync::Arc;

use starlog_core::types::NewObservation;
use starlog_core::{FormView, ObservationType, Prompt, StarlogError};
use tracing::{debug, warn};

use crate::catalog::validate_fields;

const SELECT_SESSION_FIRST: &str = "Please select an observing session first.";

/// Where the selector is in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    NoSelection,
    SessionOnly,
    TypeAndSession,
}

/// Drives which observation form is visible.
pub struct ObservationFormSelector {
    view: Arc<dyn FormView>,
    prompt: Arc<dyn Prompt>,
    session: Option<String>,
    selected: Option<ObservationType>,
}

impl ObservationFormSelector {
    pub fn new(view: Arc<dyn FormView>, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            view,
            prompt,
            session: None,
            selected: None,
        }
    }

    pub fn state(&self) -> SelectorState {
        match (&self.session, self.selected) {
            (None, _) => SelectorState::NoSelection,
            (Some(_), None) => SelectorState::SessionOnly,
            (Some(_), Some(_)) => SelectorState::TypeAndSession,
        }
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn selected_type(&self) -> Option<ObservationType> {
        self.selected
    }

    /// Shows the form for `ty`, carrying the selected session into it.
    ///
    /// Without a session nothing is shown: the type control is reset, the
    /// user is alerted and a precondition error is returned.
    pub fn select_type(&mut self, ty: ObservationType) -> Result<(), StarlogError> {
        let Some(session) = self.session.clone() else {
            warn!(%ty, "type chosen before session");
            self.selected = None;
            self.view.reset_type_control();
            self.view.hide_all_forms();
            self.view.hide_all_intros();
            self.prompt.alert(SELECT_SESSION_FIRST);
            return Err(StarlogError::Precondition(SELECT_SESSION_FIRST.to_string()));
        };

        self.view.hide_all_forms();
        self.view.hide_all_intros();
        if self.view.has_intro(ty) {
            self.view.show_intro(ty);
        }
        self.view.show_form(ty);
        self.view.set_form_session(ty, &session);
        self.view.hide_form_session_control(ty);
        self.selected = Some(ty);

        debug!(%ty, session = %session, "form shown");
        Ok(())
    }

    /// Selects a type by its form key; a blank key goes back to session-only.
    pub fn select_type_key(&mut self, key: &str) -> Result<(), StarlogError> {
        let key = key.trim();
        if key.is_empty() {
            self.go_back();
            return Ok(());
        }
        let ty = key.parse::<ObservationType>().map_err(|_| {
            warn!(key, "unknown observation type key");
            StarlogError::Precondition(format!("Unknown observation type `{key}`."))
        })?;
        self.select_type(ty)
    }

    /// Records the session and re-targets the visible form, if any.
    pub fn select_session(&mut self, session: Option<String>) -> Result<(), StarlogError> {
        self.session = session.filter(|s| !s.trim().is_empty());
        debug!(session = ?self.session, "session selected");
        match self.selected {
            Some(ty) => self.select_type(ty),
            None => Ok(()),
        }
    }

    /// Hides the form and clears the type; the session stays.
    pub fn go_back(&mut self) {
        self.view.hide_all_forms();
        self.view.hide_all_intros();
        self.view.reset_type_control();
        self.selected = None;
    }

    /// Builds the submission for the visible form.
    pub fn submission(
        &self,
        fields: BTreeMap<String, String>,
    ) -> Result<NewObservation, StarlogError> {
        let (Some(session), Some(ty)) = (self.session.clone(), self.selected) else {
            return Err(StarlogError::Precondition(
                "Select a session and an observation type before submitting.".to_string(),
            ));
        };
        validate_fields(ty, &fields)?;
        Ok(NewObservation {
            session,
            type_class: ty,
            fields,
        })
    }
}
