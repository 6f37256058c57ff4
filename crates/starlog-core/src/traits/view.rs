// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering seams for the observation list and the add-observation page.

use crate::row::ObservationRow;
use crate::types::{FilterState, ObservationKey, ObservationType, ScrollMetrics};

/// The rendered observation list region.
pub trait ListView: Send + Sync {
    /// Current values of the three filter controls.
    fn filter_inputs(&self) -> FilterState;

    /// Reflects `filters` into the filter controls.
    fn set_filter_inputs(&self, filters: &FilterState);

    /// Appends a row at the end of the list.
    fn append_row(&self, row: &ObservationRow);

    /// Number of rows currently attached.
    fn row_count(&self) -> usize;

    /// Starts the fade-out of a row about to be removed.
    fn begin_row_removal(&self, key: &ObservationKey);

    /// Detaches a row from the list.
    fn detach_row(&self, key: &ObservationKey);

    /// Updates the visible total and its singular/plural label.
    fn set_count(&self, count: usize, label: &str);

    /// Replaces the list region with the empty-state message linking to `add_url`.
    fn show_empty_state(&self, add_url: &str);

    fn has_end_sentinel(&self) -> bool;

    /// Inserts the "end of results" marker.
    fn insert_end_sentinel(&self);

    /// Disables (and labels busy) or restores a row's delete control.
    fn set_delete_busy(&self, key: &ObservationKey, busy: bool);

    fn scroll_metrics(&self) -> ScrollMetrics;
}

/// The add-observation page: one form and one intro panel per type.
pub trait FormView: Send + Sync {
    fn hide_all_forms(&self);
    fn hide_all_intros(&self);

    /// Whether an intro panel exists for `ty`.
    fn has_intro(&self, ty: ObservationType) -> bool;
    fn show_intro(&self, ty: ObservationType);
    fn show_form(&self, ty: ObservationType);

    /// Writes `session` into the form's hidden carrier field and its own session selector.
    fn set_form_session(&self, ty: ObservationType, session: &str);

    /// Hides the form's own session selector.
    fn hide_form_session_control(&self, ty: ObservationType);

    /// Resets the outer type control to "nothing selected".
    fn reset_type_control(&self);
}
