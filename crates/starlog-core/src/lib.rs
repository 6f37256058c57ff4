// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Starlog, a personal astronomical observation log.
//!
//! This crate provides the domain types, the error type, and the collaborator
//! traits that the list controller, form selector, HTTP client and gateway
//! are written against.

pub mod distance;
pub mod error;
pub mod routes;
pub mod row;
pub mod slug;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StarlogError;
pub use row::ObservationRow;
pub use types::{
    DeleteResponse, FilterField, FilterState, ObservationKey, ObservationPage,
    ObservationSummary, ObservationType, ScrollMetrics, Severity, Toast,
};

pub use traits::{FormView, ListView, Navigator, Notifier, ObservationApi, Prompt};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_traits_are_exported() {
        fn _assert_api<T: ObservationApi>() {}
        fn _assert_list_view<T: ListView>() {}
        fn _assert_form_view<T: FormView>() {}
        fn _assert_notifier<T: Notifier>() {}
        fn _assert_navigator<T: Navigator>() {}
        fn _assert_prompt<T: Prompt>() {}
    }

    #[test]
    fn traits_are_object_safe() {
        fn _dyn(
            _: &dyn ObservationApi,
            _: &dyn ListView,
            _: &dyn FormView,
            _: &dyn Notifier,
            _: &dyn Navigator,
            _: &dyn Prompt,
        ) {
        }
    }
}
