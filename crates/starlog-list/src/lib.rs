// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Observation list behavior for Starlog.
//!
//! Filtering through the page URL, incremental "load more" pagination,
//! per-row delete with confirmation, and the toast stack that reports all
//! of it.

pub mod controller;
pub mod debounce;
pub mod filter;
pub mod scroll;
pub mod toast;

pub use controller::{
    DeleteStatus, ListCollaborators, ListContext, ListSettings, LoadOutcome,
    ObservationListController,
};
pub use debounce::Debouncer;
pub use filter::{build_query_string, encode_query, list_url, parse_query};
pub use scroll::near_bottom;
pub use toast::{ToastEvent, ToastId, ToastStack};
