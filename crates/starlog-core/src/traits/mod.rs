// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits the controllers are written against.
//!
//! The network seam is async (`#[async_trait]`); the page-facing seams are
//! synchronous and take `&self`, so implementations own their interior
//! mutability the way a page owns its DOM.

pub mod api;
pub mod page;
pub mod view;

pub use api::ObservationApi;
pub use page::{Navigator, Notifier, Prompt};
pub use view::{FormView, ListView};
