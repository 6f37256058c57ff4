// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP access to a Starlog server.
//!
//! [`HttpObservationApi`] implements the list controller's network seam and
//! the session/observation calls of the add flow; [`parse_bootstrap`] reads
//! the state a server-rendered list page embeds for the controller.

pub mod bootstrap;
pub mod client;

pub use bootstrap::{PageBootstrap, parse_bootstrap};
pub use client::HttpObservationApi;
