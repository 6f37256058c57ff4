// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway serving the observation log.
//!
//! The gateway is the server side of the list controller's contract: the
//! paginated JSON list, the forgery-protected delete, observation detail,
//! the add form and observing sessions, all over an in-memory
//! [`ObservationStore`] that can be seeded from a JSON file.

pub mod csrf;
pub mod error;
pub mod handlers;
pub mod render;
pub mod seed;
pub mod server;
pub mod store;

pub use csrf::CsrfToken;
pub use error::ApiError;
pub use seed::{Seed, read_seed};
pub use server::{GatewaySettings, GatewayState, ServerConfig, build_router, serve_on, start_server};
pub use store::ObservationStore;
