// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Starlog integration tests.
//!
//! Provides scripted and recording doubles for every collaborator trait so
//! controllers can be driven deterministically without a browser or server.
//!
//! # Components
//!
//! - [`MockApi`] - Scripted list pages and delete answers, with call capture
//! - [`RecordingListView`] - In-memory model of the rendered list region
//! - [`RecordingFormView`] - In-memory model of the add-observation page
//! - [`RecordingNotifier`], [`RecordingNavigator`], [`ScriptedPrompt`] - page side effects
//! - [`fixtures`] - Payload builders

pub mod fixtures;
pub mod mock_api;
pub mod mock_page;

pub use mock_api::{FetchCall, MockApi};
pub use mock_page::{
    RecordingFormView, RecordingListView, RecordingNavigator, RecordingNotifier, ScriptedPrompt,
};
