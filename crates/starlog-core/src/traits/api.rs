// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Network seam for the observation list.

use async_trait::async_trait;

use crate::error::StarlogError;
use crate::types::{DeleteResponse, FilterState, ObservationKey, ObservationPage};

/// Backend consumed by the observation list controller.
#[async_trait]
pub trait ObservationApi: Send + Sync + 'static {
    /// Fetches one page of the list at `path` as a programmatic request.
    ///
    /// `Err` covers transport and decode failures only; an empty page is `Ok`.
    async fn fetch_page(
        &self,
        path: &str,
        filters: &FilterState,
        page: u32,
    ) -> Result<ObservationPage, StarlogError>;

    /// Deletes one observation, sending `csrf_token` as forgery protection.
    ///
    /// A `{success: false}` answer is returned as `Ok`; the caller decides
    /// what it means.
    async fn delete_observation(
        &self,
        key: &ObservationKey,
        csrf_token: &str,
    ) -> Result<DeleteResponse, StarlogError>;
}
