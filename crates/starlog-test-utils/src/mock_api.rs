// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock observation backend for deterministic testing.
//!
//! `MockApi` implements `ObservationApi` with scripted page and delete
//! answers popped from FIFO queues, and captures every call for assertions.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use starlog_core::{
    DeleteResponse, FilterState, ObservationApi, ObservationKey, ObservationPage, StarlogError,
};

/// One captured `fetch_page` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub path: String,
    pub filters: FilterState,
    pub page: u32,
}

type Scripted<T> = Result<T, String>;

/// A scripted observation backend.
///
/// When a queue runs dry, `fetch_page` answers with an empty last page and
/// `delete_observation` with a plain success.
pub struct MockApi {
    pages: Arc<Mutex<VecDeque<Scripted<ObservationPage>>>>,
    deletes: Arc<Mutex<VecDeque<Scripted<DeleteResponse>>>>,
    fetch_calls: Arc<Mutex<Vec<FetchCall>>>,
    delete_calls: Arc<Mutex<Vec<(ObservationKey, String)>>>,
    gated: AtomicBool,
    gate: Arc<Notify>,
}

impl MockApi {
    /// Create a mock with empty queues.
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(VecDeque::new())),
            deletes: Arc::new(Mutex::new(VecDeque::new())),
            fetch_calls: Arc::new(Mutex::new(Vec::new())),
            delete_calls: Arc::new(Mutex::new(Vec::new())),
            gated: AtomicBool::new(false),
            gate: Arc::new(Notify::new()),
        }
    }

    /// Create a mock pre-loaded with successful pages.
    pub fn with_pages(pages: Vec<ObservationPage>) -> Self {
        let mock = Self::new();
        if let Ok(mut queue) = mock.pages.try_lock() {
            queue.extend(pages.into_iter().map(Ok));
        }
        mock
    }

    /// Hold every fetch until [`MockApi::release`] is called.
    pub fn gated(self) -> Self {
        self.gated.store(true, Ordering::Release);
        self
    }

    /// Let one held fetch complete.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub async fn push_page(&self, page: ObservationPage) {
        self.pages.lock().await.push_back(Ok(page));
    }

    /// Queue a transport failure for the next fetch.
    pub async fn push_fetch_error(&self, message: &str) {
        self.pages.lock().await.push_back(Err(message.to_string()));
    }

    pub async fn push_delete(&self, response: DeleteResponse) {
        self.deletes.lock().await.push_back(Ok(response));
    }

    /// Queue a transport failure for the next delete.
    pub async fn push_delete_error(&self, message: &str) {
        self.deletes.lock().await.push_back(Err(message.to_string()));
    }

    pub async fn fetch_calls(&self) -> Vec<FetchCall> {
        self.fetch_calls.lock().await.clone()
    }

    pub async fn fetch_count(&self) -> usize {
        self.fetch_calls.lock().await.len()
    }

    /// Captured deletes as `(key, csrf_token)`.
    pub async fn delete_calls(&self) -> Vec<(ObservationKey, String)> {
        self.delete_calls.lock().await.clone()
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObservationApi for MockApi {
    async fn fetch_page(
        &self,
        path: &str,
        filters: &FilterState,
        page: u32,
    ) -> Result<ObservationPage, StarlogError> {
        self.fetch_calls.lock().await.push(FetchCall {
            path: path.to_string(),
            filters: filters.clone(),
            page,
        });

        if self.gated.load(Ordering::Acquire) {
            self.gate.notified().await;
        }

        match self.pages.lock().await.pop_front() {
            Some(Ok(page)) => Ok(page),
            Some(Err(message)) => Err(StarlogError::Transport {
                message,
                source: None,
            }),
            None => Ok(ObservationPage::default()),
        }
    }

    async fn delete_observation(
        &self,
        key: &ObservationKey,
        csrf_token: &str,
    ) -> Result<DeleteResponse, StarlogError> {
        self.delete_calls
            .lock()
            .await
            .push((*key, csrf_token.to_string()));

        match self.deletes.lock().await.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(StarlogError::Transport {
                message,
                source: None,
            }),
            None => Ok(DeleteResponse::deleted("Observation deleted successfully.")),
        }
    }
}
