// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auto-dismissing notification stack.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use starlog_core::{Notifier, Toast};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Identifier of a toast within its stack.
pub type ToastId = u64;

/// Change notifications for renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Shown { id: ToastId, toast: Toast },
    Dismissed { id: ToastId },
}

/// Stack of visible toasts, newest last.
///
/// Each toast removes itself after the configured duration; dismissing a
/// toast that is already gone is a no-op.
#[derive(Debug, Clone)]
pub struct ToastStack {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    duration: Duration,
    next_id: AtomicU64,
    visible: Mutex<Vec<(ToastId, Toast)>>,
    events: broadcast::Sender<ToastEvent>,
}

impl Inner {
    fn remove(&self, id: ToastId) -> bool {
        let removed = {
            let mut visible = self.visible.lock().unwrap_or_else(|e| e.into_inner());
            let before = visible.len();
            visible.retain(|(existing, _)| *existing != id);
            visible.len() != before
        };
        if removed {
            let _ = self.events.send(ToastEvent::Dismissed { id });
        }
        removed
    }
}

impl ToastStack {
    pub fn new(duration: Duration) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(Inner {
                duration,
                next_id: AtomicU64::new(1),
                visible: Mutex::new(Vec::new()),
                events,
            }),
        }
    }

    /// Pushes a toast and arms its auto-dismiss timer.
    pub fn show(&self, toast: Toast) -> ToastId {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(id, severity = %toast.severity, message = %toast.message, "toast shown");

        self.inner
            .visible
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, toast.clone()));
        let _ = self.inner.events.send(ToastEvent::Shown { id, toast });

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.inner);
                handle.spawn(async move {
                    tokio::time::sleep(inner.duration).await;
                    inner.remove(id);
                });
            }
            Err(_) => warn!(id, "no tokio runtime; toast will not auto-dismiss"),
        }
        id
    }

    /// Removes a toast early. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.inner.remove(id)
    }

    /// Snapshot of visible toasts, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        self.inner
            .visible
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, toast)| toast.clone())
            .collect()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.inner.events.subscribe()
    }
}

impl Notifier for ToastStack {
    fn notify(&self, toast: Toast) {
        self.show(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[tokio::test(start_paused = true)]
    async fn toasts_stack_and_expire() {
        let stack = ToastStack::new(Duration::from_secs(5));
        stack.show(Toast::success("Deleted"));
        tokio::time::sleep(Duration::from_secs(2)).await;
        stack.show(Toast::error("Network error"));

        assert_eq!(stack.visible().len(), 2);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(stack.visible(), vec![Toast::error("Network error")]);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(stack.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_after_manual_dismiss_is_harmless() {
        let stack = ToastStack::new(Duration::from_secs(5));
        let mut events = stack.subscribe();
        let id = stack.show(Toast::success("Saved"));

        assert!(stack.dismiss(id));
        assert!(!stack.dismiss(id));
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(stack.visible().is_empty());

        assert!(matches!(events.recv().await, Ok(ToastEvent::Shown { .. })));
        assert_eq!(events.recv().await.unwrap(), ToastEvent::Dismissed { id });
        assert!(events.try_recv().is_err());
    }

    #[test]
    #[traced_test]
    fn show_without_runtime_keeps_toast() {
        let stack = ToastStack::new(Duration::from_millis(1));
        stack.notify(Toast::error("offline"));
        assert_eq!(stack.visible().len(), 1);
        assert!(logs_contain("will not auto-dismiss"));
    }
}
