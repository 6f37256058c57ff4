// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page-level side effects: notifications, navigation and blocking prompts.

use crate::types::Toast;

/// Surface for transient notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Full-page navigation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Blocking user dialogs.
pub trait Prompt: Send + Sync {
    /// Asks a yes/no question; `false` means the user declined.
    fn confirm(&self, message: &str) -> bool;

    /// Shows a warning the user must acknowledge.
    fn alert(&self, message: &str);
}
