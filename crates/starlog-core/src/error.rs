// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Starlog observation log.

use thiserror::Error;

/// The error type shared by every Starlog crate boundary.
///
/// Variants follow the failure classes the list and form controllers
/// distinguish: transport/decode failures, application-level rejections,
/// and preconditions caught before any network call.
#[derive(Debug, Error)]
pub enum StarlogError {
    /// Configuration errors (invalid TOML, bad URLs, unusable client settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP request did not complete.
    #[error("request failed: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The response body was not the JSON shape we expected.
    #[error("invalid response: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The server answered but refused the operation (`success: false`).
    #[error("{message}")]
    Rejected { message: String },

    /// A precondition failed before any network call was made.
    #[error("{0}")]
    Precondition(String),

    /// A record lookup found nothing.
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// Submitted data failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StarlogError {
    /// Builds a transport error wrapping its source.
    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Builds a decode error wrapping its source.
    pub fn decode(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Message suitable for a user-facing notification.
    ///
    /// Rejections and precondition failures carry their own wording; every
    /// other class falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { message } if !message.trim().is_empty() => message.clone(),
            Self::Precondition(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_shown_verbatim() {
        let err = StarlogError::Rejected {
            message: "Observation is locked".into(),
        };
        assert_eq!(err.user_message("generic"), "Observation is locked");
        assert_eq!(err.to_string(), "Observation is locked");
    }

    #[test]
    fn empty_rejection_uses_fallback() {
        let err = StarlogError::Rejected {
            message: "  ".into(),
        };
        assert_eq!(err.user_message("generic"), "generic");
    }

    #[test]
    fn transport_errors_use_fallback() {
        let err = StarlogError::transport("connect refused", std::io::Error::other("boom"));
        assert_eq!(err.user_message("Network error"), "Network error");
        assert!(err.to_string().contains("connect refused"));
    }
}
