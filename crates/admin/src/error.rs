//! Unified error handling for the console.
//!
//! Every failure a screen can hit is a [`ConsoleError`]. Screens never let
//! an error escape as a crash: the front end turns it into a transient
//! [`Notice`] through [`ConsoleError::notice`].

use thiserror::Error;

use crate::components::Notice;
use crate::config::ConfigError;
use crate::session::SessionStoreError;

/// Console-level error type.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The request never reached the server, or its response was unreadable.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Server-supplied message, or a generic fallback.
        message: String,
    },

    /// No usable session; detected before any request is issued.
    #[error("Not signed in: {0}")]
    Auth(String),

    /// Credentials were valid but the account lacks the super-admin claim.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Client-side field validation failed.
    #[error("{0}")]
    Validation(String),

    /// The session document could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(#[from] SessionStoreError),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl ConsoleError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The standard "please sign in" failure.
    #[must_use]
    pub fn not_signed_in() -> Self {
        Self::Auth("No token found. Please log in again.".to_string())
    }

    /// HTTP status of a request failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the user has to sign in (again) to continue.
    #[must_use]
    pub const fn requires_sign_in(&self) -> bool {
        matches!(
            self,
            Self::Auth(_) | Self::Request { status: 401, .. }
        )
    }

    /// Convert into the user-visible notification.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Validation(message) => Notice::warning(message.clone()),
            _ => Notice::error(self.to_string()),
        }
    }

    /// Log the error and forward infrastructure failures to Sentry.
    pub fn report(&self) {
        if matches!(self, Self::Network(_) | Self::Storage(_)) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Console error"
            );
        } else {
            tracing::debug!(error = %self, "Console error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::NoticeLevel;

    #[test]
    fn test_request_error_displays_server_message() {
        let err = ConsoleError::Request {
            status: 422,
            message: "The email has already been taken.".to_string(),
        };
        assert_eq!(err.to_string(), "The email has already been taken.");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_validation_is_a_warning_notice() {
        let notice = ConsoleError::validation("Email is required").notice();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Email is required");
    }

    #[test]
    fn test_access_denied_is_an_error_notice() {
        let notice = ConsoleError::AccessDenied("Only Super Admin can log in.".to_string()).notice();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Access denied: Only Super Admin can log in.");
    }

    #[test]
    fn test_requires_sign_in() {
        assert!(ConsoleError::not_signed_in().requires_sign_in());
        assert!(
            ConsoleError::Request {
                status: 401,
                message: "Unauthenticated.".to_string()
            }
            .requires_sign_in()
        );
        assert!(!ConsoleError::validation("x").requires_sign_in());
    }
}
