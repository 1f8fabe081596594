//! Error taxonomy for calls against the TinyLink backend.
//!
//! Every remote-call failure is converted into a [`ClientError`] at the
//! operation boundary. The `Display` output of each variant is the exact
//! user-facing text, so stores can publish `err.to_string()` verbatim.

use thiserror::Error;

/// Fallback text for a 409 whose body carries no usable `message`.
pub const CONFLICT_FALLBACK_MESSAGE: &str = "Custom code already exists.";

/// Generic failure text for a rejected create.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create link. Please check your URL.";

/// Error state shown in place of the link table when the list fetch fails.
pub const LOAD_FAILED_MESSAGE: &str = "Could not load links.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rejected locally before submission; never reaches the backend.
    #[error("{message}")]
    Validation { message: String },

    /// HTTP 409 on create. The backend message is authoritative.
    #[error("{message}")]
    Conflict { message: String },

    /// Stats lookup for a code the backend does not know.
    #[error("{message}")]
    NotFound { code: String, message: String },

    /// Network failure or an unexpected non-2xx status.
    #[error("{message}")]
    Transport { message: String },
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Builds the "not found" failure naming `code`.
    pub fn not_found(code: impl Into<String>) -> Self {
        let code = code.into();
        Self::NotFound {
            message: format!("Link not found for code: {code}"),
            code,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Short machine-readable kind, used as a log field and metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Conflict { .. } => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::Transport { .. } => "transport_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_user_message() {
        let err = ClientError::conflict("Custom code already exists.");
        assert_eq!(err.to_string(), "Custom code already exists.");

        let err = ClientError::not_found("abc123");
        assert_eq!(err.to_string(), "Link not found for code: abc123");
        assert!(matches!(err, ClientError::NotFound { ref code, .. } if code == "abc123"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ClientError::validation("x").kind(), "validation_error");
        assert_eq!(ClientError::conflict("x").kind(), "conflict");
        assert_eq!(ClientError::not_found("x").kind(), "not_found");
        assert_eq!(ClientError::transport("x").kind(), "transport_error");
    }
}
