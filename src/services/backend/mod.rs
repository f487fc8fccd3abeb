pub mod rest;

use async_trait::async_trait;

use crate::models::{BookingRecord, BookingUpdate, ServiceSummary, UserSummary};

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("no detail"))]
    Remote { status: u16, message: Option<String> },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid backend response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown to the user: the backend's own message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Unauthorized".to_string(),
            ApiError::Remote {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Remote { status, .. } => *status >= 500,
            ApiError::Unauthorized | ApiError::Decode(_) => false,
        }
    }
}

/// Supplies the bearer credential for backend calls.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self((!token.trim().is_empty()).then_some(token))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Backend operations the booking detail view depends on.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn get_booking(&self, id: &str) -> Result<BookingRecord, ApiError>;
    async fn get_user(&self, id: &str) -> Result<UserSummary, ApiError>;
    async fn get_service(&self, id: &str) -> Result<ServiceSummary, ApiError>;
    async fn update_booking(
        &self,
        id: &str,
        update: &BookingUpdate,
    ) -> Result<BookingRecord, ApiError>;
    async fn delete_booking(&self, id: &str) -> Result<(), ApiError>;
}

/// Pull a human-readable message out of a backend error body.
pub fn backend_error_message(body: &serde_json::Value) -> Option<String> {
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message() {
        let remote = ApiError::Remote {
            status: 404,
            message: Some("Booking not found".to_string()),
        };
        assert_eq!(remote.user_message(), "Booking not found");

        let bare = ApiError::Remote {
            status: 500,
            message: None,
        };
        assert_eq!(bare.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(
            ApiError::Transport("connection reset".into()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(ApiError::Unauthorized.user_message(), "Unauthorized");
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::Transport("timeout".into()).is_retryable());
        assert!(ApiError::Remote { status: 503, message: None }.is_retryable());
        assert!(!ApiError::Remote { status: 404, message: None }.is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
    }

    #[test]
    fn test_backend_error_message() {
        assert_eq!(
            backend_error_message(&json!({"message": "Slot taken"})).as_deref(),
            Some("Slot taken")
        );
        assert_eq!(
            backend_error_message(&json!({"error": "Invalid token"})).as_deref(),
            Some("Invalid token")
        );
        assert_eq!(backend_error_message(&json!({"message": "  "})), None);
        assert_eq!(backend_error_message(&json!({"ok": false})), None);
    }

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken::new("abc").bearer_token().as_deref(), Some("abc"));
        assert_eq!(StaticToken::new("  ").bearer_token(), None);
        assert_eq!(StaticToken::none().bearer_token(), None);
    }
}
