//! Client error taxonomy
//!
//! Two classes only: transport failures (unreachable backend, non-JSON body)
//! and application failures reported by the backend with `success: false`.
//! Every error is terminal for the action that triggered it.

use thiserror::Error;

/// Fixed toast text for transport failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please retry";

/// Errors surfaced by [`crate::client::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a parseable JSON response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with `success: false` (or an `error` field).
    #[error("{0}")]
    Api(String),
}

impl ApiError {
    /// Build an application failure from an optional server message,
    /// falling back to a per-operation default.
    pub fn api(server_message: Option<String>, fallback: &str) -> Self {
        let message = server_message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        ApiError::Api(message)
    }

    /// Message suitable for a user-facing toast. Transport failures always
    /// collapse to the same fixed text; the underlying cause goes to the log.
    pub fn toast_message(&self) -> String {
        match self {
            ApiError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Api(message) => message.clone(),
        }
    }
}

/// Convenience alias for client results.
pub type ApiResult<T> = Result<T, ApiError>;
