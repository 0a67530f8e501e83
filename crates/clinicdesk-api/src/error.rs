//! # API Error Types
//!
//! Error types for the authenticated REST client.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Credentials    │  │   Transport     │  │     Protocol            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  AuthFailed     │  │  Transport      │  │  Http (status+message)  │ │
//! │  │  SessionExpired │  │  (no response)  │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  AuthFailed      → wrong username/password at login (400/401)          │
//! │  SessionExpired  → 401 whose guarded refresh also failed; the client   │
//! │                    clears both tokens before this is surfaced          │
//! │  Http            → any other non-2xx, with the server message when     │
//! │                    one was supplied                                    │
//! │  Transport       → no response at all (connection refused, DNS, ...)   │
//! │  Decode          → 2xx whose body didn't match the expected shape      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Fixed message used when no response was received at all.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Network error";

/// Fallback message used when a failing response carries no usable body.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

/// API client error covering every way a request can fail.
///
/// ## Design Principles
/// - Each variant carries enough context for a user-facing message
/// - Errors are categorized for different handling strategies: AuthFailed is
///   shown on the login form, SessionExpired sends the user back to login,
///   everything else surfaces where the operation was triggered
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login rejected because the credentials didn't match (HTTP 400/401).
    #[error("{0}")]
    AuthFailed(String),

    /// An authenticated request got a 401 and the guarded refresh could not
    /// recover it. Both stored tokens have already been cleared.
    #[error("Session expired. Please sign in again.")]
    SessionExpired,

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Http {
        status: StatusCode,
        message: String,
        payload: Option<serde_json::Value>,
    },

    /// No response was received at all (connection refused, DNS failure,
    /// transport-level timeout).
    #[error("Network error: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be decoded into the expected type.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The configured base URL (or a path joined onto it) is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Wraps a reqwest send error as a transport failure.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }

    /// Builds the bad-credentials error shown on the login form.
    pub(crate) fn bad_credentials() -> Self {
        ApiError::AuthFailed("Username or password didn't match. Please try again.".to_string())
    }

    /// Returns true if this error must end the session (the UI should route
    /// back to the login screen).
    pub fn is_session_terminal(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
