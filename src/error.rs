// Error handling module
// Classified failures for authentication and authenticated requests

use thiserror::Error;

/// Failures raised while building credentials or obtaining an access token
#[derive(Error, Debug)]
pub enum AuthError {
    /// Malformed credential set, raised at construction and never retried
    #[error("Configuration error: {0}")]
    Config(String),

    /// The LM environment answered with a non-success status
    #[error("{context} failed: unexpected status {status} - {body}")]
    UnexpectedStatus {
        context: &'static str,
        status: u16,
        body: String,
    },

    /// The LM environment answered with a body we could not use
    #[error("Invalid authentication response: {0}")]
    InvalidResponse(String),

    /// The round trip did not complete
    #[error("Authentication request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// No token is held after a refresh (should not happen)
    #[error("No access token available")]
    NoAccessToken,
}

impl AuthError {
    /// HTTP status carried by the failure, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthError::UnexpectedStatus { status, .. } => Some(*status),
            AuthError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors raised by authenticated requests against the LM API
#[derive(Error, Debug)]
pub enum ApiError {
    /// No token could be obtained, so the request was not sent
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Error from the LM API
    #[error("LM API error: {status} - {message}")]
    LmApiError { status: u16, message: String },

    /// The request did not complete
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AuthError::Config("client_secret is required".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: client_secret is required"
        );

        let err = AuthError::UnexpectedStatus {
            context: "Authentication request",
            status: 401,
            body: "Bad credentials".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Authentication request failed: unexpected status 401 - Bad credentials"
        );

        let err = AuthError::InvalidResponse("missing accessToken".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid authentication response: missing accessToken"
        );
    }

    #[test]
    fn test_status_accessor() {
        let err = AuthError::UnexpectedStatus {
            context: "Token request",
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(AuthError::NoAccessToken.status(), None);
        assert_eq!(AuthError::Config("x".to_string()).status(), None);
    }

    #[test]
    fn test_api_error_wraps_auth_error() {
        let err: ApiError = AuthError::NoAccessToken.into();
        assert!(matches!(err, ApiError::Auth(AuthError::NoAccessToken)));
        assert_eq!(
            err.to_string(),
            "Authentication failed: No access token available"
        );

        let err = ApiError::LmApiError {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(err.to_string(), "LM API error: 404 - Not found");
    }

    #[test]
    fn test_internal_error_message() {
        let err = ApiError::Internal(anyhow::anyhow!("Something went wrong"));
        assert_eq!(err.to_string(), "Internal error: Something went wrong");
    }
}
