/// Error Handling Module
///
/// Unified error handling for the authentication service:
/// 1. Domain-specific error types for the credential and token flows
/// 2. A central `AppError` used for control flow
/// 3. HTTP response mapping that collapses internal distinctions into
///    generic client-visible outcomes
/// 4. Structured error logging that keeps the internal distinctions

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// Authentication and authorization errors
///
/// The variants are finer-grained than what clients see: `NotFound` vs
/// `InvalidCredentials` and `Malformed` vs `InvalidSignature` vs `Expired`
/// matter for telemetry, but each group collapses to a single externally
/// visible response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No user record for the presented username.
    NotFound,
    /// Username exists but the password does not match.
    InvalidCredentials,
    /// No bearer token in the request's authorization data.
    MissingToken,
    /// Token could not be decoded at all (garbage input, missing claims).
    Malformed,
    /// Token decoded but the signature does not verify against the expected
    /// kind's secret. Cross-kind tokens land here.
    InvalidSignature,
    /// Signature verified but the token is past its expiry.
    Expired,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotFound => write!(f, "User not found"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::MissingToken => write!(f, "Missing authentication token"),
            AuthError::Malformed => write!(f, "Malformed token"),
            AuthError::InvalidSignature => write!(f, "Invalid token signature"),
            AuthError::Expired => write!(f, "Token has expired"),
        }
    }
}

impl StdError for AuthError {}

/// Central error type that all application errors map to
#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    /// Unique error ID for log correlation
    pub error_id: String,
    /// Generic human-readable message (never the internal variant)
    pub message: String,
    /// Error code for client-side handling
    pub code: String,
    /// HTTP status code
    pub status: u16,
    /// Timestamp when the error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_id: String, message: String, code: String, status: u16) -> Self {
        Self {
            error_id,
            message,
            code,
            status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl AppError {
    /// Map an error to its client-visible (status, code, message) triple.
    ///
    /// Credential failures collapse to one identical 401 so that "no such
    /// user" and "wrong password" cannot be told apart. Token failures
    /// collapse to one identical 403. A missing token is the one distinction
    /// clients do get: 401 with its own code, so they know to authenticate
    /// rather than re-acquire a token.
    fn response_parts(&self) -> (StatusCode, String, String) {
        match self {
            AppError::Auth(AuthError::NotFound) | AppError::Auth(AuthError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED".to_string(),
                "Invalid username or password".to_string(),
            ),
            AppError::Auth(AuthError::MissingToken) => (
                StatusCode::UNAUTHORIZED,
                "MISSING_TOKEN".to_string(),
                "Missing authentication token".to_string(),
            ),
            AppError::Auth(AuthError::Malformed)
            | AppError::Auth(AuthError::InvalidSignature)
            | AppError::Auth(AuthError::Expired) => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN".to_string(),
                "Invalid or expired token".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR".to_string(),
                "Internal server error".to_string(),
            ),
        }
    }

    /// Log the error with its internal distinction intact.
    fn log_error(&self, error_id: &str) {
        match self {
            AppError::Auth(e) => {
                tracing::warn!(
                    error_id = error_id,
                    error = %e,
                    "Authentication error"
                );
            }
            AppError::Internal(msg) => {
                tracing::error!(
                    error_id = error_id,
                    error = %msg,
                    "Internal error"
                );
            }
        }
    }
}

/// Implement ResponseError for Actix-web integration
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_id = uuid::Uuid::new_v4().to_string();
        self.log_error(&error_id);

        let (status, code, message) = self.response_parts();
        let body = ErrorResponse::new(error_id, message, code, status.as_u16());

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        self.response_parts().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_conversion() {
        let app_err: AppError = AuthError::Expired.into();
        match app_err {
            AppError::Auth(AuthError::Expired) => (),
            _ => panic!("Expected Auth(Expired)"),
        }
    }

    #[test]
    fn test_credential_failures_are_indistinguishable() {
        let not_found = AppError::Auth(AuthError::NotFound).response_parts();
        let bad_password = AppError::Auth(AuthError::InvalidCredentials).response_parts();

        assert_eq!(not_found, bad_password);
        assert_eq!(not_found.0, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_token_failures_are_indistinguishable() {
        let malformed = AppError::Auth(AuthError::Malformed).response_parts();
        let bad_signature = AppError::Auth(AuthError::InvalidSignature).response_parts();
        let expired = AppError::Auth(AuthError::Expired).response_parts();

        assert_eq!(malformed, bad_signature);
        assert_eq!(malformed, expired);
        assert_eq!(malformed.0, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_missing_token_is_unauthenticated_not_forbidden() {
        let (status, code, _) = AppError::Auth(AuthError::MissingToken).response_parts();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, "MISSING_TOKEN");
    }

    #[test]
    fn test_error_response_creation() {
        let response = ErrorResponse::new(
            "test-123".to_string(),
            "Test error".to_string(),
            "TEST_ERROR".to_string(),
            403,
        );

        assert_eq!(response.error_id, "test-123");
        assert_eq!(response.code, "TEST_ERROR");
        assert_eq!(response.status, 403);
    }
}
