/// Token Claims structure
///
/// Represents the payload of a signed token: subject, timestamps, and the
/// token kind (RFC 7519 style).

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AuthError};

/// Token kind: access vs. refresh
///
/// Each kind is signed with a distinct secret, so a token of one kind can
/// never verify as the other. The kind is also embedded in the claims as a
/// second line of defense.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by both access and refresh tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as a string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token kind this set of claims was signed for
    pub kind: TokenKind,
}

impl Claims {
    /// Create new claims for a subject, expiring `ttl_seconds` after `now`.
    pub fn new(user_id: i64, kind: TokenKind, ttl_seconds: i64, now: i64) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: now,
            exp: now + ttl_seconds,
            kind,
        }
    }

    /// Extract the subject user ID from the claims.
    ///
    /// # Errors
    /// Returns `Malformed` if the subject is not a numeric user ID.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AuthError::Malformed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(1, TokenKind::Access, 900, 1_000_000);

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.iat, 1_000_000);
        assert_eq!(claims.exp, 1_000_900);
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_expiry_is_after_issuance_for_positive_ttl() {
        let claims = Claims::new(1, TokenKind::Refresh, 604800, 1_000_000);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_user_id_extraction() {
        let claims = Claims::new(42, TokenKind::Access, 900, 1_000_000);
        assert_eq!(claims.user_id().unwrap(), 42);
    }

    #[test]
    fn test_invalid_subject_is_malformed() {
        let mut claims = Claims::new(1, TokenKind::Access, 900, 1_000_000);
        claims.sub = "not-a-number".to_string();

        assert!(claims.user_id().is_err());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TokenKind::Access).unwrap();
        assert_eq!(json, "\"access\"");
        let json = serde_json::to_string(&TokenKind::Refresh).unwrap();
        assert_eq!(json, "\"refresh\"");
    }
}
