/// Token Issuance and Verification
///
/// Mints and validates the HS256-signed tokens (JWTs) used for
/// authentication. Access and refresh tokens are signed with distinct
/// secrets, selected by token kind.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::auth::claims::{Claims, TokenKind};
use crate::configuration::TokenSettings;
use crate::error::{AppError, AuthError};

fn secret_for(kind: TokenKind, config: &TokenSettings) -> &str {
    match kind {
        TokenKind::Access => &config.access_secret,
        TokenKind::Refresh => &config.refresh_secret,
    }
}

fn ttl_for(kind: TokenKind, config: &TokenSettings) -> i64 {
    match kind {
        TokenKind::Access => config.access_ttl,
        TokenKind::Refresh => config.refresh_ttl,
    }
}

/// Issue a short-lived access token for a user
///
/// # Errors
/// Returns error if token encoding fails
pub fn issue_access_token(user_id: i64, config: &TokenSettings) -> Result<String, AppError> {
    issue_at(user_id, TokenKind::Access, Utc::now().timestamp(), config)
}

/// Issue a long-lived refresh token for a user
///
/// # Errors
/// Returns error if token encoding fails
pub fn issue_refresh_token(user_id: i64, config: &TokenSettings) -> Result<String, AppError> {
    issue_at(user_id, TokenKind::Refresh, Utc::now().timestamp(), config)
}

/// Issuance is pure given `(user_id, kind, now, config)`; the public entry
/// points only supply the wall clock.
fn issue_at(
    user_id: i64,
    kind: TokenKind,
    now: i64,
    config: &TokenSettings,
) -> Result<String, AppError> {
    let claims = Claims::new(user_id, kind, ttl_for(kind, config), now);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret_for(kind, config).as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Validate a token against the secret for `expected_kind` and extract its
/// claims
///
/// # Errors
/// - `Malformed` for input that cannot be decoded (garbage, missing claims)
/// - `InvalidSignature` if the signature does not verify for the expected
///   kind's secret, or the embedded kind disagrees with `expected_kind`
/// - `Expired` once `now >= exp + leeway`
pub fn verify_token(
    token: &str,
    expected_kind: TokenKind,
    config: &TokenSettings,
) -> Result<Claims, AppError> {
    verify_at(token, expected_kind, Utc::now().timestamp(), config)
}

fn verify_at(
    token: &str,
    expected_kind: TokenKind,
    now: i64,
    config: &TokenSettings,
) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below so that the boundary is exact at `exp` and the
    // leeway comes from configuration.
    validation.validate_exp = false;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret_for(expected_kind, config).as_bytes()),
        &validation,
    )
    .map_err(classify_decode_error)?;
    let claims = data.claims;

    // Distinct secrets already reject cross-kind tokens at the signature
    // check; the embedded kind covers a misconfigured secret pair.
    if claims.kind != expected_kind {
        tracing::warn!(expected = ?expected_kind, found = ?claims.kind, "Token kind mismatch");
        return Err(AuthError::InvalidSignature.into());
    }

    if now >= claims.exp + config.leeway {
        return Err(AuthError::Expired.into());
    }

    Ok(claims)
}

/// Distinguish "garbage input" from "tampered token" for telemetry.
fn classify_decode_error(err: jsonwebtoken::errors::Error) -> AppError {
    let auth_err = match err.kind() {
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Malformed,
    };
    tracing::debug!(error = %err, classified = %auth_err, "Token decode failed");
    auth_err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn get_test_config() -> TokenSettings {
        TokenSettings {
            access_secret: "access-secret-at-least-32-characters".to_string(),
            refresh_secret: "refresh-secret-at-least-32-characters".to_string(),
            access_ttl: 900,
            refresh_ttl: 604800,
            leeway: 0,
        }
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let config = get_test_config();

        let token = issue_at(1, TokenKind::Access, NOW, &config).expect("Failed to issue token");
        let claims =
            verify_at(&token, TokenKind::Access, NOW, &config).expect("Failed to verify token");

        assert_eq!(claims.user_id().unwrap(), 1);
        assert_eq!(claims.iat, NOW);
        assert_eq!(claims.exp, NOW + config.access_ttl);
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_issue_and_verify_refresh_token() {
        let config = get_test_config();

        let token = issue_at(1, TokenKind::Refresh, NOW, &config).expect("Failed to issue token");
        let claims =
            verify_at(&token, TokenKind::Refresh, NOW, &config).expect("Failed to verify token");

        assert_eq!(claims.exp, NOW + config.refresh_ttl);
        assert_eq!(claims.kind, TokenKind::Refresh);
    }

    #[test]
    fn test_kind_separation() {
        let config = get_test_config();

        let access = issue_at(1, TokenKind::Access, NOW, &config).unwrap();
        let refresh = issue_at(1, TokenKind::Refresh, NOW, &config).unwrap();

        let err = verify_at(&access, TokenKind::Refresh, NOW, &config).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidSignature)));

        let err = verify_at(&refresh, TokenKind::Access, NOW, &config).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_tampered_token_is_invalid_signature() {
        let config = get_test_config();

        let token = issue_at(1, TokenKind::Access, NOW, &config).unwrap();
        let tampered = format!("{}X", token);

        let err = verify_at(&tampered, TokenKind::Access, NOW, &config).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_garbage_input_is_malformed() {
        let config = get_test_config();

        for garbage in ["", "invalid", "not.a.token", "a.b.c.d"] {
            let err = verify_at(garbage, TokenKind::Access, NOW, &config).unwrap_err();
            assert!(
                matches!(err, AppError::Auth(AuthError::Malformed)),
                "Expected Malformed for input: {:?}",
                garbage
            );
        }
    }

    #[test]
    fn test_expiry_boundary_is_exact() {
        let config = get_test_config();

        let token = issue_at(1, TokenKind::Access, NOW, &config).unwrap();

        // Valid strictly before the expiry instant.
        assert!(verify_at(&token, TokenKind::Access, NOW + config.access_ttl - 1, &config).is_ok());

        // Expired exactly at the expiry instant.
        let err =
            verify_at(&token, TokenKind::Access, NOW + config.access_ttl, &config).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::Expired)));
    }

    #[test]
    fn test_leeway_extends_validity() {
        let mut config = get_test_config();
        config.leeway = 30;

        let token = issue_at(1, TokenKind::Access, NOW, &config).unwrap();
        let exp = NOW + config.access_ttl;

        assert!(verify_at(&token, TokenKind::Access, exp + 29, &config).is_ok());
        let err = verify_at(&token, TokenKind::Access, exp + 30, &config).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::Expired)));
    }

    #[test]
    fn test_short_ttl_token_expires() {
        let mut config = get_test_config();
        config.refresh_ttl = 1;

        let token = issue_at(1, TokenKind::Refresh, NOW - 1, &config).unwrap();
        let err = verify_at(&token, TokenKind::Refresh, NOW, &config).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::Expired)));
    }

    #[test]
    fn test_kind_claim_mismatch_with_matching_secret() {
        // If both kinds were (mis)configured with one secret, the embedded
        // kind claim still rejects cross-use.
        let config = get_test_config();
        let claims = Claims::new(1, TokenKind::Refresh, 900, NOW);

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.access_secret.as_bytes()),
        )
        .unwrap();

        let err = verify_at(&token, TokenKind::Access, NOW, &config).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_issuance_is_deterministic() {
        let config = get_test_config();

        let a = issue_at(1, TokenKind::Access, NOW, &config).unwrap();
        let b = issue_at(1, TokenKind::Access, NOW, &config).unwrap();

        assert_eq!(a, b);
    }
}
