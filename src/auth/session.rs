/// Session Facade
///
/// Orchestrates the login and refresh flows over the credential verifier and
/// the token issuer/verifier. The protected-resource guard lives in the
/// middleware module and calls into the same verifier.

use serde::Serialize;

use crate::auth::claims::TokenKind;
use crate::auth::password::verify_credentials;
use crate::auth::token::{issue_access_token, issue_refresh_token, verify_token};
use crate::configuration::TokenSettings;
use crate::error::AppError;
use crate::user_store::UserStore;

/// Access and refresh token returned once at login.
///
/// The two tokens are independent values with independent expiries; they
/// share only the subject.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authenticate a credential pair and mint a token pair
///
/// # Errors
/// `NotFound` or `InvalidCredentials` on credential failure; both map to the
/// same 401 at the HTTP boundary.
pub fn login(
    store: &dyn UserStore,
    username: &str,
    password: &str,
    config: &TokenSettings,
) -> Result<TokenPair, AppError> {
    let user_id = verify_credentials(store, username, password)?;

    let access_token = issue_access_token(user_id, config)?;
    let refresh_token = issue_refresh_token(user_id, config)?;

    tracing::info!(user_id = user_id, "User logged in");

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Exchange a valid refresh token for a new access token
///
/// The refresh token itself is not rotated; it stays valid until its natural
/// expiry.
///
/// # Errors
/// `Malformed`, `InvalidSignature`, or `Expired` from verification; all map
/// to 403 at the HTTP boundary.
pub fn refresh(refresh_token: &str, config: &TokenSettings) -> Result<String, AppError> {
    let claims = verify_token(refresh_token, TokenKind::Refresh, config)?;
    let user_id = claims.user_id()?;

    let access_token = issue_access_token(user_id, config)?;

    tracing::info!(user_id = user_id, "Access token refreshed");

    Ok(access_token)
}
