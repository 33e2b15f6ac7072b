/// Authentication Routes
///
/// Login and token refresh handlers. These stay thin: the session facade in
/// the auth module does the work, and `AppError`'s `ResponseError` impl
/// produces the boundary responses.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::configuration::TokenSettings;
use crate::error::{AppError, AuthError};
use crate::user_store::UserStore;

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token refresh request
///
/// The field is optional so that an absent `refresh_token` maps to a 401
/// rather than a deserialization failure.
#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Refresh response: a new access token only, the refresh token is unchanged
#[derive(Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// POST /login
///
/// Authenticate with username and password; returns an access/refresh token
/// pair on success.
///
/// # Errors
/// - 401: Any credential failure ("no such user" and "wrong password" are
///   indistinguishable to the caller)
/// - 500: Internal server error
pub async fn login(
    form: web::Json<LoginRequest>,
    store: web::Data<dyn UserStore>,
    token_config: web::Data<TokenSettings>,
) -> Result<HttpResponse, AppError> {
    let pair = auth::login(
        store.get_ref(),
        &form.username,
        &form.password,
        token_config.get_ref(),
    )?;

    Ok(HttpResponse::Ok().json(pair))
}

/// POST /refresh
///
/// Exchange a valid refresh token for a new access token. The refresh token
/// is not rotated; it stays usable until its own expiry.
///
/// # Errors
/// - 401: `refresh_token` missing from the body
/// - 403: Invalid or expired refresh token (including access tokens
///   presented in its place)
/// - 500: Internal server error
pub async fn refresh(
    form: web::Json<RefreshRequest>,
    token_config: web::Data<TokenSettings>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = form
        .refresh_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let access_token = auth::refresh(refresh_token, token_config.get_ref())?;

    Ok(HttpResponse::Ok().json(RefreshResponse { access_token }))
}
