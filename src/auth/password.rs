/// Credential Verification
///
/// Checks a presented username/password pair against the stored bcrypt hash.
/// bcrypt performs the comparison in constant time internally, so timing does
/// not reveal how much of the password matched.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::{AppError, AuthError};
use crate::user_store::UserStore;

/// Hash a password using bcrypt
///
/// Only used to provision the in-memory store; this service does not expose
/// registration.
///
/// # Errors
/// Returns error if bcrypt hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a presented credential pair against the user store
///
/// # Returns
/// The user's ID on success.
///
/// # Errors
/// - `NotFound` when no user matches the username (case-sensitive)
/// - `InvalidCredentials` when the password does not match the stored hash
///
/// The two failures are distinguished here for telemetry only; the HTTP
/// boundary collapses them into one response. The raw password is never
/// logged and no handle to it is retained after this call returns.
pub fn verify_credentials(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<i64, AppError> {
    let user = store
        .find_by_username(username)
        .ok_or(AuthError::NotFound)?;

    let password_valid = verify(password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(user.id)
}
