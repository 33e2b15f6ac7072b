/// Middleware module
///
/// Custom middleware for authentication and other cross-cutting concerns.

mod auth_guard;

pub use auth_guard::AuthGuard;
pub use auth_guard::CurrentUser;
