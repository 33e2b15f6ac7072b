/// Authentication module
///
/// Token issuance/verification, credential checks, and the session facade
/// that ties them together.

mod claims;
mod password;
mod session;
mod token;

pub use claims::Claims;
pub use claims::TokenKind;
pub use password::hash_password;
pub use password::verify_credentials;
pub use session::login;
pub use session::refresh;
pub use session::TokenPair;
pub use token::issue_access_token;
pub use token::issue_refresh_token;
pub use token::verify_token;
