mod auth;
mod health_check;
mod protected;

pub use auth::login;
pub use auth::refresh;
pub use health_check::health_check;
pub use protected::protected;
