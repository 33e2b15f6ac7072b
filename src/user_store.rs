/// User Store
///
/// Lookup capability for user records. The core only ever reads users; how
/// they are provisioned is the concern of an external store. The in-memory
/// implementation stands in for that store and seeds the single well-known
/// `admin` account.

use std::sync::Arc;

use crate::auth::hash_password;
use crate::error::AppError;

/// Immutable-per-session identity record.
///
/// Holds the salted one-way password hash, never a raw password.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Lookup capability the core depends on instead of a storage technology.
///
/// The lookup is the only potentially blocking step in the authentication
/// flow; hosts are free to run it on a blocking pool.
pub trait UserStore: Send + Sync {
    /// Case-sensitive exact-match lookup by username.
    fn find_by_username(&self, username: &str) -> Option<User>;
}

/// In-memory user store backed by a fixed list.
pub struct InMemoryUserStore {
    users: Vec<User>,
}

impl InMemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Store with the single seeded `admin`/`admin` account (id 1).
    ///
    /// Hashing happens once at startup; a bcrypt failure here is fatal.
    pub fn seeded() -> Result<Self, AppError> {
        let password_hash = hash_password("admin")?;

        Ok(Self::new(vec![User {
            id: 1,
            username: "admin".to_string(),
            password_hash,
        }]))
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.iter().find(|u| u.username == username).cloned()
    }
}

/// Shared handle used as actix app data.
pub type SharedUserStore = Arc<dyn UserStore>;
