//! Account Entity
//!
//! The credential record: user name plus password hash. Created once at
//! registration and never mutated.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};

/// Account credentials entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique, case-sensitive login handle
    pub user_name: UserName,
    /// Argon2id PHC string (salt and parameters included)
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account
    pub fn new(user_name: UserName, password_hash: UserPassword) -> Self {
        Self {
            user_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
