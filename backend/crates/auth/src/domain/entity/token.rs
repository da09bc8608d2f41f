//! Token Entity
//!
//! Claims carried by a bearer token and the issued token handed to callers.
//! Timestamps are Unix milliseconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_name::UserName;

/// Signed claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenClaims {
    /// Subject user name
    pub sub: String,
    /// Issued at (ms)
    pub iat: i64,
    /// Expires at (ms, inclusive)
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(subject: &UserName, issued_at_ms: i64, expires_at_ms: i64) -> Self {
        Self {
            sub: subject.as_str().to_string(),
            iat: issued_at_ms,
            exp: expires_at_ms,
        }
    }

    /// Subject present and validity window not inverted
    pub fn is_well_formed(&self) -> bool {
        !self.sub.is_empty() && self.exp >= self.iat
    }

    /// Still valid at `now_ms`; the expiry instant itself is accepted
    pub fn is_live_at(&self, now_ms: i64) -> bool {
        now_ms <= self.exp
    }
}

/// Token returned by registration and login
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded `v1.<payload>.<signature>` string
    pub token: String,
    pub subject: UserName,
    pub issued_at: DateTime<Utc>,
    pub expires_at_ms: i64,
}
