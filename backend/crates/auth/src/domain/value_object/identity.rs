//! Identity Value Object
//!
//! The resolved caller of a protected operation.

use serde::Serialize;

use super::user_name::UserName;

/// Authenticated caller, produced only by the session gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_name: UserName,
}

impl Identity {
    pub(crate) fn new(user_name: UserName) -> Self {
        Self { user_name }
    }
}
