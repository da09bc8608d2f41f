//! Domain Failure Kinds
//!
//! These never leave the process verbatim: the HTTP layer collapses them
//! into `InvalidCredentials` and `Unauthorized` (see `crate::error`).

use thiserror::Error;

/// Why a credential operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("user name already registered")]
    DuplicateUsername,

    #[error("no account with that user name")]
    UnknownUsername,

    #[error("password does not match")]
    BadPassword,
}

/// Why a bearer token was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    MalformedToken,

    #[error("token signature is invalid")]
    BadSignature,

    #[error("token has expired")]
    Expired,
}
