//! Domain Layer
//!
//! Contains entities, value objects, failure kinds and repository traits.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    account::Account,
    account_profile::{AccountProfile, ProfileDraft},
    token::{IssuedToken, TokenClaims},
};
pub use error::{CredentialError, TokenError};
pub use repository::{AccountRepository, ProfileRepository};
pub use value_object::{identity::Identity, user_name::UserName};
