//! Session Gate
//!
//! Single entry point for protected operations: token validation followed
//! by re-resolving the subject against the account store.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::credential_store::CredentialStore;
use crate::application::token_service::TokenService;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::identity::Identity;
use crate::error::{AuthError, AuthResult};

/// Session gate use case
pub struct SessionGate<R>
where
    R: AccountRepository,
{
    tokens: TokenService,
    credentials: CredentialStore<R>,
}

impl<R> SessionGate<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            tokens: TokenService::new(config.clone()),
            credentials: CredentialStore::new(repo, config),
        }
    }

    /// Resolve the caller behind `token`
    ///
    /// ## Errors
    /// - `AuthError::Unauthorized` for any token failure or a vanished account
    /// - `AuthError::Database` if the account lookup itself fails
    pub async fn authorize(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Identity> {
        let user_name = self.tokens.decode_and_validate(token, now).map_err(|e| {
            tracing::debug!(reason = %e, "Token rejected");
            AuthError::from(e)
        })?;

        if !self.credentials.exists(&user_name).await? {
            tracing::debug!(user_name = %user_name, "Token subject no longer exists");
            return Err(AuthError::Unauthorized);
        }

        Ok(Identity::new(user_name))
    }
}
