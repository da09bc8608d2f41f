//! Credential Store
//!
//! Owns the user name → password hash mapping. Registration hashes and
//! persists; verification recomputes against the stored hash. Plaintext is
//! never persisted or logged.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{account::Account, account_profile::AccountProfile};
use crate::domain::error::CredentialError;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{CandidatePassword, RawPassword},
};
use crate::error::{AuthError, AuthResult};

/// Outcome of a credential check
///
/// Transient; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCheck {
    Verified(UserName),
    Rejected(CredentialError),
}

/// Credential store over an account repository
pub struct CredentialStore<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CredentialStore<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Hash and persist a new account
    ///
    /// ## Errors
    /// - `AuthError::UserNameTaken` if the name exists, including when a
    ///   concurrent registration wins the insert
    /// - `AuthError::PasswordValidation` if the breach check finds the password
    pub async fn register(&self, user_name: UserName, password: RawPassword) -> AuthResult<Account> {
        let account = self.prepare(user_name, password).await?;
        self.repo.insert_account_if_absent(&account).await?;

        tracing::info!(user_name = %account.user_name, "Account registered");

        Ok(account)
    }

    /// Like [`register`](Self::register), storing the profile in the same
    /// write
    pub async fn register_with_profile(
        &self,
        user_name: UserName,
        password: RawPassword,
        profile: &AccountProfile,
    ) -> AuthResult<Account> {
        let account = self.prepare(user_name, password).await?;
        self.repo
            .insert_account_with_profile(&account, profile)
            .await?;

        tracing::info!(user_name = %account.user_name, "Account registered");

        Ok(account)
    }

    async fn prepare(&self, user_name: UserName, password: RawPassword) -> AuthResult<Account> {
        // Fast path; the insert is the authoritative check
        if self.repo.exists_account(&user_name).await? {
            return Err(CredentialError::DuplicateUsername.into());
        }

        if self.config.check_breached_passwords {
            match password.is_compromised().await {
                Ok(true) => {
                    return Err(AuthError::PasswordValidation(
                        RawPassword::compromised_error(),
                    ));
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Breach check unavailable, continuing");
                }
            }
        }

        let password_hash = password.into_hash(self.config.pepper()).await?;
        Ok(Account::new(user_name, password_hash))
    }

    /// Check a user name and password
    ///
    /// Unknown names still cost one hash verification.
    pub async fn verify(&self, user_name: &str, password: String) -> AuthResult<CredentialCheck> {
        let candidate = CandidatePassword::new(password);

        let account = match UserName::new(user_name) {
            Ok(name) => self.repo.find_account(&name).await?,
            Err(_) => None,
        };

        let Some(account) = account else {
            if let Some(candidate) = candidate {
                candidate.verify_dummy().await;
            }
            return Ok(CredentialCheck::Rejected(CredentialError::UnknownUsername));
        };

        let Some(candidate) = candidate else {
            return Ok(CredentialCheck::Rejected(CredentialError::BadPassword));
        };

        if account
            .password_hash
            .verify(candidate, self.config.pepper())
            .await?
        {
            Ok(CredentialCheck::Verified(account.user_name))
        } else {
            Ok(CredentialCheck::Rejected(CredentialError::BadPassword))
        }
    }

    /// Whether an account with this exact name exists
    pub async fn exists(&self, user_name: &UserName) -> AuthResult<bool> {
        self.repo.exists_account(user_name).await
    }
}
