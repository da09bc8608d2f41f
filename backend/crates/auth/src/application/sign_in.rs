//! Sign In Use Case
//!
//! Verifies credentials and issues a token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::credential_store::{CredentialCheck, CredentialStore};
use crate::application::token_service::TokenService;
use crate::domain::entity::token::IssuedToken;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub issued: IssuedToken,
}

/// Sign in use case
pub struct SignInUseCase<A>
where
    A: AccountRepository,
{
    credentials: CredentialStore<A>,
    tokens: TokenService,
    config: Arc<AuthConfig>,
}

impl<A> SignInUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials: CredentialStore::new(account_repo, config.clone()),
            tokens: TokenService::new(config.clone()),
            config,
        }
    }

    /// ## Errors
    /// `AuthError::InvalidCredentials` for an unknown name or a wrong
    /// password alike; the distinction is only logged.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let user_name = match self
            .credentials
            .verify(&input.user_name, input.password)
            .await?
        {
            CredentialCheck::Verified(user_name) => user_name,
            CredentialCheck::Rejected(reason) => {
                tracing::warn!(
                    user_name = %input.user_name.trim(),
                    reason = %reason,
                    "Sign in rejected"
                );
                return Err(AuthError::from(reason));
            }
        };

        let issued = self
            .tokens
            .issue(&user_name, Utc::now(), self.config.token_ttl)?;

        tracing::info!(
            user_name = %user_name,
            expires_at_ms = issued.expires_at_ms,
            "User signed in"
        );

        Ok(SignInOutput { issued })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
    use crate::infra::memory::InMemoryAuthRepository;

    async fn seeded() -> SignInUseCase<InMemoryAuthRepository> {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = Arc::new(AuthConfig::development());
        CredentialStore::new(repo.clone(), config.clone())
            .register(
                UserName::new("alice").unwrap(),
                RawPassword::new("secret123".into()).unwrap(),
            )
            .await
            .unwrap();
        SignInUseCase::new(repo, config)
    }

    fn input(user_name: &str, password: &str) -> SignInInput {
        SignInInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_issues_token() {
        let output = seeded()
            .await
            .execute(input("alice", "secret123"))
            .await
            .unwrap();
        assert_eq!(output.issued.subject.as_str(), "alice");
        assert!(output.issued.token.starts_with("v1."));
    }

    #[tokio::test]
    async fn test_failures_look_identical() {
        let use_case = seeded().await;
        for (user, pass) in [("alice", "wrong"), ("nobody", "secret123"), ("", "")] {
            let err = use_case.execute(input(user, pass)).await.err().unwrap();
            assert!(matches!(err, AuthError::InvalidCredentials), "{user}");
        }
    }
}
