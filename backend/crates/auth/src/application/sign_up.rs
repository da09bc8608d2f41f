//! Sign Up Use Case
//!
//! Creates a new account with its profile and issues the first token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::credential_store::CredentialStore;
use crate::application::token_service::TokenService;
use crate::domain::entity::account_profile::{AccountProfile, ProfileDraft, clean_field};
use crate::domain::entity::token::IssuedToken;
use crate::domain::error::CredentialError;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

const MISSING_FIELDS: &str =
    "Missing required registration fields: username, password, name, surname";

/// Sign up input
pub struct SignUpInput {
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub profile: ProfileDraft,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub issued: IssuedToken,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: AccountRepository,
{
    credentials: CredentialStore<R>,
    tokens: TokenService,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials: CredentialStore::new(repo, config.clone()),
            tokens: TokenService::new(config.clone()),
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !clean_field(s).is_empty());
        if !(present(&input.user_name)
            && input.password.as_deref().is_some_and(|p| !p.is_empty())
            && present(&input.profile.name)
            && present(&input.profile.surname))
        {
            return Err(AuthError::InvalidRequest(MISSING_FIELDS.to_string()));
        }

        let user_name = UserName::new(clean_field(input.user_name.as_deref().unwrap_or_default()))?;

        // A taken name is reported ahead of any password complaint
        if self.credentials.exists(&user_name).await? {
            return Err(CredentialError::DuplicateUsername.into());
        }

        let raw_password = RawPassword::new(input.password.unwrap_or_default())
            .map_err(AuthError::PasswordValidation)?;
        let profile = AccountProfile::new(user_name.clone(), input.profile)?;

        let account = self
            .credentials
            .register_with_profile(user_name, raw_password, &profile)
            .await?;

        let issued = self
            .tokens
            .issue(&account.user_name, Utc::now(), self.config.token_ttl)?;

        tracing::info!(
            user_name = %account.user_name,
            expires_at_ms = issued.expires_at_ms,
            "User signed up"
        );

        Ok(SignUpOutput { issued })
    }
}
