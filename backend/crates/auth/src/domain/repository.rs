//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::{account::Account, account_profile::AccountProfile};
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Find account by exact user name
    async fn find_account(&self, user_name: &UserName) -> AuthResult<Option<Account>>;

    /// Check if an account exists
    async fn exists_account(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Persist a new account unless the user name is taken
    ///
    /// Check and write are one atomic step: of two concurrent calls for the
    /// same name exactly one succeeds, the other gets
    /// `AuthError::UserNameTaken`.
    async fn insert_account_if_absent(&self, account: &Account) -> AuthResult<()>;

    /// Persist a new account together with its profile
    ///
    /// Same uniqueness rule as [`insert_account_if_absent`]; both rows are
    /// written or neither is.
    ///
    /// [`insert_account_if_absent`]: LocalAccountRepository::insert_account_if_absent
    async fn insert_account_with_profile(
        &self,
        account: &Account,
        profile: &AccountProfile,
    ) -> AuthResult<()>;
}

/// Account profile repository trait
///
/// Profiles are written only alongside their account, see
/// [`LocalAccountRepository::insert_account_with_profile`].
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Find profile by user name
    async fn find_profile(&self, user_name: &UserName) -> AuthResult<Option<AccountProfile>>;
}
