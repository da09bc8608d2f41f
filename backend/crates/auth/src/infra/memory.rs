//! In-Memory Repository
//!
//! Process-local store for development runs without `DATABASE_URL` and for
//! tests. Contents are lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::{account::Account, account_profile::AccountProfile};
use crate::domain::error::CredentialError;
use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    accounts: HashMap<UserName, Account>,
    profiles: HashMap<UserName, AccountProfile>,
}

/// In-memory auth repository
///
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for InMemoryAuthRepository {
    async fn find_account(&self, user_name: &UserName) -> AuthResult<Option<Account>> {
        Ok(self.tables.read().await.accounts.get(user_name).cloned())
    }

    async fn exists_account(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self.tables.read().await.accounts.contains_key(user_name))
    }

    async fn insert_account_if_absent(&self, account: &Account) -> AuthResult<()> {
        // Check and insert under one write guard
        let mut tables = self.tables.write().await;
        if tables.accounts.contains_key(&account.user_name) {
            return Err(CredentialError::DuplicateUsername.into());
        }
        tables
            .accounts
            .insert(account.user_name.clone(), account.clone());
        Ok(())
    }

    async fn insert_account_with_profile(
        &self,
        account: &Account,
        profile: &AccountProfile,
    ) -> AuthResult<()> {
        if account.user_name != profile.user_name {
            return Err(AuthError::Internal(format!(
                "Profile for {} attached to account {}",
                profile.user_name, account.user_name
            )));
        }
        let mut tables = self.tables.write().await;
        if tables.accounts.contains_key(&account.user_name) {
            return Err(CredentialError::DuplicateUsername.into());
        }
        tables
            .accounts
            .insert(account.user_name.clone(), account.clone());
        tables
            .profiles
            .insert(profile.user_name.clone(), profile.clone());
        Ok(())
    }
}

impl ProfileRepository for InMemoryAuthRepository {
    async fn find_profile(&self, user_name: &UserName) -> AuthResult<Option<AccountProfile>> {
        Ok(self.tables.read().await.profiles.get(user_name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::account_profile::ProfileDraft;
    use crate::domain::value_object::user_password::UserPassword;

    // Any syntactically valid PHC string will do here
    const PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$2lYqQ8bNZpS8S1xKx3kI5hEwV3sS0i2b8r4Nf0cYkQ8";

    fn account(name: &str) -> Account {
        Account::new(
            UserName::new(name).unwrap(),
            UserPassword::from_phc_string(PHC).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryAuthRepository::new();
        repo.insert_account_if_absent(&account("alice")).await.unwrap();

        let alice = UserName::new("alice").unwrap();
        assert!(repo.exists_account(&alice).await.unwrap());
        let found = repo.find_account(&alice).await.unwrap().unwrap();
        assert_eq!(found.user_name, alice);

        let upper = UserName::new("ALICE").unwrap();
        assert!(repo.find_account(&upper).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert() {
        let repo = InMemoryAuthRepository::new();
        repo.insert_account_if_absent(&account("alice")).await.unwrap();
        let err = repo
            .insert_account_if_absent(&account("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryAuthRepository::new();
        let other = repo.clone();
        repo.insert_account_if_absent(&account("alice")).await.unwrap();
        assert!(
            other
                .exists_account(&UserName::new("alice").unwrap())
                .await
                .unwrap()
        );
    }

    fn profile(name: &str) -> AccountProfile {
        let draft = ProfileDraft {
            name: Some("Alice".into()),
            surname: Some("Liddell".into()),
            ..Default::default()
        };
        AccountProfile::new(UserName::new(name).unwrap(), draft).unwrap()
    }

    #[tokio::test]
    async fn test_account_with_profile() {
        let repo = InMemoryAuthRepository::new();
        repo.insert_account_with_profile(&account("alice"), &profile("alice"))
            .await
            .unwrap();

        let alice = UserName::new("alice").unwrap();
        assert!(repo.exists_account(&alice).await.unwrap());
        let found = repo.find_profile(&alice).await.unwrap().unwrap();
        assert_eq!(found, profile("alice"));
    }

    #[tokio::test]
    async fn test_account_with_profile_taken_name_writes_nothing() {
        let repo = InMemoryAuthRepository::new();
        repo.insert_account_if_absent(&account("alice")).await.unwrap();

        let err = repo
            .insert_account_with_profile(&account("alice"), &profile("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));

        let alice = UserName::new("alice").unwrap();
        assert!(repo.find_profile(&alice).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_account_with_mismatched_profile() {
        let repo = InMemoryAuthRepository::new();
        let err = repo
            .insert_account_with_profile(&account("alice"), &profile("bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
        assert!(
            !repo
                .exists_account(&UserName::new("alice").unwrap())
                .await
                .unwrap()
        );
    }
}
