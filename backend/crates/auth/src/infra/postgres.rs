//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use crate::domain::entity::{account::Account, account_profile::AccountProfile};
use crate::domain::error::CredentialError;
use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn find_account(&self, user_name: &UserName) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                user_name,
                password_hash,
                created_at
            FROM accounts
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_account(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE user_name = $1)")
                .bind(user_name.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn insert_account_if_absent(&self, account: &Account) -> AuthResult<()> {
        write_account(&self.pool, account).await
    }

    async fn insert_account_with_profile(
        &self,
        account: &Account,
        profile: &AccountProfile,
    ) -> AuthResult<()> {
        // Dropping the transaction without commit rolls both rows back
        let mut tx = self.pool.begin().await?;
        write_account(&mut *tx, account).await?;
        write_profile(&mut *tx, profile).await?;
        tx.commit().await?;
        Ok(())
    }
}

async fn write_account<'e, E: PgExecutor<'e>>(executor: E, account: &Account) -> AuthResult<()> {
    // The primary key decides the race; the loser inserts nothing
    let inserted = sqlx::query(
        r#"
        INSERT INTO accounts (
            user_name,
            password_hash,
            created_at
        ) VALUES ($1, $2, $3)
        ON CONFLICT (user_name) DO NOTHING
        "#,
    )
    .bind(account.user_name.as_str())
    .bind(account.password_hash.as_phc_string())
    .bind(account.created_at)
    .execute(executor)
    .await?
    .rows_affected();

    if inserted == 0 {
        return Err(CredentialError::DuplicateUsername.into());
    }

    Ok(())
}

async fn write_profile<'e, E: PgExecutor<'e>>(
    executor: E,
    profile: &AccountProfile,
) -> AuthResult<()> {
    sqlx::query(
        r#"
        INSERT INTO account_profiles (
            user_name,
            name,
            surname,
            patronym,
            birthdate,
            place,
            status,
            created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(profile.user_name.as_str())
    .bind(&profile.name)
    .bind(&profile.surname)
    .bind(&profile.patronym)
    .bind(&profile.birthdate)
    .bind(&profile.place)
    .bind(&profile.status)
    .bind(profile.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

// ============================================================================
// Profile Repository Implementation
// ============================================================================

impl ProfileRepository for PgAuthRepository {
    async fn find_profile(&self, user_name: &UserName) -> AuthResult<Option<AccountProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                user_name,
                name,
                surname,
                patronym,
                birthdate,
                place,
                status,
                created_at
            FROM account_profiles
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_profile()))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    user_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let password_hash = UserPassword::from_phc_string(self.password_hash).map_err(|e| {
            AuthError::Internal(format!("Invalid password hash for {}: {}", self.user_name, e))
        })?;

        Ok(Account {
            user_name: UserName::from_db(self.user_name),
            password_hash,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_name: String,
    name: String,
    surname: String,
    patronym: Option<String>,
    birthdate: Option<String>,
    place: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> AccountProfile {
        AccountProfile {
            user_name: UserName::from_db(self.user_name),
            name: self.name,
            surname: self.surname,
            patronym: self.patronym,
            birthdate: self.birthdate,
            place: self.place,
            status: self.status,
            created_at: self.created_at,
        }
    }
}
