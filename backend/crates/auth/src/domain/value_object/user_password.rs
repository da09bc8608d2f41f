//! User Password Value Objects
//!
//! Delegates to `platform::password` for cryptographic operations.
//!
//! - [`RawPassword`]: registration input, policy enforced
//! - [`CandidatePassword`]: login input, only normalised and length-bounded
//! - [`UserPassword`]: Argon2id PHC hash as stored in the account record

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (registration input)
// ============================================================================

/// Password chosen at registration
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// ## Errors
    /// Returns `AppError` with user-facing message and action
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(policy_error)?;
        Ok(Self(clear_text))
    }

    /// Check the password against the Pwned Passwords range API
    ///
    /// - `Ok(true)` if compromised
    /// - `Err(_)` if the lookup failed; callers treat this as non-blocking
    pub async fn is_compromised(&self) -> AppResult<bool> {
        self.0
            .check_breach()
            .await
            .map_err(|e| AppError::service_unavailable(e.to_string()))
    }

    /// Hash on the blocking pool
    pub async fn into_hash(self, pepper: Option<Vec<u8>>) -> AppResult<UserPassword> {
        let hashed = self.0.hash_on_worker(pepper).await.map_err(hash_error)?;
        Ok(UserPassword(hashed))
    }

    /// Reject this password as found in a breach corpus
    pub fn compromised_error() -> AppError {
        policy_error(PasswordPolicyError::Compromised)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Candidate Password (login input)
// ============================================================================

/// Password supplied at login
///
/// No registration policy: a short or common guess is just a mismatch.
pub struct CandidatePassword(ClearTextPassword);

impl CandidatePassword {
    /// `None` when the input is too long to be any stored password
    pub fn new(raw: String) -> Option<Self> {
        ClearTextPassword::for_verification(raw).map(Self)
    }

    /// Burn one verification against a fixed hash
    pub async fn verify_dummy(self) {
        HashedPassword::verify_dummy_on_worker(self.0).await;
    }
}

impl fmt::Debug for CandidatePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CandidatePassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// User Password (hashed, for storage)
// ============================================================================

/// Hashed user password
///
/// Stores password in Argon2id PHC string format, which carries the salt
/// and cost parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|_| {
            AppError::new(
                ErrorKind::InternalServerError,
                "Invalid password hash in database",
            )
        })?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a candidate on the blocking pool
    ///
    /// Comparison is constant-time inside argon2.
    pub async fn verify(
        &self,
        candidate: CandidatePassword,
        pepper: Option<Vec<u8>>,
    ) -> AppResult<bool> {
        self.0
            .verify_on_worker(candidate.0, pepper)
            .await
            .map_err(hash_error)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

// ============================================================================
// Error mapping
// ============================================================================

fn policy_error(e: PasswordPolicyError) -> AppError {
    match e {
        PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
            "Password must be at least {} characters (got {})",
            min, actual
        ))
        .with_action("Please choose a longer password"),

        PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
            "Password must be at most {} characters (got {})",
            max, actual
        ))
        .with_action("Please choose a shorter password"),

        PasswordPolicyError::Compromised => {
            AppError::bad_request("This password has been found in a data breach")
                .with_action("Please choose a different password that hasn't been compromised")
        }

        PasswordPolicyError::EmptyOrWhitespace => AppError::bad_request("Password cannot be empty")
            .with_action("Please enter a password"),

        PasswordPolicyError::InvalidCharacter => {
            AppError::bad_request("Password contains invalid characters")
                .with_action("Please remove any special control characters")
        }

        PasswordPolicyError::CommonPattern => {
            AppError::bad_request("Password is too common or follows a predictable pattern")
                .with_action("Please choose a more unique password")
        }
    }
}

fn hash_error(e: PasswordHashError) -> AppError {
    match e {
        PasswordHashError::HashingFailed(msg) => {
            AppError::internal(format!("Password hashing failed: {}", msg))
        }
        PasswordHashError::WorkerFailed(msg) => {
            AppError::internal(format!("Password worker failed: {}", msg))
        }
        _ => AppError::internal("Unexpected error during password hashing"),
    }
}

// ============================================================================
// Tests
// ============================================================================
