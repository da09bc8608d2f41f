//! Password hashing and the registration policy
//!
//! - Argon2id with a per-hash random salt kept inside the PHC string
//! - NFKC normalization before any length or content check
//! - Optional application-wide pepper appended before hashing
//! - Optional Pwned Passwords range lookup (k-anonymity, SHA-1 prefix only)
//!
//! Argon2 is slow on purpose. Async callers use
//! [`ClearTextPassword::hash_on_worker`] and [`HashedPassword::verify_on_worker`]
//! so the work lands on tokio's blocking pool instead of an executor thread.

use std::fmt;
use std::sync::OnceLock;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use sha1::{Digest, Sha1};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Minimum length in code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length in code points, for registration and verification alike
pub const MAX_PASSWORD_LENGTH: usize = 128;

const PWNED_RANGE_URL: &str = "https://api.pwnedpasswords.com/range/";

/// Fragments that make a password predictable wherever they appear
const KEYBOARD_RUNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];

/// Whole passwords rejected outright (compared lowercased)
const DENYLIST: &[&str] = &[
    "password", "password1", "password123", "abcdefgh", "letmein", "welcome", "admin123",
    "iloveyou", "sunshine", "princess", "football", "baseball", "trustno1", "changeme",
];

/// Registration policy violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("This password has been compromised in a data breach")]
    Compromised,

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Failures of the hashing machinery itself
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// The blocking-pool task panicked or was cancelled
    #[error("Password worker failed: {0}")]
    WorkerFailed(String),

    /// Range lookup failed; callers treat this as "unknown", not "breached"
    #[error("Breach check failed: {0}")]
    BreachCheckFailed(String),
}

/// A plaintext password, NFKC-normalized and wiped on drop
///
/// Not `Clone`, and `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accept a password for *registration*, enforcing the policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::normalized(raw);
        enforce_policy(&password.0)?;
        Ok(password)
    }

    /// Accept a password for *verification* against an existing hash
    ///
    /// No policy: a short wrong guess is just a mismatch. `None` when the
    /// input is longer than any registered password could be.
    pub fn for_verification(raw: String) -> Option<Self> {
        let password = Self::normalized(raw);
        (password.0.chars().count() <= MAX_PASSWORD_LENGTH).then_some(password)
    }

    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    fn normalized(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut input = Zeroizing::new(Vec::with_capacity(
            self.0.len() + pepper.map_or(0, <[u8]>::len),
        ));
        input.extend_from_slice(self.0.as_bytes());
        input.extend_from_slice(pepper.unwrap_or_default());
        input
    }

    /// Argon2id with default (OWASP) parameters: m=19 MiB, t=2, p=1
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let phc = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword(phc.to_string()))
    }

    /// [`hash`](Self::hash) on tokio's blocking pool
    pub async fn hash_on_worker(
        self,
        pepper: Option<Vec<u8>>,
    ) -> Result<HashedPassword, PasswordHashError> {
        tokio::task::spawn_blocking(move || self.hash(pepper.as_deref()))
            .await
            .map_err(|e| PasswordHashError::WorkerFailed(e.to_string()))?
    }

    /// Look the password up in the Pwned Passwords range API
    ///
    /// Only the first five hex digits of the SHA-1 digest leave the process.
    /// `Err(_)` means the lookup failed, not that the password is unsafe.
    pub async fn check_breach(&self) -> Result<bool, PasswordHashError> {
        let digest = hex_upper(&Sha1::digest(self.0.as_bytes()));
        let (prefix, suffix) = digest.split_at(5);

        let response = reqwest::get(format!("{PWNED_RANGE_URL}{prefix}"))
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| PasswordHashError::BreachCheckFailed(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| PasswordHashError::BreachCheckFailed(e.to_string()))?;

        Ok(range_contains_suffix(&body, suffix))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// A stored Argon2 hash in PHC string format
///
/// Algorithm, version, cost and salt travel inside the string, so verifying
/// needs only this value and the pepper.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Parse a PHC string, e.g. one read back from the database
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = s.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self(phc))
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// Recompute with the stored salt and compare in constant time
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(&password.peppered(pepper), &parsed)
                .is_ok()
        })
    }

    /// [`verify`](Self::verify) on tokio's blocking pool
    pub async fn verify_on_worker(
        &self,
        password: ClearTextPassword,
        pepper: Option<Vec<u8>>,
    ) -> Result<bool, PasswordHashError> {
        let stored = self.clone();
        tokio::task::spawn_blocking(move || stored.verify(&password, pepper.as_deref()))
            .await
            .map_err(|e| PasswordHashError::WorkerFailed(e.to_string()))
    }

    /// Burn one verification against a fixed hash
    ///
    /// For lookups that found no account, so response time does not tell
    /// whether the name exists.
    pub async fn verify_dummy_on_worker(password: ClearTextPassword) {
        static DUMMY: OnceLock<Option<HashedPassword>> = OnceLock::new();

        let _ = tokio::task::spawn_blocking(move || {
            let dummy = DUMMY.get_or_init(|| {
                ClearTextPassword(String::from("timing-equalizer"))
                    .hash(None)
                    .ok()
            });
            if let Some(dummy) = dummy {
                dummy.verify(&password, None);
            }
        })
        .await;
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

fn enforce_policy(password: &str) -> Result<(), PasswordPolicyError> {
    if password.trim().is_empty() {
        return Err(PasswordPolicyError::EmptyOrWhitespace);
    }

    let actual = password.chars().count();
    if actual < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual,
        });
    }
    if actual > MAX_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooLong {
            max: MAX_PASSWORD_LENGTH,
            actual,
        });
    }

    // Space, tab and newline are allowed
    if password
        .chars()
        .any(|ch| ch.is_control() && !matches!(ch, '\t' | '\n'))
    {
        return Err(PasswordPolicyError::InvalidCharacter);
    }

    if is_predictable(password) {
        return Err(PasswordPolicyError::CommonPattern);
    }

    Ok(())
}

/// One repeated character, a digit run, a keyboard walk, or a denylisted word
fn is_predictable(password: &str) -> bool {
    let lower = password.to_lowercase();

    let mut chars = lower.chars();
    let single_char = chars
        .next()
        .is_some_and(|first| chars.all(|c| c == first));

    single_char
        || is_digit_run(&lower)
        || KEYBOARD_RUNS.iter().any(|run| lower.contains(run))
        || DENYLIST.contains(&lower.as_str())
}

/// All digits, each one step up (or down) from the last, wrapping 9/0
fn is_digit_run(s: &str) -> bool {
    let Some(digits) = s
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    else {
        return false;
    };
    if digits.len() < 4 {
        return false;
    }

    let step = |a: u32, b: u32| (b + 10 - a) % 10;
    [1, 9]
        .iter()
        .any(|&dir| digits.windows(2).all(|w| step(w[0], w[1]) == dir))
}

/// Scan `SUFFIX:COUNT` lines from a range response
fn range_contains_suffix(body: &str, suffix: &str) -> bool {
    body.lines()
        .filter_map(|line| line.split_once(':'))
        .any(|(candidate, _)| candidate.trim().eq_ignore_ascii_case(suffix))
}

fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}
