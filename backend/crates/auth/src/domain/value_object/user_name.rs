//! User Name Value Object
//!
//! The user name is the account's login handle and the subject of every
//! issued token. Matching is exact and case-sensitive: `Alice` and `alice`
//! are different accounts.
//!
//! ## Normalisation
//! Input is NFKC-normalised and trimmed; validation runs on the result.
//!
//! ## Invariants
//! - 3 to 30 characters
//! - ASCII letters, digits and `_ . - +` only
//! - starts and ends with a letter, digit or `_`
//! - no consecutive dots
//! - not a reserved word (compared case-insensitively)

use serde::Serialize;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-', '+'];

/// Names that would be confusing next to routes or operators
const RESERVED_WORDS: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "system",
    "superuser",
    "moderator",
    "support",
    "api",
    "auth",
    "login",
    "logout",
    "register",
    "check",
    "me",
    "null",
    "undefined",
    "anonymous",
    "guest",
];

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Empty,

    #[error("User name is too short ({length} chars, minimum {min})")]
    TooShort { length: usize, min: usize },

    #[error("User name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error(
        "Invalid character '{char}' at position {position}. Only letters, digits, _, ., -, + are allowed"
    )]
    InvalidCharacter { char: char, position: usize },

    #[error("User name cannot start with '{char}'")]
    InvalidStart { char: char },

    #[error("User name cannot end with '{char}'")]
    InvalidEnd { char: char },

    #[error("User name cannot contain consecutive dots (..)")]
    ConsecutiveDots,

    #[error("'{word}' is a reserved user name")]
    Reserved { word: String },
}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Normalise and validate raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = input.as_ref().nfkc().collect();
        let normalized = normalized.trim().to_string();
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    /// Rebuild from a trusted source (record store, verified token subject)
    ///
    /// No validation: names accepted under older rules must keep resolving.
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        if name.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = name.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some((position, char)) = name
            .chars()
            .enumerate()
            .find(|&(_, c)| !Self::is_valid_char(c))
        {
            return Err(UserNameError::InvalidCharacter { char, position });
        }

        // Non-empty and ASCII from here on
        let first = name.chars().next().unwrap_or_default();
        if !Self::is_valid_edge_char(first) {
            return Err(UserNameError::InvalidStart { char: first });
        }
        let last = name.chars().next_back().unwrap_or_default();
        if !Self::is_valid_edge_char(last) {
            return Err(UserNameError::InvalidEnd { char: last });
        }

        if name.contains("..") {
            return Err(UserNameError::ConsecutiveDots);
        }

        if RESERVED_WORDS
            .iter()
            .any(|word| word.eq_ignore_ascii_case(name))
        {
            return Err(UserNameError::Reserved {
                word: name.to_string(),
            });
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }

    #[inline]
    fn is_valid_edge_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
