//! Account Profile Entity
//!
//! Personal details captured at registration. Kept apart from [`Account`]
//! so credential lookups never touch profile data.
//!
//! [`Account`]: super::account::Account

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_object::user_name::UserName;

/// Status given to every self-registered account
pub const DEFAULT_PROFILE_STATUS: &str = "User";

/// Maximum length of a single profile field (in characters)
pub const PROFILE_FIELD_MAX_LENGTH: usize = 200;

/// Error returned when profile input is unusable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Missing required registration field: {0}")]
    MissingField(&'static str),

    #[error("Field '{field}' is too long (maximum {max} characters)")]
    TooLong { field: &'static str, max: usize },
}

/// Unvalidated profile input
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronym: Option<String>,
    pub birthdate: Option<String>,
    pub place: Option<String>,
}

/// Account profile entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[serde(skip)]
    pub user_name: UserName,
    pub name: String,
    pub surname: String,
    pub patronym: Option<String>,
    pub birthdate: Option<String>,
    pub place: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl AccountProfile {
    /// Clean and validate a draft
    ///
    /// `name` and `surname` are required; empty optional fields become `None`.
    pub fn new(user_name: UserName, draft: ProfileDraft) -> Result<Self, ProfileError> {
        Ok(Self {
            user_name,
            name: required("name", draft.name)?,
            surname: required("surname", draft.surname)?,
            patronym: optional("patronym", draft.patronym)?,
            birthdate: optional("birthdate", draft.birthdate)?,
            place: optional("place", draft.place)?,
            status: DEFAULT_PROFILE_STATUS.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// Line breaks become spaces, then outer whitespace is trimmed
pub fn clean_field(value: &str) -> String {
    value.replace(['\r', '\n'], " ").trim().to_string()
}

fn optional(field: &'static str, value: Option<String>) -> Result<Option<String>, ProfileError> {
    let Some(cleaned) = value.map(|v| clean_field(&v)).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if cleaned.chars().count() > PROFILE_FIELD_MAX_LENGTH {
        return Err(ProfileError::TooLong {
            field,
            max: PROFILE_FIELD_MAX_LENGTH,
        });
    }
    Ok(Some(cleaned))
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ProfileError> {
    optional(field, value)?.ok_or(ProfileError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserName {
        UserName::new("alice").unwrap()
    }

    #[test]
    fn test_clean_field() {
        assert_eq!(clean_field("  Ivan\r\nPetrov \n"), "Ivan  Petrov");
        assert_eq!(clean_field("\n"), "");
    }

    #[test]
    fn test_required_fields() {
        let draft = ProfileDraft {
            name: Some("Alice".into()),
            surname: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(
            AccountProfile::new(user(), draft),
            Err(ProfileError::MissingField("surname"))
        );

        let draft = ProfileDraft {
            surname: Some("Smith".into()),
            ..Default::default()
        };
        assert_eq!(
            AccountProfile::new(user(), draft),
            Err(ProfileError::MissingField("name"))
        );
    }

    #[test]
    fn test_optional_fields_and_status() {
        let draft = ProfileDraft {
            name: Some(" Alice ".into()),
            surname: Some("Smith".into()),
            patronym: Some("".into()),
            birthdate: Some("1990-01-01\n".into()),
            place: None,
        };
        let profile = AccountProfile::new(user(), draft).unwrap();
        assert_eq!(profile.name, "Alice");
        assert_eq!(profile.patronym, None);
        assert_eq!(profile.birthdate.as_deref(), Some("1990-01-01"));
        assert_eq!(profile.status, DEFAULT_PROFILE_STATUS);
    }

    #[test]
    fn test_field_length_cap() {
        let draft = ProfileDraft {
            name: Some("a".repeat(PROFILE_FIELD_MAX_LENGTH + 1)),
            surname: Some("Smith".into()),
            ..Default::default()
        };
        assert!(matches!(
            AccountProfile::new(user(), draft),
            Err(ProfileError::TooLong { field: "name", .. })
        ));
    }
}
