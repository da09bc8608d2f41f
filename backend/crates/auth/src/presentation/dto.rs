//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::account_profile::{AccountProfile, ProfileDraft};
use crate::domain::entity::token::IssuedToken;

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Every field is optional at this level so that missing ones produce the
/// same problem response as empty ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(rename = "username", alias = "userName")]
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronym: Option<String>,
    pub birthdate: Option<String>,
    pub place: Option<String>,
}

impl RegisterRequest {
    pub fn profile_draft(&mut self) -> ProfileDraft {
        ProfileDraft {
            name: self.name.take(),
            surname: self.surname.take(),
            patronym: self.patronym.take(),
            birthdate: self.birthdate.take(),
            place: self.place.take(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[serde(rename = "username", alias = "userName")]
    pub user_name: String,
    pub password: String,
}

/// Issued token, returned by register and login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[serde(rename = "username")]
    pub user_name: String,
    pub token: String,
    /// Issue time, ISO-8601 UTC
    pub date: DateTime<Utc>,
    pub expires_at_ms: i64,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            user_name: issued.subject.into_inner(),
            token: issued.token,
            date: issued.issued_at,
            expires_at_ms: issued.expires_at_ms,
        }
    }
}

// ============================================================================
// Check
// ============================================================================

/// Token check request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckRequest {
    pub token: String,
}

// ============================================================================
// Me
// ============================================================================

/// Current account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(rename = "username")]
    pub user_name: String,
    pub profile: Option<AccountProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_name::UserName;

    #[test]
    fn test_register_request_field_names() {
        let mut req: RegisterRequest = serde_json::from_str(
            r#"{"username":"alice","password":"p","name":"A","surname":"L","place":"Oxford"}"#,
        )
        .unwrap();
        assert_eq!(req.user_name.as_deref(), Some("alice"));
        assert_eq!(req.patronym, None);

        let draft = req.profile_draft();
        assert_eq!(draft.place.as_deref(), Some("Oxford"));
        assert!(req.place.is_none());
    }

    #[test]
    fn test_login_request_defaults() {
        let req: LoginRequest = serde_json::from_str(r#"{"userName":"alice"}"#).unwrap();
        assert_eq!(req.user_name, "alice");
        assert_eq!(req.password, "");
    }

    #[test]
    fn test_token_response_shape() {
        let issued = IssuedToken {
            token: "v1.a.b".into(),
            subject: UserName::from_db("alice"),
            issued_at: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
            expires_at_ms: 1_700_043_200_123,
        };
        let json = serde_json::to_value(TokenResponse::from(issued)).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["token"], "v1.a.b");
        assert_eq!(json["date"], "2023-11-14T22:13:20.123Z");
        assert_eq!(json["expiresAtMs"], 1_700_043_200_123i64);
    }
}
