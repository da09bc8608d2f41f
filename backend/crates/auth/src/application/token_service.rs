//! Token Service
//!
//! Stateless bearer tokens: `v1.<payload>.<signature>`
//!
//! - `payload`: base64url (no padding) of the JSON claims `{sub, iat, exp}`
//! - `signature`: base64url HMAC-SHA256 over `v1.<payload>`
//!
//! The signature covers the encoded payload bytes exactly as received, and
//! is checked before any claim is read.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

use crate::application::config::AuthConfig;
use crate::domain::entity::token::{IssuedToken, TokenClaims};
use crate::domain::error::TokenError;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// Format version prefix
pub const TOKEN_VERSION: &str = "v1";

/// Issues and validates signed tokens with the configured secret
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue a token for `subject`, valid from `now` through `now + ttl`
    pub fn issue(
        &self,
        subject: &UserName,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> AuthResult<IssuedToken> {
        let issued_at_ms = now.timestamp_millis();
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expires_at_ms = issued_at_ms.saturating_add(ttl_ms);

        let claims = TokenClaims::new(subject, issued_at_ms, expires_at_ms);
        // Plain struct of string and integers; serialization cannot fail
        let json = serde_json::to_vec(&claims).unwrap_or_default();

        let signing_input = format!("{}.{}", TOKEN_VERSION, to_base64url(&json));
        let signature = hmac_sha256(self.config.token_secret.as_bytes(), signing_input.as_bytes())
            .ok_or_else(|| AuthError::Internal("Token signing key rejected".to_string()))?;
        let token = format!("{}.{}", signing_input, to_base64url(&signature));

        Ok(IssuedToken {
            token,
            subject: subject.clone(),
            issued_at: DateTime::from_timestamp_millis(issued_at_ms).unwrap_or(now),
            expires_at_ms,
        })
    }

    /// Decode a token and check signature, then expiry, at `now`
    pub fn decode_and_validate(&self, token: &str, now: DateTime<Utc>) -> Result<UserName, TokenError> {
        let (signing_input, signature_b64) = token
            .rsplit_once('.')
            .ok_or(TokenError::MalformedToken)?;
        let (version, payload_b64) = signing_input
            .split_once('.')
            .ok_or(TokenError::MalformedToken)?;

        if version != TOKEN_VERSION || payload_b64.is_empty() || payload_b64.contains('.') {
            return Err(TokenError::MalformedToken);
        }

        let signature = from_base64url(signature_b64).map_err(|_| TokenError::MalformedToken)?;
        let payload = from_base64url(payload_b64).map_err(|_| TokenError::MalformedToken)?;

        if !verify_hmac_sha256(
            self.config.token_secret.as_bytes(),
            signing_input.as_bytes(),
            &signature,
        ) {
            return Err(TokenError::BadSignature);
        }

        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::MalformedToken)?;
        if !claims.is_well_formed() {
            return Err(TokenError::MalformedToken);
        }

        if !claims.is_live_at(now.timestamp_millis()) {
            return Err(TokenError::Expired);
        }

        Ok(UserName::from_db(claims.sub))
    }
}
