//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::config::{ConfigError, decode_secret_32, env_flag, env_parse, env_var};
use platform::cookie::CookieConfig;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Default token lifetime (12 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(12 * 3600);

/// HMAC key for token signatures
///
/// Held for the process lifetime; wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TokenSecret([u8; 32]);

impl TokenSecret {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn random() -> Self {
        Self(platform::crypto::random_key())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret([REDACTED])")
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token signing secret (32 bytes)
    pub token_secret: TokenSecret,
    /// Token lifetime
    pub token_ttl: Duration,
    /// Session cookie name
    pub session_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Query the Pwned Passwords range API on registration
    pub check_breached_passwords: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: TokenSecret::new([0u8; 32]),
            token_ttl: DEFAULT_TOKEN_TTL,
            session_cookie_name: "auth_session".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            check_breached_passwords: false,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: TokenSecret::random(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Load from environment variables
    ///
    /// | variable | default |
    /// |---|---|
    /// | `AUTH_TOKEN_SECRET` | base64, 32 bytes; random in debug builds, required otherwise |
    /// | `AUTH_TOKEN_TTL_SECS` | 43200 |
    /// | `AUTH_PASSWORD_PEPPER` | none |
    /// | `AUTH_CHECK_BREACHED_PASSWORDS` | false |
    /// | `AUTH_SESSION_COOKIE` | `auth_session` |
    /// | `AUTH_COOKIE_SECURE` | false in debug builds, true otherwise |
    /// | `AUTH_COOKIE_SAME_SITE` | `Lax` |
    pub fn from_env() -> Result<Self, ConfigError> {
        const SECRET: &str = "AUTH_TOKEN_SECRET";
        const TTL: &str = "AUTH_TOKEN_TTL_SECS";

        let token_secret = match env_var(SECRET) {
            Some(encoded) => TokenSecret::new(decode_secret_32(SECRET, &encoded)?),
            None if cfg!(debug_assertions) => {
                tracing::warn!("{SECRET} not set, using a random secret for this process");
                TokenSecret::random()
            }
            None => return Err(ConfigError::Missing(SECRET.to_string())),
        };

        let token_ttl = match env_parse::<u64>(TTL)? {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    key: TTL.to_string(),
                    reason: "must be positive".to_string(),
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TOKEN_TTL,
        };

        let defaults = Self::default();

        Ok(Self {
            token_secret,
            token_ttl,
            session_cookie_name: env_var("AUTH_SESSION_COOKIE")
                .unwrap_or(defaults.session_cookie_name.clone()),
            cookie_secure: env_flag("AUTH_COOKIE_SECURE")?.unwrap_or(!cfg!(debug_assertions)),
            cookie_same_site: env_parse::<SameSite>("AUTH_COOKIE_SAME_SITE")?
                .unwrap_or(defaults.cookie_same_site),
            password_pepper: env_var("AUTH_PASSWORD_PEPPER").map(String::into_bytes),
            check_breached_passwords: env_flag("AUTH_CHECK_BREACHED_PASSWORDS")?.unwrap_or(false),
        })
    }

    /// Get password pepper as owned bytes for the hashing worker
    pub fn pepper(&self) -> Option<Vec<u8>> {
        self.password_pepper.clone()
    }

    /// Cookie settings for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)),
        }
    }
}
