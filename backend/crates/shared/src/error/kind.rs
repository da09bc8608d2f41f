//! Error Kind
//!
//! Each kind maps to exactly one HTTP status, so the presentation layer
//! never has to guess.

use serde::Serialize;

/// Client-visible error classification
///
/// Internal failure reasons (wrong password, expired token, ...) are
/// collapsed onto these kinds before leaving the process.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
/// assert_eq!(ErrorKind::Unauthorized.to_string(), "Unauthorized");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    NotFound,
    /// e.g. a taken user name
    Conflict,
    InternalServerError,
    /// The record store or another dependency is not reachable
    ServiceUnavailable,
}

impl ErrorKind {
    const TABLE: [(ErrorKind, u16, &'static str); 6] = [
        (ErrorKind::BadRequest, 400, "Bad Request"),
        (ErrorKind::Unauthorized, 401, "Unauthorized"),
        (ErrorKind::NotFound, 404, "Not Found"),
        (ErrorKind::Conflict, 409, "Conflict"),
        (ErrorKind::InternalServerError, 500, "Internal Server Error"),
        (ErrorKind::ServiceUnavailable, 503, "Service Unavailable"),
    ];

    const fn entry(&self) -> (u16, &'static str) {
        let (_, status, reason) = Self::TABLE[*self as usize];
        (status, reason)
    }

    #[inline]
    pub const fn status_code(&self) -> u16 {
        self.entry().0
    }

    /// Standard reason phrase
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.entry().1
    }

    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_variants() {
        for (i, (kind, status, reason)) in ErrorKind::TABLE.iter().enumerate() {
            assert_eq!(*kind as usize, i);
            assert_eq!(kind.status_code(), *status);
            assert_eq!(kind.as_str(), *reason);
        }
    }

    #[test]
    fn test_server_errors() {
        assert!(!ErrorKind::Unauthorized.is_server_error());
        assert!(!ErrorKind::Conflict.is_server_error());
        assert!(ErrorKind::InternalServerError.is_server_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
    }

    #[test]
    fn test_serialize_screaming_snake() {
        let json = serde_json::to_string(&ErrorKind::ServiceUnavailable).unwrap();
        assert_eq!(json, r#""SERVICE_UNAVAILABLE""#);
    }
}
