//! Bearer credential extraction
//!
//! Protected requests carry their token either as
//! `Authorization: Bearer <token>` or in a session cookie. The header wins
//! when both are present.

use axum::http::{HeaderMap, header};

use crate::cookie::extract_cookie;

/// Why an `Authorization` header could not be used
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationHeaderError {
    #[error("Authorization header is not valid ASCII")]
    NotAscii,

    #[error("Authorization header must be: Bearer <token>")]
    NotBearer,
}

/// Extract the token from an `Authorization: Bearer` header
///
/// - `Ok(None)` when the header is absent
/// - scheme is matched case-insensitively (RFC 7235)
/// - exactly one token part is accepted
pub fn extract_bearer_token(
    headers: &HeaderMap,
) -> Result<Option<String>, AuthorizationHeaderError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AuthorizationHeaderError::NotAscii)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Ok(Some(token.to_string()))
        }
        _ => Err(AuthorizationHeaderError::NotBearer),
    }
}

/// Extract a token from the bearer header, falling back to a cookie
pub fn extract_token(
    headers: &HeaderMap,
    cookie_name: &str,
) -> Result<Option<String>, AuthorizationHeaderError> {
    match extract_bearer_token(headers)? {
        Some(token) => Ok(Some(token)),
        None => Ok(extract_cookie(headers, cookie_name)),
    }
}
