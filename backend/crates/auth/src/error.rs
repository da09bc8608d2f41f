//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Internal failure kinds ([`CredentialError`], [`TokenError`]) are collapsed
//! here: a client learns that its credentials or token were refused, never
//! which check failed.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

use crate::domain::entity::account_profile::ProfileError;
use crate::domain::error::{CredentialError, TokenError};
use crate::domain::value_object::user_name::UserNameError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User name already exists
    #[error("User name already exists")]
    UserNameTaken,

    /// Unknown user name or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, forged or expired token, or the account is gone
    #[error("Authentication required")]
    Unauthorized,

    /// User name fails validation
    #[error("Invalid user name: {0}")]
    InvalidUserName(#[from] UserNameError),

    /// Profile fields fail validation
    #[error("{0}")]
    InvalidProfile(#[from] ProfileError),

    /// Password rejected by the registration policy
    #[error("Password validation failed: {0}")]
    PasswordValidation(AppError),

    /// Request body is missing required data
    #[error("{0}")]
    InvalidRequest(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::InvalidUserName(_)
            | AuthError::InvalidProfile(_)
            | AuthError::PasswordValidation(_)
            | AuthError::InvalidRequest(_) => ErrorKind::BadRequest,
            AuthError::Database(e) => match sqlx_error_kind(e) {
                ErrorKind::ServiceUnavailable => ErrorKind::ServiceUnavailable,
                _ => ErrorKind::InternalServerError,
            },
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::UserNameTaken => AppError::conflict(self.to_string())
                .with_action("Please choose a different user name"),
            AuthError::InvalidCredentials => AppError::unauthorized(self.to_string())
                .with_action("Check your user name and password"),
            AuthError::Unauthorized => {
                AppError::unauthorized(self.to_string()).with_action("Please sign in again")
            }
            AuthError::PasswordValidation(inner) => {
                let err = AppError::bad_request(inner.message().to_string());
                match inner.action() {
                    Some(action) => err.with_action(action.to_string()),
                    None => err,
                }
            }
            AuthError::Database(_) if self.kind() == ErrorKind::ServiceUnavailable => {
                AppError::service_unavailable("Service temporarily unavailable")
                    .with_action("Please try again later")
            }
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            _ if self.kind().is_server_error() => {
                tracing::error!(error = %self, "Auth server error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = matches!(self, AuthError::Unauthorized);
        let mut response = self.to_app_error().into_response();
        if challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::DuplicateUsername => AuthError::UserNameTaken,
            CredentialError::UnknownUsername | CredentialError::BadPassword => {
                AuthError::InvalidCredentials
            }
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        AuthError::Unauthorized
    }
}
