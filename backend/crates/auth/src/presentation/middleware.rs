//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use platform::bearer::extract_token;

use crate::application::SessionGate;
use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::domain::value_object::identity::Identity;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a valid token
///
/// The token is read from `Authorization: Bearer`, falling back to the
/// session cookie. On success the resolved [`Identity`] is stored in the
/// request extensions.
pub async fn require_identity<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AccountRepository + ProfileRepository + Clone + Send + Sync + 'static,
{
    let token = extract_token(req.headers(), &state.config.session_cookie_name)
        .map_err(|e| {
            tracing::debug!(reason = %e, "Unusable Authorization header");
            AuthError::Unauthorized
        })?
        .ok_or(AuthError::Unauthorized)?;

    let gate = SessionGate::new(state.repo.clone(), state.config.clone());
    let identity = gate.authorize(&token, Utc::now()).await?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Extract the identity stored by [`require_identity`]
///
/// Rejects with 401 when the route is not behind the middleware.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}
