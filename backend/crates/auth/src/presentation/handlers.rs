//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use std::sync::Arc;

use platform::cookie::set_cookie_header;

use crate::application::config::AuthConfig;
use crate::application::{
    SessionGate, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::domain::value_object::identity::Identity;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CheckRequest, LoginRequest, MeResponse, RegisterRequest, TokenResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AccountRepository + ProfileRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Response>
where
    R: AccountRepository + ProfileRepository + Clone + Send + Sync + 'static,
{
    sign_up(state, payload, StatusCode::CREATED).await
}

/// POST /api/auth/write
///
/// Older clients expect 200 on success.
pub async fn write<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Response>
where
    R: AccountRepository + ProfileRepository + Clone + Send + Sync + 'static,
{
    sign_up(state, payload, StatusCode::OK).await
}

async fn sign_up<R>(
    state: AuthAppState<R>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
    status: StatusCode,
) -> AuthResult<Response>
where
    R: AccountRepository + ProfileRepository + Clone + Send + Sync + 'static,
{
    let Json(mut req) = payload.map_err(bad_body)?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        profile: req.profile_draft(),
        user_name: req.user_name,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(token_response(&state.config, status, output.issued.into()))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login, also mounted at /api/auth/read
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Response>
where
    R: AccountRepository + ProfileRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(bad_body)?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignInInput {
        user_name: req.user_name,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(token_response(&state.config, StatusCode::OK, output.issued.into()))
}

// ============================================================================
// Check
// ============================================================================

/// POST /api/auth/check, also mounted at /api/auth
///
/// `true` for a token the gate accepts, 401 otherwise.
pub async fn check<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> AuthResult<Json<bool>>
where
    R: AccountRepository + ProfileRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(bad_body)?;

    let gate = SessionGate::new(state.repo.clone(), state.config.clone());
    gate.authorize(req.token.trim(), Utc::now()).await?;

    Ok(Json(true))
}

// ============================================================================
// Me (requires authentication)
// ============================================================================

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    identity: Identity,
) -> AuthResult<Json<MeResponse>>
where
    R: AccountRepository + ProfileRepository + Clone + Send + Sync + 'static,
{
    let profile = state.repo.find_profile(&identity.user_name).await?;

    Ok(Json(MeResponse {
        user_name: identity.user_name.into_inner(),
        profile,
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn bad_body(rejection: JsonRejection) -> AuthError {
    AuthError::InvalidRequest(rejection.body_text())
}

/// JSON body plus the session cookie carrying the same token
fn token_response(config: &AuthConfig, status: StatusCode, body: TokenResponse) -> Response {
    let cookie = set_cookie_header(&config.session_cookie(), &body.token);
    let mut response = (status, Json(body)).into_response();
    if let Some(cookie) = cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}
