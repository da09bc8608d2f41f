//! Scenario tests for the auth crate
//!
//! Unit tests live next to the code; these cover flows across components.

#[cfg(test)]
mod scenario_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{TimeDelta, Utc};
    use tokio_test::{assert_err, assert_ok};

    use crate::application::{
        AuthConfig, CredentialCheck, CredentialStore, SessionGate, SignInInput, SignInUseCase,
        TokenService,
    };
    use crate::domain::error::{CredentialError, TokenError};
    use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryAuthRepository;

    fn name(raw: &str) -> UserName {
        UserName::new(raw).unwrap()
    }

    fn password(raw: &str) -> RawPassword {
        RawPassword::new(raw.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_login_authorize_flow() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = Arc::new(AuthConfig::development());
        let store = CredentialStore::new(repo.clone(), config.clone());

        assert_ok!(store.register(name("alice"), password("secret123")).await);

        let login = SignInUseCase::new(repo.clone(), config.clone());
        let issued = login
            .execute(SignInInput {
                user_name: "alice".into(),
                password: "secret123".into(),
            })
            .await
            .unwrap()
            .issued;

        let identity = SessionGate::new(repo.clone(), config.clone())
            .authorize(&issued.token, Utc::now())
            .await
            .unwrap();
        assert_eq!(identity.user_name, name("alice"));

        let err = assert_err!(
            login
                .execute(SignInInput {
                    user_name: "alice".into(),
                    password: "wrong".into(),
                })
                .await
        );
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_internal_credential_outcomes() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let store = CredentialStore::new(repo, Arc::new(AuthConfig::development()));

        store
            .register(name("bob"), password("hunter2-long"))
            .await
            .unwrap();

        assert_eq!(
            store.verify("bob", "hunter2-long".into()).await.unwrap(),
            CredentialCheck::Verified(name("bob"))
        );
        assert_eq!(
            store.verify("bob", "hunter3-long".into()).await.unwrap(),
            CredentialCheck::Rejected(CredentialError::BadPassword)
        );
        assert_eq!(
            store.verify("carol", "hunter2-long".into()).await.unwrap(),
            CredentialCheck::Rejected(CredentialError::UnknownUsername)
        );
    }

    #[test]
    fn test_token_lifetime_boundaries() {
        let tokens = TokenService::new(Arc::new(AuthConfig::development()));
        let now = Utc::now();
        let ttl = Duration::from_secs(600);
        let ttl_delta = TimeDelta::seconds(600);
        let token = tokens.issue(&name("alice"), now, ttl).unwrap().token;

        assert_eq!(tokens.decode_and_validate(&token, now), Ok(name("alice")));
        assert_eq!(
            tokens.decode_and_validate(&token, now + ttl_delta - TimeDelta::milliseconds(1)),
            Ok(name("alice"))
        );
        assert_eq!(
            tokens.decode_and_validate(&token, now + ttl_delta + TimeDelta::milliseconds(1)),
            Err(TokenError::Expired)
        );
    }

    #[tokio::test]
    async fn test_tokens_do_not_survive_a_new_secret() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let before = Arc::new(AuthConfig::development());
        CredentialStore::new(repo.clone(), before.clone())
            .register(name("alice"), password("secret123"))
            .await
            .unwrap();
        let token = TokenService::new(before)
            .issue(&name("alice"), Utc::now(), Duration::from_secs(60))
            .unwrap()
            .token;

        // Restart with a fresh random secret
        let after = Arc::new(AuthConfig::development());
        let result = SessionGate::new(repo, after)
            .authorize(&token, Utc::now())
            .await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }
}

#[cfg(test)]
mod concurrency_tests {
    use std::sync::Arc;

    use crate::application::{AuthConfig, CredentialStore};
    use crate::domain::repository::AccountRepository;
    use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryAuthRepository;

    const CONTENDERS: usize = 8;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_registration_has_one_winner() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let store = Arc::new(CredentialStore::new(
            repo.clone(),
            Arc::new(AuthConfig::development()),
        ));

        let handles: Vec<_> = (0..CONTENDERS)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .register(
                            UserName::new("alice").unwrap(),
                            RawPassword::new(format!("secret-{i}-pass")).unwrap(),
                        )
                        .await
                })
            })
            .collect();

        let mut winners = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(AuthError::UserNameTaken) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(duplicates, CONTENDERS - 1);
        assert!(
            repo.exists_account(&UserName::new("alice").unwrap())
                .await
                .unwrap()
        );
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::AuthConfig;
    use crate::infra::memory::InMemoryAuthRepository;
    use crate::presentation::router::auth_router_generic;

    fn app() -> Router {
        Router::new().nest(
            "/api/auth",
            auth_router_generic(InMemoryAuthRepository::new(), AuthConfig::development()),
        )
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_me(header_pair: Option<(header::HeaderName, String)>) -> Request<Body> {
        let mut builder = Request::get("/api/auth/me");
        if let Some((name, value)) = header_pair {
            builder = builder.header(name, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn alice_registration() -> Value {
        json!({
            "username": "alice",
            "password": "secret123",
            "name": "Alice",
            "surname": "Liddell",
            "birthdate": "1852-05-04",
        })
    }

    async fn register_alice(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(post_json("/api/auth/register", alice_registration()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_register_response_and_cookie() {
        let app = app();
        let response = app
            .clone()
            .oneshot(post_json("/api/auth/register", alice_registration()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("auth_session=v1."));
        assert!(cookie.contains("HttpOnly"));

        let body = json_body(response).await;
        assert_eq!(body["username"], "alice");
        assert!(body["date"].as_str().unwrap().ends_with('Z'));
        assert!(body["expiresAtMs"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_duplicate_register_is_conflict() {
        let app = app();
        register_alice(&app).await;

        let response = app
            .oneshot(post_json("/api/auth/register", alice_registration()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response).await;
        assert_eq!(body["status"], 409);
        assert_eq!(body["detail"], "User name already exists");
    }

    #[tokio::test]
    async fn test_register_validation() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth/register",
                json!({"username": "alice", "password": "secret123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["detail"].as_str().unwrap().contains("Missing required"));

        let mut weak = alice_registration();
        weak["password"] = json!("password");
        let response = app
            .clone()
            .oneshot(post_json("/api/auth/register", weak))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["action"].is_string());

        let response = app
            .oneshot(
                Request::post("/api/auth/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login() {
        let app = app();
        register_alice(&app).await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                json!({"username": "alice", "password": "secret123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::SET_COOKIE));
        assert_eq!(json_body(response).await["username"], "alice");

        for body in [
            json!({"username": "alice", "password": "wrong"}),
            json!({"username": "nobody", "password": "secret123"}),
        ] {
            let response = app
                .clone()
                .oneshot(post_json("/api/auth/login", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(json_body(response).await["detail"], "Invalid credentials");
        }
    }

    #[tokio::test]
    async fn test_me_accepts_bearer_and_cookie() {
        let app = app();
        let token = register_alice(&app).await;

        let response = app
            .clone()
            .oneshot(get_me(Some((
                header::AUTHORIZATION,
                format!("Bearer {token}"),
            ))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["username"], "alice");
        assert_eq!(body["profile"]["surname"], "Liddell");
        assert_eq!(body["profile"]["status"], "User");

        let response = app
            .oneshot(get_me(Some((
                header::COOKIE,
                format!("theme=dark; auth_session={token}"),
            ))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_me_rejects_missing_and_forged_tokens() {
        let app = app();
        let token = register_alice(&app).await;
        // Swap the last signature character for another canonical one
        let replacement = if token.ends_with('A') { 'E' } else { 'A' };
        let forged = format!("{}{}", &token[..token.len() - 1], replacement);

        for request in [
            get_me(None),
            get_me(Some((header::AUTHORIZATION, "Basic YWxpY2U6c2VjcmV0".into()))),
            get_me(Some((header::AUTHORIZATION, "Bearer not-a-token".into()))),
            get_me(Some((header::AUTHORIZATION, format!("Bearer {forged}")))),
        ] {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
                "Bearer"
            );
            let body = json_body(response).await;
            assert_eq!(body["detail"], "Authentication required");
            let text = body.to_string().to_lowercase();
            assert!(!text.contains("signature") && !text.contains("malformed"));
        }
    }

    #[tokio::test]
    async fn test_bearer_header_wins_over_cookie() {
        let app = app();
        let token = register_alice(&app).await;

        let request = Request::get("/api/auth/me")
            .header(header::AUTHORIZATION, "Bearer v1.bogus.bogus")
            .header(header::COOKIE, format!("auth_session={token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_check_endpoint() {
        let app = app();
        let token = register_alice(&app).await;

        let response = app
            .clone()
            .oneshot(post_json("/api/auth/check", json!({ "token": token })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!(true));

        let response = app
            .oneshot(post_json("/api/auth/check", json!({"token": "v1.x.y"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_legacy_paths() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json("/api/auth/write", alice_registration()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::SET_COOKIE));
        assert_eq!(json_body(response).await["username"], "alice");

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth/read",
                json!({"username": "alice", "password": "secret123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = json_body(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(post_json("/api/auth", json!({ "token": token })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!(true));

        let response = app
            .oneshot(post_json("/api/auth/write", alice_registration()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_taken_name_reported_before_weak_password() {
        let app = app();
        register_alice(&app).await;

        let mut weak = alice_registration();
        weak["password"] = json!("short");
        let response = app
            .oneshot(post_json("/api/auth/register", weak))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
