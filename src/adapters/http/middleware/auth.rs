//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects user into extensions
//! - `RequireAuth` - Extractor that requires authentication
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port, keeping it provider-agnostic.
//! Clerk in production and a mock in tests go through the same code.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Extracts the token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware that validates Bearer tokens.
///
/// On success the `AuthenticatedUser` is inserted into request extensions.
/// A request without a token continues unauthenticated so `RequireAuth` can
/// reject it; a token that fails validation is rejected here.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, role = %user.role, "Request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            match &e {
                AuthError::ServiceUnavailable(msg) => {
                    tracing::error!(error = %msg, "Auth service unavailable")
                }
                other => tracing::debug!(error = %other, "Bearer token rejected"),
            }
            ApiError::from(e).into_response()
        }
    }
}

/// Extractor that requires authentication.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| ApiError::from(AuthError::Unauthenticated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::{UserId, UserRole};
    use axum::http::{HeaderValue, StatusCode};

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user_123").unwrap(), UserRole::Learner)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Token Extraction Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer my-token"));
        assert_eq!(bearer_token(&headers), Some("my-token"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(bearer_token(&headers), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // RequireAuth Extractor Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut request = axum::http::Request::builder()
            .uri("/test")
            .body(())
            .unwrap();
        request.extensions_mut().insert(test_user());
        let (mut parts, _body) = request.into_parts();

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(user.id.as_str(), "user_123");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        let request = axum::http::Request::builder()
            .uri("/test")
            .body(())
            .unwrap();
        let (mut parts, _body) = request.into_parts();

        let rejection = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware Tests
    // ════════════════════════════════════════════════════════════════════════════

    mod middleware {
        use super::*;
        use axum::{body::Body, routing::get, Router};
        use tower::ServiceExt;

        async fn whoami(RequireAuth(user): RequireAuth) -> String {
            user.id.to_string()
        }

        fn app(validator: MockSessionValidator) -> Router {
            let state: AuthState = Arc::new(validator);
            Router::new()
                .route("/me", get(whoami))
                .layer(axum::middleware::from_fn_with_state(state, auth_middleware))
        }

        fn request(token: Option<&str>) -> axum::http::Request<Body> {
            let mut builder = axum::http::Request::builder().uri("/me");
            if let Some(token) = token {
                builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
            }
            builder.body(Body::empty()).unwrap()
        }

        #[tokio::test]
        async fn valid_token_reaches_handler() {
            let app = app(MockSessionValidator::new().with_user("good", test_user()));

            let response = app.oneshot(request(Some("good"))).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
        }

        #[tokio::test]
        async fn invalid_token_is_rejected_by_middleware() {
            let app = app(MockSessionValidator::new());

            let response = app.oneshot(request(Some("forged"))).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        #[tokio::test]
        async fn missing_token_is_rejected_by_extractor() {
            let app = app(MockSessionValidator::new().with_user("good", test_user()));

            let response = app.oneshot(request(None)).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        #[tokio::test]
        async fn provider_outage_is_a_server_error() {
            let app = app(
                MockSessionValidator::new()
                    .with_error(AuthError::service_unavailable("jwks unreachable")),
            );

            let response = app.oneshot(request(Some("any"))).await.unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Type Safety Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
        assert_send_sync::<RequireAuth>();
    }
}
