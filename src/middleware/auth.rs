use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::AppState;

/// The principal bound to a request by [`authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub person_id: i32,
    pub username: String,
    pub role: String,
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Binds an [`AuthContext`] when the request carries a verifiable bearer token.
/// Never rejects: anonymous requests pass through and meet the guards later.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthContext>().is_none() {
        if let Some(token) = bearer_token(&req).map(str::to_owned) {
            match state.authentication_service.resolve_principal(&token).await {
                Ok(Some(person)) => {
                    req.extensions_mut().insert(AuthContext {
                        person_id: person.id,
                        username: person.username,
                        role: person.role.name,
                    });
                }
                Ok(None) => tracing::debug!("Bearer token did not resolve to a person"),
                Err(e) => tracing::warn!("Could not resolve bearer token: {}", e),
            }
        }
    }
    next.run(req).await
}

/// Guard for routes that need a principal holding one of `allowed`.
pub async fn require_roles(req: Request, next: Next, allowed: &[&str]) -> Response {
    let Some(ctx) = req.extensions().get::<AuthContext>() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Authentication required"})),
        )
            .into_response();
    };
    if !allowed.iter().any(|r| r.eq_ignore_ascii_case(&ctx.role)) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Access denied"})),
        )
            .into_response();
    }
    next.run(req).await
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthContext>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Authentication required"})),
            )
                .into_response()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn bearer_token_is_extracted_from_the_header() {
        let req = Request::builder()
            .header("Authorization", "Bearer abc.def.ghi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn other_schemes_and_empty_tokens_are_ignored() {
        let basic = Request::builder()
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&basic), None);

        let empty = Request::builder()
            .header("Authorization", "Bearer ")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&empty), None);

        let none = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(bearer_token(&none), None);
    }
}
