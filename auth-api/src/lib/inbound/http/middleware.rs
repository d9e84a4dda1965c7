use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Authenticated principal stored in request extensions once the guard
/// passes.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Bearer-token guard for protected routes.
///
/// Stateless per invocation, two terminal outcomes: pass the request on
/// with the decoded claims attached, or reject. A missing or non-bearer
/// `Authorization` header rejects with 401; a token the token service
/// refuses (bad signature, malformed, expired, unusable subject) rejects
/// with 400.
pub async fn authenticate<R: UserRepository>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let claims: auth::Claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        invalid_token()
    })?;

    let user_id = claims
        .subject()
        .and_then(|sub| UserId::from_string(sub).ok())
        .ok_or_else(|| {
            tracing::warn!("Token claims carry no usable subject");
            invalid_token()
        })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(access_denied)?;

    let value = header.to_str().map_err(|_| access_denied())?;

    value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(access_denied)
}

fn access_denied() -> Response {
    ApiError::Unauthorized("access denied".to_string()).into_response()
}

fn invalid_token() -> Response {
    ApiError::BadRequest("invalid token".to_string()).into_response()
}
