use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_user::get_user;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::welcome::welcome;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::UserService;

/// Shared request-handling state.
///
/// Generic over the repository so the integration tests can wire the
/// in-memory adapter in place of Postgres.
pub struct AppState<R: UserRepository> {
    pub user_service: Arc<UserService<R>>,
    pub authenticator: Arc<Authenticator>,
    pub token_expiry_hours: Option<i64>,
}

impl<R: UserRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            authenticator: Arc::clone(&self.authenticator),
            token_expiry_hours: self.token_expiry_hours,
        }
    }
}

pub fn create_router<R: UserRepository>(
    user_service: Arc<UserService<R>>,
    authenticator: Arc<Authenticator>,
    token_expiry_hours: Option<i64>,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
        token_expiry_hours,
    };

    let public_routes = Router::new()
        .route("/", get(welcome))
        .route("/auth/register", post(register::<R>))
        .route("/auth/login", post(login::<R>));

    let protected_routes = Router::new()
        .route("/user/:user_id", get(get_user::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<R>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
