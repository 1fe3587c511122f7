use std::sync::Arc;
use std::time::Duration;

use auth::JwtHandler;
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

use super::handlers::sign_in::sign_in;
use super::handlers::sign_out::sign_out;
use super::handlers::user_info::user_info;
use super::middleware::bearer_auth;
use super::middleware::session_auth;
use super::session::SessionCodec;
use crate::identity::service::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AuthService>,
    pub jwt: Arc<JwtHandler>,
    pub sessions: SessionCodec,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/signin", post(sign_in))
        .route("/api/auth/signout", post(sign_out));

    // API clients authenticate with the bearer header, browsers with the
    // session cookie; both land in the same handlers.
    let bearer_routes = Router::new()
        .route("/api/auth/userinfo", get(user_info))
        .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth));

    let session_routes = Router::new()
        .route("/api/web/userinfo", get(user_info))
        .route_layer(middleware::from_fn_with_state(state.clone(), session_auth));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Credentials travel in headers; the span deliberately leaves
            // them out.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
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
        .merge(bearer_routes)
        .merge(session_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
