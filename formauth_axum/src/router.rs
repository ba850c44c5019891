//! Router for all authentication pages

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use formauth::AuthContext;

use super::config::{
    DASHBOARD_PATH, HOME_PATH, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH, ROOT_PATH,
};
use super::middleware::require_session;
use super::pages;

/// Create the router for every authentication page, with HTTP tracing
///
/// Routes:
/// - `/` plain text landing page
/// - `/register` and `/login` forms (GET) and their submissions (POST)
/// - `/dashboard`, `/home` and `/logout`, which require a session
pub fn formauth_router(ctx: Arc<AuthContext>) -> Router {
    formauth_router_no_trace(ctx).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`formauth_router`] but without the HTTP tracing middleware
pub fn formauth_router_no_trace(ctx: Arc<AuthContext>) -> Router {
    let protected = Router::new()
        .route(DASHBOARD_PATH, get(pages::dashboard))
        .route(HOME_PATH, get(pages::home))
        .route(LOGOUT_PATH, get(pages::logout))
        .route_layer(from_fn_with_state(ctx.clone(), require_session));

    Router::new()
        .route(ROOT_PATH, get(pages::index))
        .route(
            REGISTER_PATH,
            get(pages::register_form).post(pages::register),
        )
        .route(LOGIN_PATH, get(pages::login_form).post(pages::login))
        .merge(protected)
        .with_state(ctx)
}
