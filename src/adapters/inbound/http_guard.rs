//! HTTP Guard
//!
//! axum middleware that runs every request's peer address through an
//! [`AccessMatcher`] and answers `403 Forbidden` when it is rejected.
//!
//! The router must be served with
//! `into_make_service_with_connect_info::<SocketAddr>()` so the peer address
//! is available; without it every request is evaluated as coming from an
//! empty address and is rejected unless the policy is open.

use crate::application::AccessMatcher;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

/// Middleware function; use with `axum::middleware::from_fn_with_state`.
pub async fn geo_guard(
    State(matcher): State<Arc<AccessMatcher>>,
    req: Request,
    next: Next,
) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();

    if matcher.evaluate(&peer) {
        next.run(req).await
    } else {
        StatusCode::FORBIDDEN.into_response()
    }
}

/// Wrap every route of `router` with [`geo_guard`].
pub fn protect<S>(router: Router<S>, matcher: Arc<AccessMatcher>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(matcher, geo_guard))
}
