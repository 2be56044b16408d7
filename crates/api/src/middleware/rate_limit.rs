//! Per-IP request rate limiting middleware.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::state::AppState;

/// Reject requests beyond the configured fixed window with a 429.
///
/// The client IP comes from the connection info; when the router is
/// driven without a socket (tests), all requests share one bucket.
pub async fn rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let client: IpAddr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if state.limiter.allow(client) {
        return next.run(req).await;
    }

    (
        StatusCode::TOO_MANY_REQUESTS,
        axum::Json(json!({
            "success": false,
            "error": "Too many requests, please try again later",
        })),
    )
        .into_response()
}
