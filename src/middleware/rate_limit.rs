use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorError, GovernorLayer};

use crate::config::Config;

/// Type alias for the IP-keyed governor layer
pub type PublicGovernorLayer = GovernorLayer<
    tower_governor::key_extractor::PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// Create a GovernorLayer limiting each client IP.
/// One token is replenished every `rate_limit_period_ms`, up to `rate_limit_burst`.
pub fn create_public_governor(config: &Config) -> PublicGovernorLayer {
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(config.rate_limit_period_ms)
            .burst_size(config.rate_limit_burst)
            .finish()
            .expect("RATE_LIMIT_PERIOD_MS and RATE_LIMIT_BURST must be non-zero"),
    );

    GovernorLayer::new(governor_config).error_handler(rate_limit_error_handler)
}

/// Render governor rejections as JSON errors
pub fn rate_limit_error_handler(error: GovernorError) -> Response<Body> {
    match error {
        GovernorError::TooManyRequests { wait_time, .. } => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Too many requests",
                "retry_after_secs": wait_time,
            })),
        )
            .into_response(),
        GovernorError::UnableToExtractKey => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Unable to identify client" })),
        )
            .into_response(),
        GovernorError::Other { code, msg, .. } => (
            code,
            Json(json!({ "error": msg.unwrap_or_else(|| "Request rejected".to_string()) })),
        )
            .into_response(),
    }
}

/// Middleware to log request and response details
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    tracing::debug!(
        client_ip = %addr.ip(),
        method = %method,
        uri = %uri,
        "Incoming request"
    );

    let response = next.run(request).await;
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!(
            client_ip = %addr.ip(),
            method = %method,
            uri = %uri,
            status = %status,
            "Rate limited"
        );
    } else if status.is_client_error() || status.is_server_error() {
        tracing::warn!(
            client_ip = %addr.ip(),
            method = %method,
            uri = %uri,
            status = %status,
            "Request failed"
        );
    } else {
        tracing::debug!(
            client_ip = %addr.ip(),
            method = %method,
            uri = %uri,
            status = %status,
            "Request completed"
        );
    }

    response
}
