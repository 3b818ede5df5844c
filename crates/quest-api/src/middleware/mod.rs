//! Tower middleware wired around the API routes: request ids, tracing
//! spans, request timeout, and CORS.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use quest_common::CorsConfig;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, info_span, warn, Level, Span};

use crate::state::AppState;

/// Every request gets an `x-request-id`, generated when the client did
/// not send one and echoed back on the response.
pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Requests that outlive this budget are cut off with a 503.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wraps the router with the full stack. Ordering is outermost first:
/// the id layers run before tracing so the span can pick up the id, and
/// CORS sits innermost so preflight responses still carry an id.
pub fn apply(router: Router<AppState>, cors: &CorsConfig, production: bool) -> Router<AppState> {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(REQUEST_ID, MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(REQUEST_ID))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(request_span)
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            ))
            .layer(cors_layer(cors, production)),
    )
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

fn cors_layer(config: &CorsConfig, production: bool) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            REQUEST_ID,
        ])
        .expose_headers([REQUEST_ID]);

    if config.allowed_origins.is_empty() {
        // No configured origins: wide open for local development, closed
        // in production.
        return if production {
            warn!("no CORS origins configured; cross-origin requests will be refused");
            layer.allow_origin(AllowOrigin::list(std::iter::empty()))
        } else {
            warn!("CORS allows any origin; set CORS_ALLOWED_ORIGINS before deploying");
            layer.allow_origin(Any)
        };
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    info!(count = origins.len(), "CORS restricted to configured origins");
    layer.allow_origin(AllowOrigin::list(origins))
}
