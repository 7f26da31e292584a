//! Application router assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::notification::NotificationGateway;

use crate::config::Config;
use crate::middleware::{self, RateLimiterState};
use crate::routes;

/// Shared application state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub notifier: Arc<dyn NotificationGateway>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

/// Builds the application router with all routes and middleware.
pub fn create_app(config: Config, pool: PgPool, notifier: Arc<dyn NotificationGateway>) -> Router {
    let rate_limiter = (config.security.rate_limit_per_minute > 0)
        .then(|| Arc::new(RateLimiterState::new(config.security.rate_limit_per_minute)));

    let cors = build_cors(&config.security.cors_origins);
    let timeout = TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs));

    let state = AppState {
        pool,
        config: Arc::new(config),
        notifier,
        rate_limiter,
    };

    let api = Router::new()
        .route("/groups", post(routes::groups::create_group))
        .route("/groups/join", post(routes::invitations::join_group))
        .route("/groups/:group_id", get(routes::groups::get_group))
        .route(
            "/groups/:group_id/invites",
            post(routes::invitations::create_invitation),
        )
        .route("/lives", post(routes::lives::create_live))
        .route(
            "/lives/:live_id",
            get(routes::lives::get_live).patch(routes::lives::edit_live),
        )
        .route(
            "/performance-requests/:request_id/reply",
            post(routes::lives::reply_to_request),
        )
        .route(
            "/lives/:live_id/tickets",
            post(routes::tickets::reserve_ticket),
        )
        .route(
            "/tickets/:ticket_id/refund",
            post(routes::tickets::refund_ticket),
        )
        .route(
            "/lives/:live_id/participants",
            get(routes::tickets::list_participants),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ));

    let health = Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/health/ready", get(routes::health::ready))
        .route("/api/health/live", get(routes::health::live));

    Router::new()
        .nest("/api/v1", api)
        .merge(health)
        .route("/metrics", get(middleware::metrics_handler))
        .layer(axum_middleware::from_fn(middleware::metrics_middleware))
        .layer(axum_middleware::from_fn(middleware::trace_id::trace_id))
        .layer(TraceLayer::new_for_http())
        .layer(timeout)
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// CORS policy from configuration: an explicit origin list, or permissive
/// when none is configured.
fn build_cors(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
