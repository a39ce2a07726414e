use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::{
    create_event, create_response, get_event, get_event_group, health_check, method_not_allowed,
    preflight,
};
use crate::state::AppState;

pub fn create_routes(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/events",
            post(create_event)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/events/:id",
            get(get_event)
                .head(method_not_allowed)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/events/:id/group",
            get(get_event_group)
                .head(method_not_allowed)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/events/:id/responses",
            post(create_response)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(cors_allowed_origins))
        .with_state(state)
}
