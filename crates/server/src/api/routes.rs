use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::middleware::metrics_middleware;
use super::{handlers, listing, movies};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Remote listing
        .route("/movielist", get(listing::movie_list))
        // Datasets
        .route("/movies/{category}/{year}", get(movies::list_by_year))
        .route("/{category}/{year}/{slug}", get(movies::get_detail))
        // Parameters at one position must share a name; here `{year}` is the search query.
        .route("/{category}/{year}", get(movies::search))
        .with_state(state.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .nest("/api", api_routes)
        .route_layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
