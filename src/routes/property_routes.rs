use axum::{middleware, routing::get, Router};

use crate::handlers::health_handler::{health, root};
use crate::handlers::property_handler::{search, show};
use crate::handlers::stats_handler::stats;
use crate::middlewares::auth_middleware::optional_auth_middleware;

pub fn property_routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/properties", get(search))
        .route("/properties/{id}", get(show))
        // Search personalizes `is_favorite` when a token is present
        .layer(middleware::from_fn(optional_auth_middleware))
}
