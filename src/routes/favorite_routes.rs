use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::favorite_handler::{destroy, index, store};
use crate::middlewares::auth_middleware::auth_middleware;

pub fn favorite_routes() -> Router {
    Router::new()
        .route("/favorites", get(index))
        .route("/favorites/{property_id}", post(store).delete(destroy))
        // Favorites are always tied to an authenticated account
        .layer(middleware::from_fn(auth_middleware))
}
