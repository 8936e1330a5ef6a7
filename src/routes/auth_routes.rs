use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::login_handler::login_handler;
use crate::handlers::profile_handler::profile;
use crate::handlers::register_handler::register_handler;
use crate::middlewares::auth_middleware::auth_middleware;

pub fn auth_routes() -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route(
            "/profile",
            get(profile).layer(middleware::from_fn(auth_middleware)),
        )
}
