use axum::{routing::get, Router};

use crate::handlers::image_handler::proxy_image;

pub fn image_routes() -> Router {
    Router::new().route("/images/{name}", get(proxy_image))
}
