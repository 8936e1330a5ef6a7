use std::sync::Arc;
use std::time::Duration;

use axum::{Extension, Router};
use sqlx::PgPool;

use crate::config::AppConfig;

pub fn build_router() -> Router {
    use axum::http::Method;
    use tower_http::cors::{Any, CorsLayer};

    let mut app = Router::new()
        .merge(crate::routes::property_routes::property_routes())
        .merge(crate::routes::auth_routes::auth_routes())
        .merge(crate::routes::favorite_routes::favorite_routes())
        .merge(crate::routes::image_routes::image_routes());

    // Configure CORS based on environment variables:

    let cors_allowed = std::env::var("CORS_ALLOWED_ORIGINS").ok();
    let enable_cors = std::env::var("ENABLE_CORS")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if enable_cors || cors_allowed.is_some() {
        // If CORS_ALLOWED_ORIGINS is exactly "*" treat it as permissive Any. Otherwise parse a CSV of origins.
        let cors_layer = if let Some(list) = cors_allowed {
            if list.trim() == "*" {
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                    .allow_headers(Any)
            } else {
                use axum::http::header::HeaderValue;
                use tower_http::cors::AllowOrigin;
                let origins = list
                    .split(',')
                    .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
                    .collect::<Vec<HeaderValue>>();
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                    .allow_headers(Any)
            }
        } else {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers(Any)
        };
        app = app.layer(cors_layer);
    }

    app
}

/// Assemble the application with its shared state: pool, configuration, and
/// the outbound HTTP client used by the image proxy, built once with the
/// configured timeout.
pub fn create_app(pool: PgPool, cfg: AppConfig) -> Router {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.images.proxy_timeout_secs))
        .build()
        .expect("failed to build outbound HTTP client");

    build_router()
        .layer(Extension(pool))
        .layer(Extension(Arc::new(cfg)))
        .layer(Extension(client))
}
