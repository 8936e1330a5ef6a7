use crate::utils::handler::HandlerResult;
use crate::utils::response::ApiResponse;
use axum::{http::StatusCode, Extension, Json};
use serde_json::json;
use sqlx::PgPool;

/// API info for the root path.
pub async fn root() -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let data = json!({
        "name": "inmobiliaria-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "properties": "/properties",
            "property": "/properties/{id}",
            "stats": "/stats",
            "register": "/register",
            "login": "/login",
            "favorites": "/favorites",
            "images": "/images/{name}",
            "health": "/health"
        }
    });
    let response = ApiResponse::success_with_data("Listings API", data);
    (StatusCode::OK, Json(response))
}

pub async fn health(Extension(db): Extension<PgPool>) -> HandlerResult {
    // Try a simple DB ping/query
    let res: Result<i64, sqlx::Error> = sqlx::query_scalar("SELECT 1").fetch_one(&db).await;

    match res {
        Ok(_) => {
            let data = json!({ "db": "ok" });
            let response = ApiResponse::success_with_data("OK", data);
            Ok((StatusCode::OK, Json(response)))
        }
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            let response = ApiResponse::error_with_data(
                "Unhealthy",
                json!({ "db": "error", "details": e.to_string() }),
            );
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)))
        }
    }
}
