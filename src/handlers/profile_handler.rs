use axum::{http::StatusCode, Extension, Json};
use serde_json::json;
use sqlx::PgPool;

use crate::models::user::User;
use crate::utils::handler::HandlerResult;
use crate::utils::jwt::Claims;
use crate::utils::response::ApiResponse;

/// Current account, from the claims attached by the auth middleware.
pub async fn profile(
    Extension(db): Extension<PgPool>,
    Extension(claims): Extension<Claims>,
) -> HandlerResult {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, phone, is_admin, active, created_at
        FROM users
        WHERE id = $1 AND active = true
        "#,
    )
    .bind(claims.sub)
    .fetch_optional(&db)
    .await;

    match user {
        Ok(Some(user)) => {
            let response = ApiResponse::success_with_data("Profile", json!(user));
            Ok((StatusCode::OK, Json(response)))
        }
        Ok(None) => {
            let response = ApiResponse::error_with_data(
                "Unauthorized",
                json!({ "error": "Account no longer active" }),
            );
            Err((StatusCode::UNAUTHORIZED, Json(response)))
        }
        Err(e) => {
            tracing::error!("profile lookup failed: {}", e);
            let response = ApiResponse::error_with_data(
                "Database error",
                json!({ "error": "Failed to fetch profile" }),
            );
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)))
        }
    }
}
