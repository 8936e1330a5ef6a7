use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json};
use serde_json::json;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::models::user::User;
use crate::schemas::login_schema::{LoginSchema, SessionResponseSchema};
use crate::utils::auth::verify_password_blocking;
use crate::utils::handler::HandlerResult;
use crate::utils::jwt::create_jwt;
use crate::utils::response::ApiResponse;
use crate::utils::validation::validate_payload;

fn unauthorized() -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let response = ApiResponse::error_with_data(
        "Unauthorized",
        json!({ "error": "Invalid email or password" }),
    );
    (StatusCode::UNAUTHORIZED, Json(response))
}

// Handler for user login
pub async fn login_handler(
    Extension(db_pool): Extension<PgPool>,
    Extension(cfg): Extension<Arc<AppConfig>>,
    Json(payload): Json<LoginSchema>,
) -> HandlerResult {
    validate_payload(&payload)?;

    // Normalize email for consistent lookup
    let email_normalized = payload.email.trim().to_lowercase();

    // One row fetch for the account, one scalar for the hash; the hash never
    // travels through the user model.
    let user = match sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, phone, is_admin, active, created_at
        FROM users
        WHERE email = $1 AND active = true
        "#,
    )
    .bind(&email_normalized)
    .fetch_optional(&db_pool)
    .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Err(unauthorized()),
        Err(e) => {
            tracing::error!("login lookup failed: {}", e);
            return Err(unauthorized());
        }
    };

    let stored_hash: String = match sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&db_pool)
        .await
    {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("password fetch failed: {}", e);
            return Err(unauthorized());
        }
    };

    let is_valid = verify_password_blocking(payload.password, stored_hash, None)
        .await
        .unwrap_or_default();
    if !is_valid {
        return Err(unauthorized());
    }

    let token = create_jwt(user.id, &cfg.jwt_secret).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        let response = ApiResponse::error_with_data(
            "Token error",
            json!({ "error": "Failed to generate token" }),
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Json(response))
    })?;

    let session = SessionResponseSchema {
        user,
        access_token: token,
        token_type: "bearer",
    };
    let response = ApiResponse::success_with_data("Login successful", json!(session));
    Ok((StatusCode::OK, Json(response)))
}
