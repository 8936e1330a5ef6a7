use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json};
use serde_json::json;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::models::user::User;
use crate::schemas::login_schema::SessionResponseSchema;
use crate::schemas::RegisterSchema;
use crate::utils::auth::hash_password_blocking;
use crate::utils::handler::HandlerResult;
use crate::utils::jwt::create_jwt;
use crate::utils::response::ApiResponse;
use crate::utils::validation::validate_payload;

/// Register a new account and hand back a session token right away.
pub async fn register_handler(
    Extension(db_pool): Extension<PgPool>,
    Extension(cfg): Extension<Arc<AppConfig>>,
    Json(payload): Json<RegisterSchema>,
) -> HandlerResult {
    validate_payload(&payload)?;

    // Normalize email for consistent duplicate checks and storage
    let email_normalized = payload.email.trim().to_lowercase();

    let hashed_password = hash_password_blocking(payload.password, bcrypt::DEFAULT_COST, None)
        .await
        .map_err(|e| {
            tracing::error!("password hashing failed: {}", e);
            let response =
                ApiResponse::error_with_data("Hash error", json!({ "error": "Failed to hash password" }));
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response))
        })?;

    let inserted = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, phone, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, phone, is_admin, active, created_at
        "#,
    )
    .bind(&payload.name)
    .bind(&email_normalized)
    .bind(&payload.phone)
    .bind(&hashed_password)
    .fetch_one(&db_pool)
    .await;

    let user = match inserted {
        Ok(user) => user,
        Err(e) => {
            // Unique violation on the email column means a concurrent or
            // repeated registration; everything else is a server error.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23505") {
                    let response = ApiResponse::error_with_data(
                        "Conflict",
                        json!({ "error": "Email already registered", "field": "email" }),
                    );
                    return Err((StatusCode::CONFLICT, Json(response)));
                }
            }
            tracing::error!("failed to register user: {}", e);
            let response = ApiResponse::error_with_data(
                "Database error",
                json!({ "error": "Failed to register user" }),
            );
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)));
        }
    };

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
    let response = ApiResponse::success_with_data("User registered", json!(session));
    Ok((StatusCode::CREATED, Json(response)))
}
