use std::sync::Arc;

use axum::{
    extract::Request, http::StatusCode, middleware::Next, response::Response, Extension, Json,
};

use crate::config::AppConfig;
use crate::utils::jwt::decode_jwt;
use crate::utils::response::ApiResponse;

// Type error response alias
type AuthErrorResponse = (StatusCode, Json<ApiResponse<serde_json::Value>>);

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Authentication middleware protecting the profile and favorites routes.
/// Valid claims are attached to the request extensions.
pub async fn auth_middleware(
    Extension(cfg): Extension<Arc<AppConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthErrorResponse> {
    let token = match bearer_token(&req) {
        Some(t) => t,
        None => {
            let response = ApiResponse::error_with_data(
                "Unauthorized",
                serde_json::json!({ "error": "Missing or malformed Authorization header" }),
            );
            return Err((StatusCode::UNAUTHORIZED, Json(response)));
        }
    };

    match decode_jwt(token, &cfg.jwt_secret) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            let response = ApiResponse::error_with_data(
                "Unauthorized",
                serde_json::json!({ "error": "Invalid or expired token", "details": e.to_string() }),
            );
            Err((StatusCode::UNAUTHORIZED, Json(response)))
        }
    }
}

/// Best-effort variant for public routes that personalize results (the
/// `is_favorite` flag on search). An absent or invalid token is not an
/// error; the request just proceeds anonymously.
pub async fn optional_auth_middleware(
    Extension(cfg): Extension<Arc<AppConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&req) {
        if let Ok(claims) = decode_jwt(token, &cfg.jwt_secret) {
            req.extensions_mut().insert(claims);
        }
    }
    next.run(req).await
}
