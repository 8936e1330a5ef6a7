use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};

use crate::config::AppConfig;
use crate::images::object_key;

/// Inline fallback so a renderer never sees a broken image, whatever went
/// wrong upstream.
const PLACEHOLDER_SVG: &str = r##"<svg width="300" height="200" viewBox="0 0 300 200" xmlns="http://www.w3.org/2000/svg">
    <rect width="300" height="200" fill="#f3f4f6"/>
    <text x="150" y="100" text-anchor="middle" fill="#9ca3af" font-family="Arial" font-size="16">No Image</text>
</svg>"##;

fn placeholder_response() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml".to_string())],
        PLACEHOLDER_SVG,
    )
        .into_response()
}

/// Same-origin proxy for object-storage images. Every failure mode (bad
/// name, timeout, non-200, network error) degrades to the SVG placeholder;
/// this endpoint never errors.
pub async fn proxy_image(
    Extension(cfg): Extension<Arc<AppConfig>>,
    Extension(client): Extension<reqwest::Client>,
    Path(image_name): Path<String>,
) -> Response {
    let key = match object_key(&image_name) {
        Some(key) => key,
        None => return placeholder_response(),
    };

    let url = format!("{}/{}", cfg.images.bucket_root.trim_end_matches('/'), key);

    let upstream = match client.get(&url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!("image fetch failed for {}: {}", url, e);
            return placeholder_response();
        }
    };

    if upstream.status() != reqwest::StatusCode::OK {
        tracing::warn!("image upstream returned {} for {}", upstream.status(), url);
        return placeholder_response();
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();

    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("image body read failed for {}: {}", url, e);
            return placeholder_response();
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
        ],
        bytes,
    )
        .into_response()
}
