use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::images::ImageResolver;
use crate::models::property::PropertyRow;
use crate::schemas::property_schema::{PropertySummary, SearchPage};
use crate::search::total_pages;
use crate::utils::handler::HandlerResult;
use crate::utils::jwt::Claims;
use crate::utils::response::ApiResponse;

fn db_error(context: &str, e: sqlx::Error) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    tracing::error!("{}: {}", context, e);
    let response = ApiResponse::error_with_data(
        "Database error",
        json!({ "error": "Favorites operation failed" }),
    );
    (StatusCode::INTERNAL_SERVER_ERROR, Json(response))
}

/// Mark a property as favorite. Adding twice is fine and reported as such.
pub async fn store(
    Extension(db): Extension<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(property_id): Path<String>,
) -> HandlerResult {
    let exists: Option<String> =
        sqlx::query_scalar("SELECT id FROM properties WHERE id = $1 AND active = true")
            .bind(&property_id)
            .fetch_optional(&db)
            .await
            .map_err(|e| db_error("favorite target lookup failed", e))?;
    if exists.is_none() {
        let response = ApiResponse::error_with_data(
            "Not found",
            json!({ "error": "Property not found", "id": property_id }),
        );
        return Err((StatusCode::NOT_FOUND, Json(response)));
    }

    let result = sqlx::query(
        "INSERT INTO favorites (user_id, property_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(claims.sub)
    .bind(&property_id)
    .execute(&db)
    .await
    .map_err(|e| db_error("favorite insert failed", e))?;

    let message = if result.rows_affected() == 0 {
        "Property already in favorites"
    } else {
        "Property added to favorites"
    };
    Ok((StatusCode::OK, Json(ApiResponse::success(message))))
}

/// Remove a property from favorites. Removing an absent pair is a no-op.
pub async fn destroy(
    Extension(db): Extension<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(property_id): Path<String>,
) -> HandlerResult {
    sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND property_id = $2")
        .bind(claims.sub)
        .bind(&property_id)
        .execute(&db)
        .await
        .map_err(|e| db_error("favorite delete failed", e))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Property removed from favorites")),
    ))
}

#[derive(Debug, Deserialize)]
pub struct FavoritesPageSchema {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// The caller's favorites, newest first, paginated like search results.
pub async fn index(
    Extension(db): Extension<PgPool>,
    Extension(cfg): Extension<Arc<AppConfig>>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<FavoritesPageSchema>,
) -> HandlerResult {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(20);
    if page < 1 || per_page < 1 || per_page > cfg.search.max_page_size {
        let response = ApiResponse::error_with_data(
            "Validation error",
            json!({
                "error": format!(
                    "page must be >= 1 and per_page between 1 and {}",
                    cfg.search.max_page_size
                )
            }),
        );
        return Err((StatusCode::BAD_REQUEST, Json(response)));
    }

    let started = Instant::now();

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM favorites f
        JOIN properties p ON p.id = f.property_id
        WHERE f.user_id = $1 AND p.active = true
        "#,
    )
    .bind(claims.sub)
    .fetch_one(&db)
    .await
    .map_err(|e| db_error("favorites count failed", e))?;

    let offset = (page as i64 - 1) * per_page as i64;
    let rows = sqlx::query_as::<_, PropertyRow>(
        r#"
        SELECT p.id, p.title, p.description, p.price, p.city, p.operation_type,
               p.property_type, p.image, p.address, p.state, p.link, p.bedrooms,
               p.bathrooms, p.parking_spaces, p.area_m2, p.amenities, p.features,
               p.created_at
        FROM favorites f
        JOIN properties p ON p.id = f.property_id
        WHERE f.user_id = $1 AND p.active = true
        ORDER BY f.added_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(claims.sub)
    .bind(per_page as i64)
    .bind(offset)
    .fetch_all(&db)
    .await
    .map_err(|e| db_error("favorites page failed", e))?;

    let query_ms = started.elapsed().as_secs_f64() * 1000.0;

    let resolver = ImageResolver::new(&cfg.images);
    let properties: Vec<PropertySummary> = rows
        .into_iter()
        .map(|row| PropertySummary::from_row(row, &resolver, true))
        .collect();

    let page_data = SearchPage {
        properties,
        total,
        page,
        per_page,
        total_pages: total_pages(total, per_page),
        query_ms,
    };
    let response = ApiResponse::success_with_data("Favorites fetched", json!(page_data));
    Ok((StatusCode::OK, Json(response)))
}
