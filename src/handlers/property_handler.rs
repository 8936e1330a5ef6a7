use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::images::ImageResolver;
use crate::models::property::{PropertyDetailRow, PropertyRow};
use crate::schemas::property_schema::{PropertyDetail, PropertySummary, SearchPage};
use crate::schemas::search_schema::SearchQuerySchema;
use crate::search::{build_search, total_pages, QueryParam};
use crate::utils::handler::HandlerResult;
use crate::utils::jwt::Claims;
use crate::utils::response::ApiResponse;

fn db_error(context: &str, e: sqlx::Error) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    tracing::error!("{}: {}", context, e);
    let response = ApiResponse::error_with_data(
        "Database error",
        json!({ "error": "Failed to fetch properties" }),
    );
    (StatusCode::INTERNAL_SERVER_ERROR, Json(response))
}

/// Paginated, filtered listing search. With a valid bearer token the rows
/// carry the caller's `is_favorite` flags; anonymous callers get `false`.
pub async fn search(
    Extension(db): Extension<PgPool>,
    Extension(cfg): Extension<Arc<AppConfig>>,
    claims: Option<Extension<Claims>>,
    Query(params): Query<SearchQuerySchema>,
) -> HandlerResult {
    // Page bounds are rejected before anything touches the database.
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(cfg.search.default_page_size);
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

    let filter = params.into_filter(page, per_page, &cfg.search);
    let built = build_search(&filter, &cfg.search);

    let started = Instant::now();

    let mut select = sqlx::query_as::<_, PropertyRow>(&built.select_sql);
    for param in built.select_params() {
        select = match param {
            QueryParam::Text(v) => select.bind(v),
            QueryParam::Float(v) => select.bind(v),
            QueryParam::Int(v) => select.bind(v),
        };
    }
    let rows = select
        .fetch_all(&db)
        .await
        .map_err(|e| db_error("search select failed", e))?;

    let mut count = sqlx::query_scalar::<_, i64>(&built.count_sql);
    for param in built.count_params() {
        count = match param {
            QueryParam::Text(v) => count.bind(v.clone()),
            QueryParam::Float(v) => count.bind(*v),
            QueryParam::Int(v) => count.bind(*v),
        };
    }
    let total = count
        .fetch_one(&db)
        .await
        .map_err(|e| db_error("search count failed", e))?;

    let query_ms = started.elapsed().as_secs_f64() * 1000.0;

    let favorite_ids = match claims {
        Some(Extension(claims)) if !rows.is_empty() => {
            favorite_ids_for(&db, claims.sub, &rows).await
        }
        _ => HashSet::new(),
    };

    let resolver = ImageResolver::new(&cfg.images);
    let properties: Vec<PropertySummary> = rows
        .into_iter()
        .map(|row| {
            let is_favorite = favorite_ids.contains(&row.id);
            PropertySummary::from_row(row, &resolver, is_favorite)
        })
        .collect();

    let page_data = SearchPage {
        properties,
        total,
        page,
        per_page,
        total_pages: total_pages(total, per_page),
        query_ms,
    };
    let response = ApiResponse::success_with_data("Properties fetched", json!(page_data));
    Ok((StatusCode::OK, Json(response)))
}

/// Favorite flags are cosmetic; a lookup failure falls back to "none" rather
/// than failing the search.
async fn favorite_ids_for(db: &PgPool, user_id: i64, rows: &[PropertyRow]) -> HashSet<String> {
    let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
    match sqlx::query_scalar::<_, String>(
        "SELECT property_id FROM favorites WHERE user_id = $1 AND property_id = ANY($2)",
    )
    .bind(user_id)
    .bind(&ids)
    .fetch_all(db)
    .await
    {
        Ok(found) => found.into_iter().collect(),
        Err(e) => {
            tracing::warn!("favorite flag lookup failed: {}", e);
            HashSet::new()
        }
    }
}

/// Single active listing by id.
pub async fn show(
    Extension(db): Extension<PgPool>,
    Extension(cfg): Extension<Arc<AppConfig>>,
    Path(property_id): Path<String>,
) -> HandlerResult {
    let row = sqlx::query_as::<_, PropertyDetailRow>(
        r#"
        SELECT id, title, description, price, city, operation_type, property_type,
               image, address, state, link, bedrooms, bathrooms, parking_spaces,
               area_m2, amenities, features, images, created_at
        FROM properties
        WHERE id = $1 AND active = true
        "#,
    )
    .bind(&property_id)
    .fetch_optional(&db)
    .await
    .map_err(|e| db_error("property fetch failed", e))?;

    match row {
        Some(row) => {
            let resolver = ImageResolver::new(&cfg.images);
            let detail = PropertyDetail::from_row(row, &resolver);
            let response = ApiResponse::success_with_data("Property fetched", json!(detail));
            Ok((StatusCode::OK, Json(response)))
        }
        None => {
            let response = ApiResponse::error_with_data(
                "Not found",
                json!({ "error": "Property not found", "id": property_id }),
            );
            Err((StatusCode::NOT_FOUND, Json(response)))
        }
    }
}
