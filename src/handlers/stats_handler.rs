use std::time::Instant;

use axum::{http::StatusCode, Extension, Json};
use serde_json::json;
use sqlx::PgPool;

use crate::schemas::property_schema::Statistics;
use crate::utils::handler::HandlerResult;
use crate::utils::response::ApiResponse;

/// Aggregate statistics over active listings. Zero-priced rows are left out
/// of the price aggregates.
pub async fn stats(Extension(db): Extension<PgPool>) -> HandlerResult {
    let started = Instant::now();

    let totals = sqlx::query_as::<_, (i64, i64, f64, f64, f64)>(
        r#"
        SELECT
            COUNT(*),
            COUNT(CASE WHEN price > 0 THEN 1 END),
            COALESCE(AVG(CASE WHEN price > 0 THEN price END), 0),
            COALESCE(MIN(CASE WHEN price > 0 THEN price END), 0),
            COALESCE(MAX(CASE WHEN price > 0 THEN price END), 0)
        FROM properties
        WHERE active = true
        "#,
    )
    .fetch_one(&db)
    .await;

    let operations = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT operation_type, COUNT(*)
        FROM properties
        WHERE active = true
        GROUP BY operation_type
        ORDER BY COUNT(*) DESC
        "#,
    )
    .fetch_all(&db)
    .await;

    match (totals, operations) {
        (Ok((total, with_price, avg, min, max)), Ok(operations)) => {
            let stats = Statistics {
                total_properties: total,
                with_price,
                price_avg: avg,
                price_min: min,
                price_max: max,
                operation_types: operations.into_iter().collect(),
                query_ms: started.elapsed().as_secs_f64() * 1000.0,
            };
            let response = ApiResponse::success_with_data("Statistics", json!(stats));
            Ok((StatusCode::OK, Json(response)))
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("statistics query failed: {}", e);
            let response = ApiResponse::error_with_data(
                "Database error",
                json!({ "error": "Failed to compute statistics" }),
            );
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)))
        }
    }
}
