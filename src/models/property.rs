use chrono::{DateTime, Utc};
use serde_json::Value;

/// Listing row as selected by the search and detail queries. The raw
/// `image` column is resolved into a displayable reference before anything
/// is serialized, so this type is not itself a response schema.
#[derive(sqlx::FromRow, Debug)]
pub struct PropertyRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub city: String,
    pub operation_type: String,
    pub property_type: Option<String>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub link: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub parking_spaces: Option<i32>,
    pub area_m2: Option<i32>,
    pub amenities: Option<Value>,
    pub features: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Detail row adds the gallery column.
#[derive(sqlx::FromRow, Debug)]
pub struct PropertyDetailRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub city: String,
    pub operation_type: String,
    pub property_type: Option<String>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub link: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub parking_spaces: Option<i32>,
    pub area_m2: Option<i32>,
    pub amenities: Option<Value>,
    pub features: Option<Value>,
    pub images: Option<Value>,
    pub created_at: DateTime<Utc>,
}
