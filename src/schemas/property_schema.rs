use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::images::ImageResolver;
use crate::models::property::{PropertyDetailRow, PropertyRow};

/// Listing summary as returned by search and favorites pages.
#[derive(Debug, Serialize)]
pub struct PropertySummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub city: String,
    pub operation_type: String,
    pub property_type: Option<String>,
    pub image_url: String,
    pub address: Option<String>,
    pub state: Option<String>,
    pub link: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub parking_spaces: Option<i32>,
    pub area_m2: Option<i32>,
    pub amenities: Option<Value>,
    pub features: Option<Value>,
    pub is_favorite: bool,
}

impl PropertySummary {
    pub fn from_row(row: PropertyRow, resolver: &ImageResolver, is_favorite: bool) -> Self {
        let image_url = resolver.resolve(row.image.as_deref()).into_value();
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            city: row.city,
            operation_type: row.operation_type,
            property_type: row.property_type,
            image_url,
            address: row.address,
            state: row.state,
            link: row.link,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            parking_spaces: row.parking_spaces,
            area_m2: row.area_m2,
            amenities: row.amenities,
            features: row.features,
            is_favorite,
        }
    }
}

/// Full listing, for the detail endpoint.
#[derive(Debug, Serialize)]
pub struct PropertyDetail {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub city: String,
    pub operation_type: String,
    pub property_type: Option<String>,
    pub image_url: String,
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

impl PropertyDetail {
    pub fn from_row(row: PropertyDetailRow, resolver: &ImageResolver) -> Self {
        let image_url = resolver.resolve(row.image.as_deref()).into_value();
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            city: row.city,
            operation_type: row.operation_type,
            property_type: row.property_type,
            image_url,
            address: row.address,
            state: row.state,
            link: row.link,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            parking_spaces: row.parking_spaces,
            area_m2: row.area_m2,
            amenities: row.amenities,
            features: row.features,
            images: row.images,
            created_at: row.created_at,
        }
    }
}

/// One page of search or favorites results. The count and the page come from
/// statements sharing the same WHERE clause, so `total` is always consistent
/// with the returned rows.
#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub properties: Vec<PropertySummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: i64,
    pub query_ms: f64,
}

/// Aggregate statistics over active listings.
#[derive(Debug, Serialize)]
pub struct Statistics {
    pub total_properties: i64,
    pub with_price: i64,
    pub price_avg: f64,
    pub price_min: f64,
    pub price_max: f64,
    pub operation_types: HashMap<String, i64>,
    pub query_ms: f64,
}
