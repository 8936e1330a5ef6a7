use serde::Deserialize;

use crate::config::SearchConfig;
use crate::search::filter::{clean_cities, SearchFilter};

/// Raw query parameters of `GET /properties`. List-valued filters arrive as
/// comma-separated strings (`cities=Cuernavaca,Jiutepec`).
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuerySchema {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub cities: Option<String>,
    pub operations: Option<String>,
    pub types: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub no_price_floor: Option<bool>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub parking: Option<String>,
    pub area_min: Option<i32>,
    pub area_max: Option<i32>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

impl SearchQuerySchema {
    /// Clean the raw parameters into a filter set. `page` and `per_page` are
    /// assumed validated by the handler.
    pub fn into_filter(self, page: u32, per_page: u32, cfg: &SearchConfig) -> SearchFilter {
        let raw_cities = csv(self.cities.as_deref());
        SearchFilter {
            page,
            per_page,
            cities: clean_cities(&raw_cities, &cfg.allowed_cities),
            operation_types: csv(self.operations.as_deref()),
            property_types: csv(self.types.as_deref()),
            price_min: self.price_min,
            price_max: self.price_max,
            no_price_floor: self.no_price_floor.unwrap_or(false),
            bedrooms: csv_ints(self.bedrooms.as_deref()),
            bathrooms: csv_ints(self.bathrooms.as_deref()),
            parking: csv_ints(self.parking.as_deref()),
            area_min: self.area_min,
            area_max: self.area_max,
            q: self.q,
            sort: self.sort,
        }
    }
}

fn csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn csv_ints(raw: Option<&str>) -> Vec<i32> {
    raw.map(|s| {
        s.split(',')
            .filter_map(|t| t.trim().parse::<i32>().ok())
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cfg() -> SearchConfig {
        SearchConfig {
            default_page_size: 60,
            max_page_size: 100,
            price_floor: 1.0,
            allowed_cities: ["Cuernavaca", "Jiutepec"].iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
        }
    }

    #[test]
    fn csv_lists_are_split_and_trimmed() {
        let schema = SearchQuerySchema {
            cities: Some("cuernavaca , jiutepec,Gotham".into()),
            bedrooms: Some("2,3,x".into()),
            ..Default::default()
        };
        let filter = schema.into_filter(1, 60, &cfg());
        assert_eq!(filter.cities, vec!["Cuernavaca", "Jiutepec"]);
        assert_eq!(filter.bedrooms, vec![2, 3]);
    }

    #[test]
    fn absent_lists_stay_empty() {
        let filter = SearchQuerySchema::default().into_filter(1, 60, &cfg());
        assert!(filter.cities.is_empty());
        assert!(filter.operation_types.is_empty());
        assert!(!filter.no_price_floor);
    }
}
