use std::collections::HashSet;

/// Cleaned filter set for a property search. Built from query parameters by
/// the search schema; all string values here are bound as statement
/// parameters, never spliced into SQL text.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub page: u32,
    pub per_page: u32,
    pub cities: Vec<String>,
    pub operation_types: Vec<String>,
    pub property_types: Vec<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Explicit opt-out of the default minimum-price floor.
    pub no_price_floor: bool,
    pub bedrooms: Vec<i32>,
    pub bathrooms: Vec<i32>,
    pub parking: Vec<i32>,
    pub area_min: Option<i32>,
    pub area_max: Option<i32>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

/// Normalize a city name and check it against the configured allow-list.
/// Returns `None` for names that are empty or not recognized.
pub fn clean_city(raw: &str, allowed: &HashSet<String>) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = title_case(trimmed);
    if allowed.is_empty() || allowed.contains(&normalized) {
        Some(normalized)
    } else {
        None
    }
}

/// Keep only recognized cities; duplicates are collapsed while preserving
/// the caller's order.
pub fn clean_cities(raw: &[String], allowed: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(|c| clean_city(c, allowed))
        .filter(|c| seen.insert(c.clone()))
        .collect()
}

/// Shared normalization for city names, both for query input and for the
/// configured allow-list, so the two always compare in the same form.
pub(crate) fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> HashSet<String> {
        ["Cuernavaca", "Jiutepec", "Emiliano Zapata"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn clean_city_normalizes_case_and_whitespace() {
        let a = allowed();
        assert_eq!(clean_city("  cuernavaca ", &a), Some("Cuernavaca".into()));
        assert_eq!(clean_city("EMILIANO zapata", &a), Some("Emiliano Zapata".into()));
    }

    #[test]
    fn clean_city_rejects_unknown_and_empty() {
        let a = allowed();
        assert_eq!(clean_city("Gotham", &a), None);
        assert_eq!(clean_city("   ", &a), None);
    }

    #[test]
    fn clean_city_accepts_anything_when_list_empty() {
        let empty = HashSet::new();
        assert_eq!(clean_city("anywhere", &empty), Some("Anywhere".into()));
    }

    #[test]
    fn clean_cities_drops_invalid_and_duplicates() {
        let a = allowed();
        let raw = vec![
            "cuernavaca".to_string(),
            "Nowhere".to_string(),
            "Cuernavaca".to_string(),
            "jiutepec".to_string(),
        ];
        assert_eq!(clean_cities(&raw, &a), vec!["Cuernavaca", "Jiutepec"]);
    }
}
