use std::collections::HashSet;

use crate::images::ResolveMode;
use crate::search::filter::title_case;

/// Application configuration, built once at startup and passed into the
/// router as an extension. Handlers never read env vars directly.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub search: SearchConfig,
    pub images: ImageConfig,
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// Minimum price applied when the caller gives no usable `price_min`.
    /// Listings without a positive price are excluded by default.
    pub price_floor: f64,
    /// Cities accepted by the city filter. Anything else is dropped from the
    /// filter set. Empty set disables the check.
    pub allowed_cities: HashSet<String>,
}

#[derive(Clone, Debug)]
pub struct ImageConfig {
    pub mode: ResolveMode,
    /// Host substring identifying the trusted object-storage origin.
    pub trusted_host: String,
    /// Bucket root URL, without trailing slash.
    pub bucket_root: String,
    pub proxy_timeout_secs: u64,
}

const DEFAULT_CITIES: &[&str] = &[
    "Cuernavaca",
    "Jiutepec",
    "Temixco",
    "Emiliano Zapata",
    "Xochitepec",
    "Yautepec",
    "Cuautla",
    "Ayala",
    "Tepoztlán",
    "Huitzilac",
    "Tetela del Volcán",
];

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// deployment defaults matching the production setup.
    pub fn from_env() -> Self {
        let mode = match std::env::var("IMAGE_URL_MODE").as_deref() {
            Ok("full") => ResolveMode::FullUrl,
            _ => ResolveMode::ProxyKey,
        };

        // Entries go through the same normalization the city filter applies
        // to query input, so a lowercase-configured list still matches.
        let allowed_cities = match std::env::var("ALLOWED_CITIES") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(title_case)
                .collect(),
            _ => DEFAULT_CITIES.iter().map(|s| title_case(s)).collect(),
        };

        Self {
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me".to_string()),
            search: SearchConfig {
                default_page_size: env_parse("SEARCH_DEFAULT_PAGE_SIZE", 60),
                max_page_size: env_parse("SEARCH_MAX_PAGE_SIZE", 100),
                price_floor: env_parse("SEARCH_PRICE_FLOOR", 1.0),
                allowed_cities,
            },
            images: ImageConfig {
                mode,
                trusted_host: std::env::var("IMAGE_TRUSTED_HOST")
                    .unwrap_or_else(|_| "s3.amazonaws.com".to_string()),
                bucket_root: std::env::var("IMAGE_BUCKET_ROOT").unwrap_or_else(|_| {
                    "https://propiedades-morelos-imagenes.s3.amazonaws.com".to_string()
                }),
                proxy_timeout_secs: env_parse("IMAGE_PROXY_TIMEOUT_SECS", 10),
            },
        }
    }
}

fn env_parse<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test for both branches; they share the ALLOWED_CITIES variable and
    // must not run concurrently.
    #[test]
    fn allowed_cities_are_normalized_like_filter_input() {
        let prev = std::env::var("ALLOWED_CITIES").ok();

        std::env::set_var("ALLOWED_CITIES", "cuernavaca, JIUTEPEC ,tetela del volcán,");
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.search.allowed_cities.len(), 3);
        for city in ["Cuernavaca", "Jiutepec", "Tetela Del Volcán"] {
            assert!(cfg.search.allowed_cities.contains(city), "city: {city}");
        }

        // Every default entry must be reachable through the city filter too.
        std::env::remove_var("ALLOWED_CITIES");
        let cfg = AppConfig::from_env();
        for city in DEFAULT_CITIES {
            assert!(
                cfg.search.allowed_cities.contains(&title_case(city)),
                "city: {city}"
            );
        }

        if let Some(v) = prev {
            std::env::set_var("ALLOWED_CITIES", v);
        }
    }
}

/// Database configuration helpers
pub mod database {
    use sqlx::postgres::{PgPool, PgPoolOptions};

    /// Establish a connection pool using the `DATABASE_URL` environment
    /// variable and run pending migrations.
    pub async fn establish_connection() -> Result<PgPool, sqlx::Error> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }
}
