pub mod config;
pub mod handlers;
pub mod images;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod schemas;
pub mod search;
pub mod utils;

pub mod app;

pub use app::create_app;
pub use config::AppConfig;
