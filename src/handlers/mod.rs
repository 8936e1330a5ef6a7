pub mod favorite_handler;
pub mod health_handler;
pub mod image_handler;
pub mod login_handler;
pub mod profile_handler;
pub mod property_handler;
pub mod register_handler;
pub mod stats_handler;
