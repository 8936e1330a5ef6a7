pub mod auth_routes;
pub mod favorite_routes;
pub mod image_routes;
pub mod property_routes;
