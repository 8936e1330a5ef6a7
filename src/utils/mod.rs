pub mod auth;
pub mod handler;
pub mod jwt;
pub mod response;
pub mod validation;
