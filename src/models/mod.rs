pub mod property;
pub mod user;
