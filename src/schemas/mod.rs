pub mod login_schema;
pub mod property_schema;
pub mod register_schema;
pub mod search_schema;

pub use login_schema::{LoginSchema, SessionResponseSchema};
pub use register_schema::RegisterSchema;
