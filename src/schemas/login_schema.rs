use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::User;
use crate::schemas::register_schema::EMAIL_RE;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginSchema {
    #[validate(regex(path = *EMAIL_RE, message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// Returned by both `/register` and `/login`: the authenticated user plus a
/// bearer token.
#[derive(Debug, Serialize)]
pub struct SessionResponseSchema {
    pub user: User,
    pub access_token: String,
    pub token_type: &'static str,
}
