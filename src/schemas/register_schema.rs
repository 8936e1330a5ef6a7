use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

/// Local part, domain, and a TLD of at least two letters. Deliberately
/// simple; deliverability is not our problem.
pub static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

// Request schema: only needs Deserialize + validation
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterSchema {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,

    #[validate(regex(path = *EMAIL_RE, message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 30, message = "Phone number too long"))]
    pub phone: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}
