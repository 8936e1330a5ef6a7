use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account row. The password hash stays out of this type on purpose; it is
/// only ever read by the login handler as a scalar.
#[derive(sqlx::FromRow, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
