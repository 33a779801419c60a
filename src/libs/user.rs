use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    pub full_name: String,
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    pub fn new(username: &str, full_name: &str) -> Self {
        User {
            id: None,
            username: username.to_string(),
            full_name: full_name.to_string(),
            created_at: None,
        }
    }
}
