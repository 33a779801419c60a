use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<i64>,
    /// May reference a deleted record; there is no cascade.
    pub record_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: Option<NaiveDateTime>,
    /// Equals `created_at` until the first edit.
    pub updated_at: Option<NaiveDateTime>,
}

impl Comment {
    pub fn new(record_id: i64, user_id: i64, content: &str) -> Self {
        Comment {
            id: None,
            record_id,
            user_id,
            content: content.to_string(),
            created_at: None,
            updated_at: None,
        }
    }
}
