use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default category assigned when the user leaves it blank.
pub const DEFAULT_CATEGORY: &str = "General";

/// The recognized record statuses.
///
/// Storage keeps the status as free text, so rows written by older
/// versions (or by hand) may carry values outside this enum; such rows
/// are counted in totals but not in the per-status breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordStatus {
    Active,
    Inactive,
    Completed,
}

impl RecordStatus {
    pub const ALL: [RecordStatus; 3] = [RecordStatus::Active, RecordStatus::Inactive, RecordStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "Active",
            RecordStatus::Inactive => "Inactive",
            RecordStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: Option<i64>,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    /// Set once at insert; never modified by updates.
    pub created_at: Option<NaiveDateTime>,
}

impl Record {
    pub fn new(user_id: i64, title: &str, description: &str, category: &str) -> Self {
        let category = if category.trim().is_empty() { DEFAULT_CATEGORY } else { category };
        Record {
            id: None,
            user_id,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            status: RecordStatus::Active.as_str().to_string(),
            created_at: None,
        }
    }
}

/// Predicates understood by [`crate::db::records::Records::count`].
#[derive(Debug, Clone)]
pub enum RecordFilter {
    All,
    Status(RecordStatus),
    CreatedSince(NaiveDateTime),
}

/// Sort direction for record samples, by creation time.
#[derive(Debug, Clone, Copy)]
pub enum SortOrder {
    Newest,
    Oldest,
}
