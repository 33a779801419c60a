//! Consolidated per-user statistics.
//!
//! This module is the single home of the summary computation that the
//! report view, the terminal tables, and every exporter consume. One
//! `StatsAggregator::compute_summary` call turns the current record and
//! comment store state into a [`StatisticsSummary`] value; nothing else
//! in the crate aggregates on its own.
//!
//! ## Time semantics
//!
//! `now` is injected by the caller rather than read from the clock, so
//! the computation is deterministic and testable. All stored timestamps
//! are UTC and production callers pass `Utc::now().naive_utc()`; one
//! timezone, applied uniformly. Window starts:
//!
//! - today: midnight of `now`'s date
//! - week: the most recent Monday at midnight (Monday = weekday 0)
//! - month: the first of `now`'s month at midnight
//!
//! Each window is counted independently. Early in a month the week
//! window can start before the month window, so the three counts are
//! only guaranteed monotonic when the windows actually nest.
//!
//! ## Failure policy
//!
//! Any failed store read aborts the whole computation with
//! [`StatsError::StoreUnavailable`]. A summary is never partially
//! populated; an `Ok` summary with all-zero counts means the owner
//! genuinely has no records.

use crate::db::comments::Comments;
use crate::db::records::Records;
use crate::libs::formatter::{format_date, format_timestamp, truncate_ellipsis};
use crate::libs::record::{Record, RecordFilter, RecordStatus, SortOrder};
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sample size for the recent/oldest record and comment lists.
const SAMPLE_LIMIT: i64 = 5;
/// Comment content is shortened to this many characters in samples.
const CONTENT_PREVIEW_LEN: usize = 50;
/// Title shown for comments whose record has been deleted.
const UNKNOWN_RECORD_TITLE: &str = "Unknown";

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// An underlying store read failed. The caller decides whether to
    /// show an empty state or surface the error; no partial summary
    /// exists either way.
    #[error("statistics store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<anyhow::Error> for StatsError {
    fn from(err: anyhow::Error) -> Self {
        StatsError::StoreUnavailable(err.to_string())
    }
}

/// Per-status record counts, each counted independently against the
/// store. Rows with a status outside the recognized set belong to none
/// of the three buckets, so the fields need not sum to the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBreakdown {
    pub active: i64,
    pub inactive: i64,
    pub completed: i64,
}

/// Records created today / this week / this month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub today: i64,
    pub this_week: i64,
    pub this_month: i64,
}

/// One record in the recent/oldest sample lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSample {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub status: String,
    pub date: String,
}

impl RecordSample {
    fn from_record(record: &Record) -> Self {
        RecordSample {
            id: record.id.unwrap_or(0),
            title: record.title.clone(),
            category: record.category.clone(),
            status: record.status.clone(),
            date: record.created_at.map(|ts| format_timestamp(&ts)).unwrap_or_default(),
        }
    }
}

/// One comment in the recent-comments sample, annotated with the title
/// of the record it targets and a shortened content preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentSample {
    pub id: i64,
    pub record_title: String,
    pub content: String,
    pub created_at: String,
}

/// `(record title, comment count)` pair for the most-commented list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCommented {
    pub record_title: String,
    pub comment_count: i64,
}

/// Comment cross-statistics for one owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentStats {
    /// Comments authored by the owner, on anyone's records.
    pub total_comments: i64,
    /// Comments on the owner's records, by any author (the owner's own
    /// comments on their own records included).
    pub comments_on_my_records: i64,
    pub recent_comments: Vec<CommentSample>,
    /// Count descending, at most five entries, zero counts excluded.
    pub top_commented_records: Vec<TopCommented>,
}

/// The full analytics summary for one owner at one instant.
///
/// Computed fresh on every request and never persisted; a pure function
/// of store state and the injected `now`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub total: i64,
    pub status_breakdown: StatusBreakdown,
    /// Records invisible to the status breakdown because their stored
    /// status is not a recognized value. Surfaced as a warning instead
    /// of being folded into any bucket.
    pub unclassified_status: i64,
    pub by_category: BTreeMap<String, i64>,
    pub time_stats: TimeStats,
    /// Trailing-30-days activity histogram, `YYYY-MM-DD` → count,
    /// zero days omitted, ascending by date.
    pub recent_activity: BTreeMap<String, i64>,
    pub recent_records: Vec<RecordSample>,
    pub oldest_records: Vec<RecordSample>,
    pub first_record_date: Option<String>,
    pub last_record_date: Option<String>,
    pub comments: CommentStats,
    pub generated_at: String,
}

/// Computes [`StatisticsSummary`] values from injected store handles.
///
/// The handles are passed in at construction; the aggregator never
/// opens connections of its own and holds no state between calls.
pub struct StatsAggregator {
    records: Records,
    comments: Comments,
}

impl StatsAggregator {
    pub fn new(records: Records, comments: Comments) -> Self {
        Self { records, comments }
    }

    /// Produces the summary for `owner_id` as of `now`.
    ///
    /// An owner without records yields an all-zero summary, not an
    /// error; owner existence is the caller's concern. Identical store
    /// state and `now` produce identical summaries.
    pub fn compute_summary(&mut self, owner_id: i64, now: NaiveDateTime) -> Result<StatisticsSummary, StatsError> {
        let total = self.records.count(owner_id, RecordFilter::All)?;

        let status_breakdown = StatusBreakdown {
            active: self.records.count(owner_id, RecordFilter::Status(RecordStatus::Active))?,
            inactive: self.records.count(owner_id, RecordFilter::Status(RecordStatus::Inactive))?,
            completed: self.records.count(owner_id, RecordFilter::Status(RecordStatus::Completed))?,
        };
        let classified = status_breakdown.active + status_breakdown.inactive + status_breakdown.completed;
        let unclassified_status = (total - classified).max(0);

        let by_category = self.records.count_by_category(owner_id)?;

        let today_start = now.date().and_time(NaiveTime::MIN);
        let week_start = today_start - Duration::days(now.weekday().num_days_from_monday() as i64);
        let month_start = now.date().with_day(1).unwrap_or_else(|| now.date()).and_time(NaiveTime::MIN);
        let time_stats = TimeStats {
            today: self.records.count(owner_id, RecordFilter::CreatedSince(today_start))?,
            this_week: self.records.count(owner_id, RecordFilter::CreatedSince(week_start))?,
            this_month: self.records.count(owner_id, RecordFilter::CreatedSince(month_start))?,
        };

        let recent_activity = self.records.count_by_day(owner_id, now - Duration::days(30))?;

        let recent = self.records.fetch_recent(owner_id, SAMPLE_LIMIT, SortOrder::Newest)?;
        let oldest = self.records.fetch_recent(owner_id, SAMPLE_LIMIT, SortOrder::Oldest)?;
        let first_record_date = oldest.first().and_then(|r| r.created_at).map(|ts| format_date(&ts.date()));
        let last_record_date = recent.first().and_then(|r| r.created_at).map(|ts| format_date(&ts.date()));
        let recent_records: Vec<RecordSample> = recent.iter().map(RecordSample::from_record).collect();
        let oldest_records: Vec<RecordSample> = oldest.iter().map(RecordSample::from_record).collect();

        let comments = self.compute_comment_stats(owner_id)?;

        Ok(StatisticsSummary {
            total,
            status_breakdown,
            unclassified_status,
            by_category,
            time_stats,
            recent_activity,
            recent_records,
            oldest_records,
            first_record_date,
            last_record_date,
            comments,
            generated_at: format_timestamp(&now),
        })
    }

    fn compute_comment_stats(&mut self, owner_id: i64) -> Result<CommentStats, StatsError> {
        let total_comments = self.comments.count_by_author(owner_id)?;

        let owned_ids = self.records.fetch_ids(owner_id)?;
        let comments_on_my_records = self.comments.count_for_records(&owned_ids)?;

        let mut recent_comments = Vec::new();
        for comment in self.comments.fetch_recent_by_author(owner_id, SAMPLE_LIMIT)? {
            let record_title = self
                .records
                .fetch_title(comment.record_id)?
                .unwrap_or_else(|| UNKNOWN_RECORD_TITLE.to_string());
            recent_comments.push(CommentSample {
                id: comment.id.unwrap_or(0),
                record_title,
                content: truncate_ellipsis(&comment.content, CONTENT_PREVIEW_LEN),
                created_at: comment.created_at.map(|ts| format_timestamp(&ts)).unwrap_or_default(),
            });
        }

        let mut top_commented_records = Vec::new();
        for (record_id, comment_count) in self.comments.top_commented(&owned_ids, SAMPLE_LIMIT)? {
            // A record deleted between the group-count and the title
            // lookup simply drops out of the list.
            if let Some(record_title) = self.records.fetch_title(record_id)? {
                top_commented_records.push(TopCommented { record_title, comment_count });
            }
        }

        Ok(CommentStats {
            total_comments,
            comments_on_my_records,
            recent_comments,
            top_commented_records,
        })
    }
}
