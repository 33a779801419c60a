//! Record store: CRUD plus the narrow read interface the statistics
//! aggregator consumes (counts with predicates, category and day
//! group-counts, sorted-limited samples).
//!
//! All timestamps are stored as `YYYY-MM-DD HH:MM:SS` TEXT in UTC
//! (SQLite `CURRENT_TIMESTAMP`); range predicates compare bound strings
//! of the same shape so ordering stays lexicographic-safe.

use crate::db::db::Db;
use crate::libs::formatter::TIMESTAMP_FORMAT;
use crate::libs::messages::Message;
use crate::libs::record::{Record, RecordFilter, SortOrder};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;

const SCHEMA_RECORDS: &str = "CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    category TEXT,
    status TEXT DEFAULT 'Active',
    date_added TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const INSERT_RECORD: &str = "INSERT INTO records (user_id, title, description, category, status, date_added)
    VALUES (?1, ?2, ?3, ?4, ?5, COALESCE(?6, CURRENT_TIMESTAMP))";
// UPDATE never touches date_added; creation time is immutable.
const UPDATE_RECORD: &str = "UPDATE records SET title = ?2, description = ?3, category = ?4, status = ?5 WHERE id = ?1";
const DELETE_RECORD: &str = "DELETE FROM records WHERE id = ?1";
const SELECT_RECORDS: &str = "SELECT id, user_id, title, description, category, status, date_added FROM records";
const COUNT_RECORDS: &str = "SELECT COUNT(*) FROM records WHERE user_id = ?1";
const COUNT_BY_CATEGORY: &str = "SELECT category, COUNT(*) FROM records WHERE user_id = ?1 GROUP BY category";
const COUNT_BY_DAY: &str = "SELECT strftime('%Y-%m-%d', date_added) AS day, COUNT(*)
    FROM records WHERE user_id = ?1 AND date_added >= ?2 GROUP BY day ORDER BY day";
const SELECT_IDS: &str = "SELECT id FROM records WHERE user_id = ?1 ORDER BY id";
const SELECT_TITLE: &str = "SELECT title FROM records WHERE id = ?1";

pub struct Records {
    conn: Connection,
}

impl Records {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_RECORDS, [])?;
        Ok(Self { conn: db.conn })
    }

    /// Inserts a record. When `record.created_at` is set (tests, imports)
    /// that timestamp is stored verbatim, otherwise the database clock
    /// is used.
    pub fn insert(&mut self, record: &Record) -> Result<i64> {
        if record.title.trim().is_empty() {
            return Err(msg_error_anyhow!(Message::RecordTitleEmpty));
        }
        let created_at = record.created_at.map(|ts| ts.format(TIMESTAMP_FORMAT).to_string());
        self.conn.execute(
            INSERT_RECORD,
            params![record.user_id, record.title, record.description, record.category, record.status, created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Updates title, description, category, and status. The creation
    /// timestamp is immutable.
    pub fn update(&mut self, id: i64, title: &str, description: &str, category: &str, status: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(msg_error_anyhow!(Message::RecordTitleEmpty));
        }
        let affected = self.conn.execute(UPDATE_RECORD, params![id, title, description, category, status])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::RecordNotFound(id)));
        }
        Ok(())
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_RECORD, params![id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::RecordNotFound(id)));
        }
        Ok(())
    }

    pub fn get(&mut self, id: i64) -> Result<Option<Record>> {
        let record = self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_RECORDS), params![id], Self::map_row)
            .optional()?;
        Ok(record)
    }

    /// All records for an owner, newest first.
    pub fn fetch(&mut self, user_id: i64) -> Result<Vec<Record>> {
        let sql = format!("{} WHERE user_id = ?1 ORDER BY date_added DESC, id DESC", SELECT_RECORDS);
        let mut stmt = self.conn.prepare(&sql)?;
        let iter = stmt.query_map(params![user_id], Self::map_row)?;
        let mut records = Vec::new();
        for record in iter {
            records.push(record?);
        }
        Ok(records)
    }

    /// Case-insensitive substring search over title and description.
    pub fn search(&mut self, user_id: i64, term: &str) -> Result<Vec<Record>> {
        let sql = format!(
            "{} WHERE user_id = ?1 AND (title LIKE ?2 OR description LIKE ?2) ORDER BY date_added DESC, id DESC",
            SELECT_RECORDS
        );
        let pattern = format!("%{}%", term);
        let mut stmt = self.conn.prepare(&sql)?;
        let iter = stmt.query_map(params![user_id, pattern], Self::map_row)?;
        let mut records = Vec::new();
        for record in iter {
            records.push(record?);
        }
        Ok(records)
    }

    /// Counts an owner's records, optionally narrowed by a predicate.
    /// Zero matching rows is a normal result, never an error.
    pub fn count(&mut self, user_id: i64, filter: RecordFilter) -> Result<i64> {
        let count = match filter {
            RecordFilter::All => self.conn.query_row(COUNT_RECORDS, params![user_id], |row| row.get(0))?,
            RecordFilter::Status(status) => self.conn.query_row(
                &format!("{} AND status = ?2", COUNT_RECORDS),
                params![user_id, status.as_str()],
                |row| row.get(0),
            )?,
            RecordFilter::CreatedSince(threshold) => self.conn.query_row(
                &format!("{} AND date_added >= ?2", COUNT_RECORDS),
                params![user_id, threshold.format(TIMESTAMP_FORMAT).to_string()],
                |row| row.get(0),
            )?,
        };
        Ok(count)
    }

    /// Category → record count for one owner.
    pub fn count_by_category(&mut self, user_id: i64) -> Result<BTreeMap<String, i64>> {
        let mut stmt = self.conn.prepare(COUNT_BY_CATEGORY)?;
        let iter = stmt.query_map(params![user_id], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
        let mut by_category = BTreeMap::new();
        for entry in iter {
            let (category, count) = entry?;
            by_category.insert(category, count);
        }
        Ok(by_category)
    }

    /// Calendar day (`YYYY-MM-DD`) → record count for records created at
    /// or after `since`. Days with no records are absent.
    pub fn count_by_day(&mut self, user_id: i64, since: NaiveDateTime) -> Result<BTreeMap<String, i64>> {
        let mut stmt = self.conn.prepare(COUNT_BY_DAY)?;
        let since = since.format(TIMESTAMP_FORMAT).to_string();
        let iter = stmt.query_map(params![user_id, since], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
        let mut by_day = BTreeMap::new();
        for entry in iter {
            let (day, count) = entry?;
            by_day.insert(day, count);
        }
        Ok(by_day)
    }

    /// Up to `limit` records ordered by creation time; ties are broken
    /// by id so repeated calls return the same sample.
    pub fn fetch_recent(&mut self, user_id: i64, limit: i64, order: SortOrder) -> Result<Vec<Record>> {
        let sql = match order {
            SortOrder::Newest => format!("{} WHERE user_id = ?1 ORDER BY date_added DESC, id DESC LIMIT ?2", SELECT_RECORDS),
            SortOrder::Oldest => format!("{} WHERE user_id = ?1 ORDER BY date_added ASC, id ASC LIMIT ?2", SELECT_RECORDS),
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let iter = stmt.query_map(params![user_id, limit], Self::map_row)?;
        let mut records = Vec::new();
        for record in iter {
            records.push(record?);
        }
        Ok(records)
    }

    /// Ids of every record owned by `user_id`.
    pub fn fetch_ids(&mut self, user_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(SELECT_IDS)?;
        let iter = stmt.query_map(params![user_id], |row| row.get::<_, i64>(0))?;
        let mut ids = Vec::new();
        for id in iter {
            ids.push(id?);
        }
        Ok(ids)
    }

    /// Title lookup tolerating deleted records.
    pub fn fetch_title(&mut self, record_id: i64) -> Result<Option<String>> {
        let title = self
            .conn
            .query_row(SELECT_TITLE, params![record_id], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(title)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
        Ok(Record {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            category: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            status: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            created_at: row.get(6)?,
        })
    }
}
