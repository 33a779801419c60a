//! Comment store: CRUD with ownership checks plus the read interface
//! the statistics aggregator consumes (author counts, per-record
//! group-counts, recent samples).
//!
//! There is no foreign key to `records` and no cascade; a comment may
//! outlive its record, and every reader must tolerate that.

use crate::db::db::Db;
use crate::libs::comment::Comment;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

const SCHEMA_COMMENTS: &str = "CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY,
    record_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    content TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const INSERT_COMMENT: &str = "INSERT INTO comments (record_id, user_id, content, created_at, updated_at)
    VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)";
const UPDATE_COMMENT: &str = "UPDATE comments SET content = ?2, updated_at = CURRENT_TIMESTAMP WHERE id = ?1";
const DELETE_COMMENT: &str = "DELETE FROM comments WHERE id = ?1";
const SELECT_COMMENTS: &str = "SELECT id, record_id, user_id, content, created_at, updated_at FROM comments";
const COUNT_BY_AUTHOR: &str = "SELECT COUNT(*) FROM comments WHERE user_id = ?1";

pub struct Comments {
    conn: Connection,
}

impl Comments {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_COMMENTS, [])?;
        Ok(Self { conn: db.conn })
    }

    pub fn insert(&mut self, comment: &Comment) -> Result<i64> {
        if comment.content.trim().is_empty() {
            return Err(msg_error_anyhow!(Message::CommentContentEmpty));
        }
        self.conn
            .execute(INSERT_COMMENT, params![comment.record_id, comment.user_id, comment.content])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Updates comment content; only the author may edit. Refreshes
    /// `updated_at`, leaving `created_at` untouched.
    pub fn update(&mut self, id: i64, user_id: i64, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(msg_error_anyhow!(Message::CommentContentEmpty));
        }
        let comment = self.get(id)?.ok_or_else(|| msg_error_anyhow!(Message::CommentNotFound(id)))?;
        if comment.user_id != user_id {
            return Err(msg_error_anyhow!(Message::CommentNotOwned));
        }
        self.conn.execute(UPDATE_COMMENT, params![id, content])?;
        Ok(())
    }

    /// Deletes a comment; only the author may delete.
    pub fn delete(&mut self, id: i64, user_id: i64) -> Result<()> {
        let comment = self.get(id)?.ok_or_else(|| msg_error_anyhow!(Message::CommentNotFound(id)))?;
        if comment.user_id != user_id {
            return Err(msg_error_anyhow!(Message::CommentNotOwned));
        }
        self.conn.execute(DELETE_COMMENT, params![id])?;
        Ok(())
    }

    pub fn get(&mut self, id: i64) -> Result<Option<Comment>> {
        let comment = self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_COMMENTS), params![id], Self::map_row)
            .optional()?;
        Ok(comment)
    }

    /// All comments on one record, newest first.
    pub fn fetch_by_record(&mut self, record_id: i64) -> Result<Vec<Comment>> {
        let sql = format!("{} WHERE record_id = ?1 ORDER BY created_at DESC, id DESC", SELECT_COMMENTS);
        let mut stmt = self.conn.prepare(&sql)?;
        let iter = stmt.query_map(params![record_id], Self::map_row)?;
        let mut comments = Vec::new();
        for comment in iter {
            comments.push(comment?);
        }
        Ok(comments)
    }

    /// Number of comments authored by `user_id`, on anyone's records.
    pub fn count_by_author(&mut self, user_id: i64) -> Result<i64> {
        let count = self.conn.query_row(COUNT_BY_AUTHOR, params![user_id], |row| row.get(0))?;
        Ok(count)
    }

    /// Number of comments targeting any of `record_ids`, regardless of
    /// author. An empty id set short-circuits to zero.
    pub fn count_for_records(&mut self, record_ids: &[i64]) -> Result<i64> {
        if record_ids.is_empty() {
            return Ok(0);
        }
        let sql = format!(
            "SELECT COUNT(*) FROM comments WHERE record_id IN ({})",
            vec!["?"; record_ids.len()].join(", ")
        );
        let count = self.conn.query_row(&sql, params_from_iter(record_ids.iter()), |row| row.get(0))?;
        Ok(count)
    }

    /// `(record_id, comment_count)` pairs for the most-commented of
    /// `record_ids`, count descending, at most `limit` rows. Records
    /// without comments never appear.
    pub fn top_commented(&mut self, record_ids: &[i64], limit: i64) -> Result<Vec<(i64, i64)>> {
        if record_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT record_id, COUNT(*) AS cnt FROM comments WHERE record_id IN ({})
             GROUP BY record_id ORDER BY cnt DESC, record_id ASC LIMIT ?",
            vec!["?"; record_ids.len()].join(", ")
        );
        let mut bound: Vec<i64> = record_ids.to_vec();
        bound.push(limit);
        let mut stmt = self.conn.prepare(&sql)?;
        let iter = stmt.query_map(params_from_iter(bound.iter()), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;
        let mut pairs = Vec::new();
        for pair in iter {
            pairs.push(pair?);
        }
        Ok(pairs)
    }

    /// Up to `limit` comments authored by `user_id`, newest first.
    pub fn fetch_recent_by_author(&mut self, user_id: i64, limit: i64) -> Result<Vec<Comment>> {
        let sql = format!("{} WHERE user_id = ?1 ORDER BY created_at DESC, id DESC LIMIT ?2", SELECT_COMMENTS);
        let mut stmt = self.conn.prepare(&sql)?;
        let iter = stmt.query_map(params![user_id, limit], Self::map_row)?;
        let mut comments = Vec::new();
        for comment in iter {
            comments.push(comment?);
        }
        Ok(comments)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Comment> {
        Ok(Comment {
            id: row.get(0)?,
            record_id: row.get(1)?,
            user_id: row.get(2)?,
            content: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}
