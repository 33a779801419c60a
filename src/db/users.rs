use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::user::User;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

const SCHEMA_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    full_name TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const INSERT_USER: &str = "INSERT INTO users (username, full_name) VALUES (?1, ?2)";
const SELECT_BY_USERNAME: &str = "SELECT id, username, full_name, created_at FROM users WHERE username = ?1";
const SELECT_BY_ID: &str = "SELECT id, username, full_name, created_at FROM users WHERE id = ?1";

pub struct Users {
    conn: Connection,
}

impl Users {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_USERS, [])?;
        Ok(Self { conn: db.conn })
    }

    /// Creates a user row; fails when the username is already taken.
    pub fn create(&mut self, user: &User) -> Result<i64> {
        self.conn
            .execute(INSERT_USER, params![user.username, user.full_name])
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(err, _) if err.code == rusqlite::ErrorCode::ConstraintViolation => {
                    msg_error_anyhow!(Message::UsernameTaken(user.username.clone()))
                }
                other => other.into(),
            })?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_by_username(&mut self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(SELECT_BY_USERNAME, params![username], Self::map_row)
            .optional()?;
        Ok(user)
    }

    pub fn get(&mut self, id: i64) -> Result<Option<User>> {
        let user = self.conn.query_row(SELECT_BY_ID, params![id], Self::map_row).optional()?;
        Ok(user)
    }

    /// Returns the existing user for `username`, creating it when absent.
    pub fn get_or_create(&mut self, username: &str, full_name: &str) -> Result<User> {
        if let Some(user) = self.get_by_username(username)? {
            return Ok(user);
        }
        let id = self.create(&User::new(username, full_name))?;
        self.get(id)?.ok_or_else(|| msg_error_anyhow!(Message::UserNotFound(username.to_string())))
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            full_name: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}
