//! Saved input model
//!
//! Keeps the last used `UserData` under a fixed key in the key-value table.
//! Last write wins.

use rusqlite::{params, Connection};
use serde::Serialize;

use crate::db::DbResult;
use super::user_data::UserData;

/// Fixed key the last input is stored under
pub const STORAGE_KEY: &str = "promillemeter_user_data";

/// The stored input with its save time
#[derive(Debug, Clone, Serialize)]
pub struct SavedInput {
    pub user_data: UserData,
    pub updated_at: String,
}

impl SavedInput {
    /// Store `data`, replacing whatever was saved before
    pub fn save(conn: &Connection, data: &UserData) -> DbResult<()> {
        let value = serde_json::to_string(data)?;
        conn.execute(
            r#"
            INSERT INTO kv_store (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![STORAGE_KEY, value],
        )?;
        tracing::debug!(drinks = data.drinks.len(), "saved user input");
        Ok(())
    }

    /// Load the last saved input, if any
    pub fn load(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT value, updated_at FROM kv_store WHERE key = ?1")?;

        let result = stmt.query_row([STORAGE_KEY], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        });
        match result {
            Ok((value, updated_at)) => Ok(Some(Self {
                user_data: serde_json::from_str(&value)?,
                updated_at,
            })),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the saved input. Returns true if something was removed.
    pub fn clear(conn: &Connection) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM kv_store WHERE key = ?1", [STORAGE_KEY])?;
        Ok(rows > 0)
    }
}
