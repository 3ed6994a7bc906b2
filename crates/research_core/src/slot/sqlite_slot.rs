//! SQLite-backed slots on the `slots` table.

use super::{SlotResult, SlotStore};
use rusqlite::{params, Connection, OptionalExtension};

/// Slot store over a migrated connection from [`crate::db::open_db`].
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
