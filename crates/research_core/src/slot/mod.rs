//! Persisted key-value slots.
//!
//! # Responsibility
//! - Abstract the durable medium behind two operations: read a slot, replace a slot.
//! - Keep backend details (SQLite, in-memory) out of the repository layer.
//!
//! # Invariants
//! - `write_slot` replaces the full value in one step; readers never see a
//!   partially written value.
//! - Reading an absent slot is `Ok(None)`, not an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_slot;
mod sqlite_slot;

pub use memory_slot::MemorySlotStore;
pub use sqlite_slot::SqliteSlotStore;

pub type SlotResult<T> = Result<T, SlotError>;

/// Failure of the underlying persistence medium.
#[derive(Debug)]
pub enum SlotError {
    Db(DbError),
    /// The in-memory map was borrowed re-entrantly.
    Busy,
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Busy => write!(f, "in-memory slot map is already borrowed"),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Busy => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// A named-slot persistence medium.
///
/// Both methods take `&self`: the store is single-writer by construction and
/// one handle is shared by the document and credential stores.
pub trait SlotStore {
    /// Returns the slot value, or `None` when nothing was ever written.
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>>;
    /// Replaces the slot value wholesale.
    fn write_slot(&self, key: &str, value: &str) -> SlotResult<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> SlotResult<()> {
        (**self).write_slot(key, value)
    }
}
