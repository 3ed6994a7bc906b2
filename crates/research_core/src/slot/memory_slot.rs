//! In-memory slots for tests and ephemeral sessions.

use super::{SlotError, SlotResult, SlotStore};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Map-backed slot store. Not shared across threads.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one slot already populated.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.slots.borrow_mut().insert(key.into(), value.into());
        store
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        let slots = self
            .slots
            .try_borrow()
            .map_err(|_| SlotError::Busy)?;
        Ok(slots.get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> SlotResult<()> {
        let mut slots = self
            .slots
            .try_borrow_mut()
            .map_err(|_| SlotError::Busy)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
