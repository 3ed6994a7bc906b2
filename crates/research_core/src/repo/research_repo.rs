//! Document collection repository.
//!
//! # Responsibility
//! - Provide list/create/update/increment/delete over the collection slot.
//! - Seed an empty slot and degrade gracefully on unreadable data.
//! - Expose the raw blob for the backup codec.
//!
//! # Invariants
//! - Ids are unique within the persisted collection written by this type.
//! - `create` always stores `views = 0` and prepends (newest first).
//! - `increment_views` is the only path that raises a counter, by exactly 1.

use crate::config::LibraryConfig;
use crate::model::document::ResearchItem;
use crate::seed::seed_documents;
use crate::slot::{SlotError, SlotStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for collection and credential slots.
#[derive(Debug)]
pub enum RepoError {
    Slot(SlotError),
    Encode(serde_json::Error),
    /// `create` was handed an id that is already present.
    DuplicateId(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slot(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::DuplicateId(id) => write!(f, "document id already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Slot(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<SlotError> for RepoError {
    fn from(value: SlotError) -> Self {
        Self::Slot(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Where the items returned by [`ResearchRepository::load`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Slot was empty; the seed set was written and returned.
    Seeded,
    /// Slot parsed successfully.
    Loaded,
    /// Slot could not be parsed; the seed set was returned and the slot left as is.
    CorruptFallback,
}

/// Collection snapshot plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCollection {
    pub items: Vec<ResearchItem>,
    pub status: LoadStatus,
}

/// Repository interface for the document collection.
pub trait ResearchRepository {
    /// Reads the collection, seeding an empty slot.
    fn load(&self) -> RepoResult<LoadedCollection>;
    /// Prepends `item` with a zeroed counter.
    fn create(&self, item: ResearchItem) -> RepoResult<Vec<ResearchItem>>;
    /// Replaces the item with the same id in place, counter included.
    fn update(&self, item: ResearchItem) -> RepoResult<Vec<ResearchItem>>;
    /// Adds one read to the item with `id`.
    fn increment_views(&self, id: &str) -> RepoResult<Vec<ResearchItem>>;
    /// Removes the item with `id`.
    fn delete(&self, id: &str) -> RepoResult<Vec<ResearchItem>>;
    /// Current persisted blob, or the encoded seed set when nothing is stored.
    fn raw_snapshot(&self) -> RepoResult<String>;
    /// Overwrites the collection slot with `blob` verbatim.
    fn replace_raw(&self, blob: &str) -> RepoResult<()>;

    /// Reads the collection in storage order.
    fn list_all(&self) -> RepoResult<Vec<ResearchItem>> {
        Ok(self.load()?.items)
    }

    /// Looks up one item by id.
    fn get(&self, id: &str) -> RepoResult<Option<ResearchItem>> {
        Ok(self.list_all()?.into_iter().find(|item| item.id == id))
    }
}

/// Collection repository over any [`SlotStore`].
pub struct SlotResearchRepository<S: SlotStore> {
    store: S,
    key: String,
    owner_name: String,
}

impl<S: SlotStore> SlotResearchRepository<S> {
    pub fn new(store: S, key: impl Into<String>, owner_name: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            owner_name: owner_name.into(),
        }
    }

    /// Builds a repository using slot key and owner name from `config`.
    pub fn from_config(store: S, config: &LibraryConfig) -> Self {
        Self::new(store, config.slots.collection.clone(), config.owner_name.clone())
    }

    fn persist(&self, items: &[ResearchItem]) -> RepoResult<()> {
        let blob = serde_json::to_string(items)?;
        self.store.write_slot(&self.key, &blob)?;
        Ok(())
    }

    fn stored_blob(&self) -> RepoResult<Option<String>> {
        // An empty value is indistinguishable from "never written".
        Ok(self
            .store
            .read_slot(&self.key)?
            .filter(|blob| !blob.is_empty()))
    }
}

impl<S: SlotStore> ResearchRepository for SlotResearchRepository<S> {
    fn load(&self) -> RepoResult<LoadedCollection> {
        let Some(blob) = self.stored_blob()? else {
            let items = seed_documents(&self.owner_name);
            self.persist(&items)?;
            info!(
                "event=collection_seed module=repo status=ok slot={} count={}",
                self.key,
                items.len()
            );
            return Ok(LoadedCollection {
                items,
                status: LoadStatus::Seeded,
            });
        };

        match serde_json::from_str::<Vec<ResearchItem>>(&blob) {
            Ok(items) => Ok(LoadedCollection {
                items,
                status: LoadStatus::Loaded,
            }),
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=degraded slot={} bytes={} line={} column={} error_code=collection_corrupt",
                    self.key,
                    blob.len(),
                    err.line(),
                    err.column()
                );
                Ok(LoadedCollection {
                    items: seed_documents(&self.owner_name),
                    status: LoadStatus::CorruptFallback,
                })
            }
        }
    }

    fn create(&self, item: ResearchItem) -> RepoResult<Vec<ResearchItem>> {
        let current = self.list_all()?;
        if current.iter().any(|existing| existing.id == item.id) {
            return Err(RepoError::DuplicateId(item.id));
        }

        let id = item.id.clone();
        let mut updated = Vec::with_capacity(current.len() + 1);
        updated.push(ResearchItem { views: 0, ..item });
        updated.extend(current);
        self.persist(&updated)?;
        info!(
            "event=document_create module=repo status=ok id={} count={}",
            id,
            updated.len()
        );
        Ok(updated)
    }

    fn update(&self, item: ResearchItem) -> RepoResult<Vec<ResearchItem>> {
        let mut current = self.list_all()?;
        let Some(index) = current.iter().position(|existing| existing.id == item.id) else {
            info!(
                "event=document_update module=repo status=skipped id={} reason=not_found",
                item.id
            );
            return Ok(current);
        };

        current[index] = item;
        self.persist(&current)?;
        Ok(current)
    }

    fn increment_views(&self, id: &str) -> RepoResult<Vec<ResearchItem>> {
        let mut current = self.list_all()?;
        let Some(index) = current.iter().position(|existing| existing.id == id) else {
            return Ok(current);
        };

        current[index].views = current[index].views.saturating_add(1);
        self.persist(&current)?;
        Ok(current)
    }

    fn delete(&self, id: &str) -> RepoResult<Vec<ResearchItem>> {
        let mut current = self.list_all()?;
        let before = current.len();
        current.retain(|item| item.id != id);
        self.persist(&current)?;
        info!(
            "event=document_delete module=repo status=ok id={} removed={}",
            id,
            before - current.len()
        );
        Ok(current)
    }

    fn raw_snapshot(&self) -> RepoResult<String> {
        match self.stored_blob()? {
            Some(blob) => Ok(blob),
            None => Ok(serde_json::to_string(&seed_documents(&self.owner_name))?),
        }
    }

    fn replace_raw(&self, blob: &str) -> RepoResult<()> {
        self.store.write_slot(&self.key, blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadStatus, ResearchRepository, SlotResearchRepository};
    use crate::slot::{MemorySlotStore, SlotStore};

    #[test]
    fn empty_string_slot_is_treated_as_first_run() {
        let store = MemorySlotStore::with_slot("docs", "");
        let repo = SlotResearchRepository::new(&store, "docs", "Owner");
        let loaded = repo.load().unwrap();
        assert_eq!(loaded.status, LoadStatus::Seeded);
        assert!(!store.read_slot("docs").unwrap().unwrap_or_default().is_empty());
    }

    #[test]
    fn list_of_malformed_objects_degrades_to_seed() {
        let store = MemorySlotStore::with_slot("docs", r#"[{"id":1}]"#);
        let repo = SlotResearchRepository::new(&store, "docs", "Owner");
        let loaded = repo.load().unwrap();
        assert_eq!(loaded.status, LoadStatus::CorruptFallback);
        assert_eq!(loaded.items.len(), 3);
        assert_eq!(
            store.read_slot("docs").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }
}
