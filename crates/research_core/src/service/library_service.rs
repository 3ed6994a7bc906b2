//! Publishing and reading use cases.
//!
//! # Responsibility
//! - Turn publish/edit form input into documents (id, defaults, checks).
//! - Record reads and hand back the item the reader should display.
//!
//! # Invariants
//! - Published documents get a fresh UUID and start at zero views.
//! - Edits keep the id and the stored view count.

use crate::config::LibraryConfig;
use crate::model::document::{is_valid_date, ResearchDraft, ResearchItem};
use crate::repo::research_repo::{LoadedCollection, RepoError, RepoResult, ResearchRepository};
use chrono::Local;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for publish/edit flows.
#[derive(Debug)]
pub enum LibraryServiceError {
    MissingTitle,
    MissingContent,
    /// Date was supplied but is not a real `YYYY-MM-DD` date.
    InvalidDate(String),
    Repo(RepoError),
}

impl Display for LibraryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "title is required"),
            Self::MissingContent => write!(f, "content is required"),
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LibraryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for LibraryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Collection after a mutation, plus the affected item when it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemChange {
    pub item: Option<ResearchItem>,
    pub items: Vec<ResearchItem>,
}

impl ItemChange {
    fn locate(id: &str, items: Vec<ResearchItem>) -> Self {
        let item = items.iter().find(|candidate| candidate.id == id).cloned();
        Self { item, items }
    }
}

/// Library facade over a collection repository.
pub struct LibraryService<R: ResearchRepository> {
    repo: R,
    owner_name: String,
}

impl<R: ResearchRepository> LibraryService<R> {
    pub fn new(repo: R, owner_name: impl Into<String>) -> Self {
        Self {
            repo,
            owner_name: owner_name.into(),
        }
    }

    pub fn from_config(repo: R, config: &LibraryConfig) -> Self {
        Self::new(repo, config.owner_name.clone())
    }

    /// Current collection, newest first.
    pub fn list(&self) -> RepoResult<Vec<ResearchItem>> {
        self.repo.list_all()
    }

    /// Current collection with its load status.
    pub fn load(&self) -> RepoResult<LoadedCollection> {
        self.repo.load()
    }

    /// Publishes a new document at the front of the collection.
    ///
    /// Empty `authors` falls back to the owner name; empty `date` to today.
    pub fn publish(&self, draft: ResearchDraft) -> Result<ItemChange, LibraryServiceError> {
        let draft = self.normalize(draft)?;
        let id = Uuid::new_v4().to_string();
        let items = self.repo.create(ResearchItem::from_draft(id.clone(), draft))?;
        Ok(ItemChange::locate(&id, items))
    }

    /// Replaces the editable fields of `id`.
    ///
    /// Unknown ids leave the collection unchanged and skip draft checks.
    pub fn edit(&self, id: &str, draft: ResearchDraft) -> Result<ItemChange, LibraryServiceError> {
        let mut items = self.repo.list_all()?;
        let Some(index) = items.iter().position(|candidate| candidate.id == id) else {
            return Ok(ItemChange { item: None, items });
        };

        let draft = self.normalize(draft)?;
        let mut item = items.swap_remove(index);
        item.apply_draft(draft);
        let items = self.repo.update(item)?;
        Ok(ItemChange::locate(id, items))
    }

    /// Records one read of `id` and returns the item to display.
    pub fn open(&self, id: &str) -> RepoResult<ItemChange> {
        let items = self.repo.increment_views(id)?;
        Ok(ItemChange::locate(id, items))
    }

    /// Deletes `id` immediately.
    pub fn remove(&self, id: &str) -> RepoResult<Vec<ResearchItem>> {
        self.repo.delete(id)
    }

    fn normalize(&self, mut draft: ResearchDraft) -> Result<ResearchDraft, LibraryServiceError> {
        if draft.title.trim().is_empty() {
            return Err(LibraryServiceError::MissingTitle);
        }
        if draft.content.trim().is_empty() {
            return Err(LibraryServiceError::MissingContent);
        }
        if draft.authors.trim().is_empty() {
            draft.authors = self.owner_name.clone();
        }
        if draft.date.trim().is_empty() {
            draft.date = today();
        } else if !is_valid_date(draft.date.trim()) {
            return Err(LibraryServiceError::InvalidDate(draft.date));
        } else {
            draft.date = draft.date.trim().to_string();
        }
        Ok(draft)
    }
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
