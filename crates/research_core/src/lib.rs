//! Core of the research library: documents, owner credential and backups
//! persisted in named key-value slots.
//! This crate is the single source of truth for the library's invariants.

pub mod config;
pub mod db;
pub mod library;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod slot;

pub use config::{ConfigError, LibraryConfig, LogSettings, RestoreMode, SlotKeys};
pub use library::ResearchLibrary;
pub use logging::{default_log_level, init_from_settings, init_logging, logging_status};
pub use model::document::{paragraphs, preview_text, ResearchDraft, ResearchItem};
pub use repo::credential_repo::{CredentialRepository, SlotCredentialRepository};
pub use repo::research_repo::{
    LoadStatus, LoadedCollection, RepoError, RepoResult, ResearchRepository,
    SlotResearchRepository,
};
pub use seed::seed_documents;
pub use service::auth_service::{AuthService, PasswordChange, PasswordChangeError};
pub use service::backup_service::{BackupError, BackupService, RestoreRejection};
pub use service::library_service::{ItemChange, LibraryService, LibraryServiceError};
pub use slot::{MemorySlotStore, SlotError, SlotStore, SqliteSlotStore};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
