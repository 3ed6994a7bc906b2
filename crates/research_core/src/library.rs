//! Process-level wiring of one slot store into the library services.
//!
//! # Invariants
//! - Document and credential repositories share the same injected store.
//! - Nothing here touches ambient globals; tests build one per case.

use crate::config::LibraryConfig;
use crate::repo::credential_repo::SlotCredentialRepository;
use crate::repo::research_repo::SlotResearchRepository;
use crate::service::auth_service::AuthService;
use crate::service::backup_service::BackupService;
use crate::service::library_service::LibraryService;
use crate::slot::SlotStore;

/// Services bound to one persistence medium.
pub struct ResearchLibrary<'s, S: SlotStore> {
    library: LibraryService<SlotResearchRepository<&'s S>>,
    backup: BackupService<SlotResearchRepository<&'s S>>,
    auth: AuthService<SlotCredentialRepository<&'s S>>,
}

impl<'s, S: SlotStore> ResearchLibrary<'s, S> {
    pub fn new(store: &'s S, config: &LibraryConfig) -> Self {
        Self {
            library: LibraryService::from_config(
                SlotResearchRepository::from_config(store, config),
                config,
            ),
            backup: BackupService::from_config(
                SlotResearchRepository::from_config(store, config),
                config,
            ),
            auth: AuthService::new(SlotCredentialRepository::from_config(store, config)),
        }
    }

    /// Publish/edit/read/delete flows.
    pub fn library(&self) -> &LibraryService<SlotResearchRepository<&'s S>> {
        &self.library
    }

    /// Export/restore.
    pub fn backup(&self) -> &BackupService<SlotResearchRepository<&'s S>> {
        &self.backup
    }

    /// Owner login and password change.
    pub fn auth(&self) -> &AuthService<SlotCredentialRepository<&'s S>> {
        &self.auth
    }
}
