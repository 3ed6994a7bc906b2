//! Owner credential repository.
//!
//! # Invariants
//! - Reads never write: the default password is not materialized.
//! - Writes are unconditional; policy checks belong to callers.

use crate::config::LibraryConfig;
use crate::repo::research_repo::RepoResult;
use crate::slot::SlotStore;
use log::info;

/// Repository interface for the single owner password.
pub trait CredentialRepository {
    /// Stored password, or the configured default when none is stored.
    fn get_password(&self) -> RepoResult<String>;
    /// Overwrites the stored password.
    fn set_password(&self, new_value: &str) -> RepoResult<()>;
}

/// Credential repository over any [`SlotStore`].
pub struct SlotCredentialRepository<S: SlotStore> {
    store: S,
    key: String,
    default_password: String,
}

impl<S: SlotStore> SlotCredentialRepository<S> {
    pub fn new(store: S, key: impl Into<String>, default_password: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            default_password: default_password.into(),
        }
    }

    pub fn from_config(store: S, config: &LibraryConfig) -> Self {
        Self::new(
            store,
            config.slots.credential.clone(),
            config.default_password.clone(),
        )
    }
}

impl<S: SlotStore> CredentialRepository for SlotCredentialRepository<S> {
    fn get_password(&self) -> RepoResult<String> {
        Ok(self
            .store
            .read_slot(&self.key)?
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.default_password.clone()))
    }

    fn set_password(&self, new_value: &str) -> RepoResult<()> {
        self.store.write_slot(&self.key, new_value)?;
        info!("event=credential_update module=repo status=ok slot={}", self.key);
        Ok(())
    }
}
