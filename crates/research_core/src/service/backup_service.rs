//! Backup export and restore.
//!
//! # Responsibility
//! - Export the collection slot verbatim.
//! - Validate a backup payload and swap it in as the new collection slot.
//!
//! # Invariants
//! - A rejected payload leaves the collection slot byte-for-byte unchanged.
//! - An accepted payload is written verbatim in a single slot write.

use crate::config::{LibraryConfig, RestoreMode};
use crate::model::document::{is_valid_date, ResearchItem, DOCUMENT_FIELDS};
use crate::repo::research_repo::{RepoError, RepoResult, ResearchRepository};
use chrono::NaiveDate;
use log::{info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Why a backup payload was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreRejection {
    /// Payload is not syntactically valid JSON.
    NotJson,
    /// Payload parsed but its top level is not a list.
    NotAList,
    /// Strict mode: element at `index` is not a well-formed document.
    InvalidElement { index: usize, reason: String },
    /// Strict mode: the same id appears twice.
    DuplicateId(String),
}

impl Display for RestoreRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotJson => write!(f, "backup is not valid JSON"),
            Self::NotAList => write!(f, "backup top level is not a list"),
            Self::InvalidElement { index, reason } => {
                write!(f, "backup element {index} is invalid: {reason}")
            }
            Self::DuplicateId(id) => write!(f, "backup contains duplicate id `{id}`"),
        }
    }
}

impl RestoreRejection {
    fn code(&self) -> &'static str {
        match self {
            Self::NotJson => "not_json",
            Self::NotAList => "not_a_list",
            Self::InvalidElement { .. } => "invalid_element",
            Self::DuplicateId(_) => "duplicate_id",
        }
    }
}

/// Error for file-level backup operations.
#[derive(Debug)]
pub enum BackupError {
    Repo(RepoError),
    Io(std::io::Error),
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "backup file I/O failed: {err}"),
        }
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<RepoError> for BackupError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<std::io::Error> for BackupError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Backup codec bound to one collection repository.
pub struct BackupService<R: ResearchRepository> {
    repo: R,
    mode: RestoreMode,
    prefix: String,
}

impl<R: ResearchRepository> BackupService<R> {
    pub fn new(repo: R, mode: RestoreMode, prefix: impl Into<String>) -> Self {
        Self {
            repo,
            mode,
            prefix: prefix.into(),
        }
    }

    pub fn from_config(repo: R, config: &LibraryConfig) -> Self {
        Self::new(repo, config.restore_mode, config.backup_prefix.clone())
    }

    /// Returns the exact persisted collection blob.
    pub fn export(&self) -> RepoResult<String> {
        self.repo.raw_snapshot()
    }

    /// Replaces the collection with `input` when it passes validation.
    ///
    /// Returns `Ok(false)` for a rejected payload; `Err` only for medium failures.
    pub fn restore(&self, input: &str) -> RepoResult<bool> {
        match self.try_restore(input) {
            Ok(()) => Ok(true),
            Err(RestoreOutcome::Rejected(_)) => Ok(false),
            Err(RestoreOutcome::Failed(err)) => Err(err),
        }
    }

    /// Like [`Self::restore`], but reports why a payload was refused.
    pub fn restore_checked(&self, input: &str) -> RepoResult<Result<(), RestoreRejection>> {
        match self.try_restore(input) {
            Ok(()) => Ok(Ok(())),
            Err(RestoreOutcome::Rejected(rejection)) => Ok(Err(rejection)),
            Err(RestoreOutcome::Failed(err)) => Err(err),
        }
    }

    /// Default backup file name for `date`, e.g. `imene_research_backup_2024-05-01.json`.
    pub fn backup_file_name(&self, date: NaiveDate) -> String {
        format!("{}_backup_{}.json", self.prefix, date.format("%Y-%m-%d"))
    }

    /// Writes the export into `dir` under [`Self::backup_file_name`].
    pub fn write_backup(
        &self,
        dir: impl AsRef<Path>,
        date: NaiveDate,
    ) -> Result<PathBuf, BackupError> {
        let path = dir.as_ref().join(self.backup_file_name(date));
        let blob = self.export()?;
        std::fs::write(&path, blob.as_bytes())?;
        info!(
            "event=backup_export module=service status=ok bytes={}",
            blob.len()
        );
        Ok(path)
    }

    /// Reads a backup file and restores it.
    pub fn restore_from_file(&self, path: impl AsRef<Path>) -> Result<bool, BackupError> {
        let input = std::fs::read_to_string(path)?;
        Ok(self.restore(&input)?)
    }

    fn try_restore(&self, input: &str) -> Result<(), RestoreOutcome> {
        if let Err(rejection) = check_payload(input, self.mode) {
            warn!(
                "event=backup_restore module=service status=rejected mode={:?} bytes={} error_code={}",
                self.mode,
                input.len(),
                rejection.code()
            );
            return Err(RestoreOutcome::Rejected(rejection));
        }

        self.repo.replace_raw(input).map_err(RestoreOutcome::Failed)?;
        info!(
            "event=backup_restore module=service status=ok mode={:?} bytes={}",
            self.mode,
            input.len()
        );
        Ok(())
    }
}

enum RestoreOutcome {
    Rejected(RestoreRejection),
    Failed(RepoError),
}

/// Validates a backup payload under `mode` without touching storage.
pub fn check_payload(input: &str, mode: RestoreMode) -> Result<(), RestoreRejection> {
    let parsed: Value = serde_json::from_str(input).map_err(|_| RestoreRejection::NotJson)?;
    let Value::Array(elements) = parsed else {
        return Err(RestoreRejection::NotAList);
    };

    if mode == RestoreMode::Shallow {
        return Ok(());
    }

    let mut seen = HashSet::new();
    for (index, element) in elements.into_iter().enumerate() {
        let item = check_element(element)
            .map_err(|reason| RestoreRejection::InvalidElement { index, reason })?;
        if !seen.insert(item.id.clone()) {
            return Err(RestoreRejection::DuplicateId(item.id));
        }
    }
    Ok(())
}

fn check_element(element: Value) -> Result<ResearchItem, String> {
    let Some(fields) = element.as_object() else {
        return Err("not an object".to_string());
    };

    if let Some(unknown) = fields
        .keys()
        .find(|key| !DOCUMENT_FIELDS.contains(&key.as_str()))
    {
        return Err(format!("unknown field `{unknown}`"));
    }
    if let Some(missing) = DOCUMENT_FIELDS
        .iter()
        .find(|field| !fields.contains_key(**field))
    {
        return Err(format!("missing field `{missing}`"));
    }

    let item: ResearchItem = serde_json::from_value(element).map_err(|err| err.to_string())?;
    if item.id.is_empty() {
        return Err("empty id".to_string());
    }
    if !is_valid_date(&item.date) {
        return Err(format!("date `{}` is not YYYY-MM-DD", item.date));
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::{check_payload, RestoreRejection};
    use crate::config::RestoreMode;

    const GOOD: &str = r#"[{"id":"a","title":"t","authors":"x","date":"2024-01-01","content":"c","views":2}]"#;

    #[test]
    fn shallow_accepts_any_list() {
        assert_eq!(check_payload("[]", RestoreMode::Shallow), Ok(()));
        assert_eq!(check_payload(r#"[1, "x", {}]"#, RestoreMode::Shallow), Ok(()));
    }

    #[test]
    fn non_list_values_are_rejected_in_both_modes() {
        for mode in [RestoreMode::Shallow, RestoreMode::Strict] {
            assert_eq!(check_payload("{}", mode), Err(RestoreRejection::NotAList));
            assert_eq!(check_payload("42", mode), Err(RestoreRejection::NotAList));
            assert_eq!(check_payload("not json", mode), Err(RestoreRejection::NotJson));
        }
    }

    #[test]
    fn strict_accepts_well_formed_documents() {
        assert_eq!(check_payload(GOOD, RestoreMode::Strict), Ok(()));
    }

    #[test]
    fn strict_rejects_unknown_and_missing_fields() {
        let extra = r#"[{"id":"a","title":"t","authors":"x","date":"2024-01-01","content":"c","views":0,"pinned":true}]"#;
        assert!(matches!(
            check_payload(extra, RestoreMode::Strict),
            Err(RestoreRejection::InvalidElement { index: 0, .. })
        ));

        let missing = r#"[{"id":"a","title":"t","authors":"x","date":"2024-01-01","content":"c"}]"#;
        assert!(matches!(
            check_payload(missing, RestoreMode::Strict),
            Err(RestoreRejection::InvalidElement { index: 0, .. })
        ));
    }

    #[test]
    fn strict_rejects_negative_views_bad_dates_and_duplicates() {
        let negative = r#"[{"id":"a","title":"t","authors":"x","date":"2024-01-01","content":"c","views":-3}]"#;
        assert!(check_payload(negative, RestoreMode::Strict).is_err());

        let bad_date = r#"[{"id":"a","title":"t","authors":"x","date":"01/01/2024","content":"c","views":0}]"#;
        assert!(check_payload(bad_date, RestoreMode::Strict).is_err());

        let dupes = r#"[
            {"id":"a","title":"t","authors":"x","date":"2024-01-01","content":"c","views":0},
            {"id":"a","title":"u","authors":"y","date":"2024-01-02","content":"d","views":1}
        ]"#;
        assert_eq!(
            check_payload(dupes, RestoreMode::Strict),
            Err(RestoreRejection::DuplicateId("a".to_string()))
        );
    }
}
