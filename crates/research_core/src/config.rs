//! Library configuration.
//!
//! # Responsibility
//! - Describe slot names, owner defaults and restore policy in one place.
//! - Load overrides from TOML; every field is optional.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_OWNER_NAME: &str = "Imene Ahmed Omar";
pub const DEFAULT_PASSWORD: &str = "1234";
pub const DEFAULT_COLLECTION_KEY: &str = "imene_research_data";
pub const DEFAULT_CREDENTIAL_KEY: &str = "imene_owner_password";
pub const DEFAULT_BACKUP_PREFIX: &str = "imene_research";

/// How much of a backup payload is checked before it replaces the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreMode {
    /// Payload must parse and be a list. Elements are not inspected.
    #[default]
    Shallow,
    /// Every element must be a well-formed document and ids must be unique.
    Strict,
}

/// Slot names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotKeys {
    pub collection: String,
    pub credential: String,
}

impl Default for SlotKeys {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION_KEY.to_string(),
            credential: DEFAULT_CREDENTIAL_KEY.to_string(),
        }
    }
}

/// Logging settings consumed by [`crate::logging::init_logging`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `trace|debug|info|warn|error`; build-mode default when unset.
    pub level: Option<String>,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    pub dir: Option<PathBuf>,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub owner_name: String,
    /// Password in effect until the owner changes it.
    pub default_password: String,
    pub backup_prefix: String,
    pub restore_mode: RestoreMode,
    pub slots: SlotKeys,
    pub log: LogSettings,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            owner_name: DEFAULT_OWNER_NAME.to_string(),
            default_password: DEFAULT_PASSWORD.to_string(),
            backup_prefix: DEFAULT_BACKUP_PREFIX.to_string(),
            restore_mode: RestoreMode::default(),
            slots: SlotKeys::default(),
            log: LogSettings::default(),
        }
    }
}

impl LibraryConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: LibraryConfig = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.slots.collection.trim().is_empty() || self.slots.credential.trim().is_empty() {
            return Err(ConfigError::Invalid("slot keys cannot be empty"));
        }
        if self.slots.collection == self.slots.credential {
            return Err(ConfigError::Invalid(
                "collection and credential slots must differ",
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, LibraryConfig, RestoreMode, DEFAULT_PASSWORD};

    #[test]
    fn empty_toml_yields_defaults() {
        let config = LibraryConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(config, LibraryConfig::default());
        assert_eq!(config.default_password, DEFAULT_PASSWORD);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = LibraryConfig::from_toml_str(
            r#"
            owner_name = "Dr. Who"
            restore_mode = "strict"

            [slots]
            collection = "papers"
            "#,
        )
        .expect("config should parse");
        assert_eq!(config.owner_name, "Dr. Who");
        assert_eq!(config.restore_mode, RestoreMode::Strict);
        assert_eq!(config.slots.collection, "papers");
        assert_eq!(config.slots.credential, "imene_owner_password");
    }

    #[test]
    fn colliding_slot_keys_are_rejected() {
        let err = LibraryConfig::from_toml_str(
            r#"
            [slots]
            collection = "same"
            credential = "same"
            "#,
        )
        .expect_err("colliding keys must fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_restore_mode_is_parse_error() {
        let err = LibraryConfig::from_toml_str(r#"restore_mode = "lenient""#)
            .expect_err("unknown mode must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.toml");
        std::fs::write(&path, "backup_prefix = \"lab\"\n").unwrap();
        let config = LibraryConfig::load_from_path(&path).unwrap();
        assert_eq!(config.backup_prefix, "lab");
    }
}
