//! Owner login and password change.
//!
//! # Invariants
//! - Passwords are compared by plain string equality.
//! - A rejected change never writes to the credential slot.
//! - No attempt counting or lockout.

use crate::repo::credential_repo::CredentialRepository;
use crate::repo::research_repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_CHARS: usize = 4;

/// Input of the change-password form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

#[derive(Debug)]
pub enum PasswordChangeError {
    IncorrectCurrent,
    Mismatch,
    TooShort { min: usize },
    Repo(RepoError),
}

impl Display for PasswordChangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncorrectCurrent => write!(f, "incorrect current password"),
            Self::Mismatch => write!(f, "new passwords do not match"),
            Self::TooShort { min } => write!(f, "password must be at least {min} characters long"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PasswordChangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PasswordChangeError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct AuthService<C: CredentialRepository> {
    credentials: C,
}

impl<C: CredentialRepository> AuthService<C> {
    pub fn new(credentials: C) -> Self {
        Self { credentials }
    }

    /// Returns whether `candidate` equals the stored password.
    pub fn login(&self, candidate: &str) -> RepoResult<bool> {
        let ok = self.credentials.get_password()? == candidate;
        if ok {
            info!("event=owner_login module=service status=ok");
        } else {
            warn!("event=owner_login module=service status=rejected");
        }
        Ok(ok)
    }

    /// Changes the password after checking current, confirmation and length, in that order.
    pub fn change_password(&self, change: &PasswordChange) -> Result<(), PasswordChangeError> {
        if self.credentials.get_password()? != change.current {
            return Err(PasswordChangeError::IncorrectCurrent);
        }
        if change.new != change.confirm {
            return Err(PasswordChangeError::Mismatch);
        }
        if change.new.chars().count() < MIN_PASSWORD_CHARS {
            return Err(PasswordChangeError::TooShort {
                min: MIN_PASSWORD_CHARS,
            });
        }

        self.credentials.set_password(&change.new)?;
        Ok(())
    }
}
