//! Use-case services.
//!
//! # Responsibility
//! - Turn owner/reader actions into repository calls.
//! - Hold the policy checks the repositories deliberately skip.

pub mod auth_service;
pub mod backup_service;
pub mod library_service;
