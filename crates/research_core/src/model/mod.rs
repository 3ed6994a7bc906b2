//! Domain model for the research library.
//!
//! # Responsibility
//! - Define the persisted document shape and the owner-editable draft.
//! - Provide pure content helpers used by reader/list projections.
//!
//! # Invariants
//! - Every document is identified by an opaque `id` that never changes.
//! - `views` is a non-negative counter; negative values cannot be represented.

pub mod document;
