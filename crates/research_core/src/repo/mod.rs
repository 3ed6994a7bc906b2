//! Repository layer over persisted slots.
//!
//! # Responsibility
//! - Own the document collection and owner credential read/modify/write cycles.
//! - Keep serialization of the collection blob inside one boundary.
//!
//! # Invariants
//! - Every document mutation rewrites and returns the full collection.
//! - Unknown ids on update/increment/delete are no-ops, not errors.
//! - A corrupt collection blob degrades to the seed set and is left untouched.

pub mod credential_repo;
pub mod research_repo;
