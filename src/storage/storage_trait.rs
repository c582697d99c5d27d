//! Storage Trait
//!
//! This module defines the `Storage` trait, which provides an interface for
//! fact storage backends.
//!
//! Implementors of this trait are responsible for:
//! - Assigning ids and creation timestamps to new facts
//! - Listing stored facts newest first
//! - Removing facts by id
//!
//! All methods return a `Result` to handle potential storage errors.

use crate::error_handling::types::StorageError;
use crate::storage::types::{FactRecord, NewFact};

/// The `Storage` trait defines the interface for fact storage backends.
///
/// The backend is picked once at startup (database when it can be opened,
/// in-memory otherwise) and injected into the web layer; there is no
/// switching between backends afterwards.
pub trait Storage: Send + Sync {
    /// Stores a new fact, assigning its id and creation timestamp.
    ///
    /// Returns the stored record, id included.
    fn insert_fact(&self, new_fact: NewFact) -> Result<FactRecord, StorageError>;

    /// Returns every stored fact, most recently created first. Facts
    /// created in the same instant come back most-recently-inserted first.
    fn list_facts(&self) -> Result<Vec<FactRecord>, StorageError>;

    /// Removes the fact with the given id.
    ///
    /// Returns `StorageError::NotFound` when no fact has that id; the
    /// record set is left unchanged in that case.
    fn delete_fact(&self, id: &str) -> Result<(), StorageError>;

    /// Whether this backend persists across restarts. A static property of
    /// the implementation, not a connection probe.
    fn backend_connected(&self) -> bool;
}
