//! Storage subsystem
//!
//! This module provides abstractions and implementations for persisting
//! fact records.
//!
//! Components:
//! - `storage_trait`: the Storage trait defining a uniform API.
//! - `types`: shared data types used by storage backends.
//! - `database_storage`: SQLite implementation using sqlx.
//! - `memory_storage`: in-process fallback used when the database is unavailable.

pub mod database_storage;
pub mod memory_storage;
pub mod storage_trait;
pub mod types;
