use std::sync::Mutex;

use chrono::Utc;
use log::info;

use crate::error_handling::types::StorageError;
use crate::storage::storage_trait::Storage;
use crate::storage::types::{FactRecord, NewFact};

/// In-process fallback used when the database cannot be opened.
///
/// Facts live in insertion order behind a single mutex and ids come from a
/// counter starting at 1. Everything is lost on restart.
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

struct Inner {
    facts: Vec<FactRecord>,
    next_id: u64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        info!("MemoryStorage initialized, saved facts will not survive a restart");
        Self {
            inner: Mutex::new(Inner {
                facts: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn insert_fact(&self, new_fact: NewFact) -> Result<FactRecord, StorageError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        let record = FactRecord {
            id: inner.next_id.to_string(),
            text: new_fact.text,
            animal: new_fact.animal,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.facts.push(record.clone());
        Ok(record)
    }

    fn list_facts(&self) -> Result<Vec<FactRecord>, StorageError> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        // Insertion order is creation order, so newest first is a reverse walk.
        Ok(inner.facts.iter().rev().cloned().collect())
    }

    fn delete_fact(&self, id: &str) -> Result<(), StorageError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        let before = inner.facts.len();
        inner.facts.retain(|fact| fact.id != id);
        if inner.facts.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    fn backend_connected(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::types::Animal;

    fn fact(text: &str) -> NewFact {
        NewFact {
            text: text.to_string(),
            animal: Animal::Cat,
        }
    }

    #[test]
    fn ids_count_up_from_one() {
        let storage = MemoryStorage::new();
        let first = storage.insert_fact(fact("one")).unwrap();
        let second = storage.insert_fact(fact("two")).unwrap();
        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
    }

    #[test]
    fn list_is_newest_first() {
        let storage = MemoryStorage::new();
        for text in ["one", "two", "three"] {
            storage.insert_fact(fact(text)).unwrap();
        }
        let listed = storage.list_facts().unwrap();
        let texts: Vec<&str> = listed.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["three", "two", "one"]);
    }

    #[test]
    fn delete_removes_exactly_one_record() {
        let storage = MemoryStorage::new();
        storage.insert_fact(fact("one")).unwrap();
        let target = storage.insert_fact(fact("two")).unwrap();
        storage.insert_fact(fact("three")).unwrap();

        storage.delete_fact(&target.id).unwrap();

        let listed = storage.list_facts().unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|f| f.id != target.id));
    }

    #[test]
    fn delete_unknown_id_is_not_found_and_changes_nothing() {
        let storage = MemoryStorage::new();
        storage.insert_fact(fact("one")).unwrap();

        let err = storage.delete_fact("42").unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
        assert_eq!(storage.list_facts().unwrap().len(), 1);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let storage = MemoryStorage::new();
        let first = storage.insert_fact(fact("one")).unwrap();
        storage.delete_fact(&first.id).unwrap();
        let second = storage.insert_fact(fact("two")).unwrap();
        assert_ne!(second.id, first.id);
    }

    #[test]
    fn create_and_delete_counts_balance() {
        let storage = MemoryStorage::new();
        let ids: Vec<String> = (0..5)
            .map(|i| storage.insert_fact(fact(&format!("fact {}", i))).unwrap().id)
            .collect();
        for id in &ids[..2] {
            storage.delete_fact(id).unwrap();
        }
        assert_eq!(storage.list_facts().unwrap().len(), 3);
    }

    #[test]
    fn memory_backend_reports_disconnected() {
        assert!(!MemoryStorage::new().backend_connected());
    }
}
