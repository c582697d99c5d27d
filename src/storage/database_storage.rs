use std::env;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use uuid::Uuid;

use crate::error_handling::types::StorageError;
use crate::storage::storage_trait::Storage;
use crate::storage::types::{Animal, FactRecord, NewFact};

// Internal row mapping for facts to avoid manual try_get
#[derive(Debug, sqlx::FromRow)]
struct FactRow {
    id: String,
    text: String,
    animal: String,
    created_at: String,
}

impl FactRow {
    fn into_fact(self) -> Result<FactRecord, StorageError> {
        let animal = self.animal.parse::<Animal>().map_err(StorageError::ReadFailed)?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
            .with_timezone(&Utc);
        Ok(FactRecord {
            id: self.id,
            text: self.text,
            animal,
            created_at,
        })
    }
}

/// SQLite-backed fact storage.
///
/// Owns a dedicated current-thread runtime for driving sqlx, so the
/// synchronous `Storage` methods must not be called from an async context;
/// the web layer hops through `spawn_blocking` for that reason.
pub struct DatabaseStorage {
    rt: tokio::runtime::Runtime,
    pool: Pool<Sqlite>,
}

impl DatabaseStorage {
    /// Default database filename used in the application's working directory
    const DEFAULT_DB_FILE: &'static str = "pawfacts.sqlite3";

    /// Create or open the database in the current working directory with the default filename
    pub fn new() -> Result<Self, StorageError> {
        let cwd = env::current_dir().map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;
        let path = cwd.join(Self::DEFAULT_DB_FILE);
        Self::new_file(path)
    }

    pub fn new_file<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }
        let pool = rt.block_on(async {
            let opts = SqliteConnectOptions::from_str("sqlite://")
                .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?
                .filename(path_ref)
                .create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(opts)
                .await
                .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;
            // create schema
            sqlx::query(
                "CREATE TABLE IF NOT EXISTS facts (
                    id TEXT PRIMARY KEY,
                    text TEXT NOT NULL,
                    animal TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );",
            )
            .execute(&pool)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            Ok::<_, StorageError>(pool)
        })?;
        Ok(Self { rt, pool })
    }
}

impl Storage for DatabaseStorage {
    fn insert_fact(&self, new_fact: NewFact) -> Result<FactRecord, StorageError> {
        let record = FactRecord {
            id: Uuid::new_v4().to_string(),
            text: new_fact.text,
            animal: new_fact.animal,
            created_at: Utc::now(),
        };
        self.rt.block_on(async {
            sqlx::query("INSERT INTO facts (id, text, animal, created_at) VALUES (?1, ?2, ?3, ?4)")
                .bind(&record.id)
                .bind(&record.text)
                .bind(record.animal.as_str())
                .bind(record.created_at.to_rfc3339())
                .execute(&self.pool)
                .await
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            Ok::<_, StorageError>(())
        })?;
        Ok(record)
    }

    fn list_facts(&self) -> Result<Vec<FactRecord>, StorageError> {
        self.rt.block_on(async {
            // rowid breaks ties between facts created in the same instant
            let rows: Vec<FactRow> = sqlx::query_as(
                "SELECT id, text, animal, created_at FROM facts
                 ORDER BY created_at DESC, rowid DESC",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            let mut out = Vec::with_capacity(rows.len());
            for row in rows {
                out.push(row.into_fact()?);
            }
            Ok(out)
        })
    }

    fn delete_fact(&self, id: &str) -> Result<(), StorageError> {
        self.rt.block_on(async {
            let result = sqlx::query("DELETE FROM facts WHERE id = ?1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            if result.rows_affected() == 0 {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
    }

    fn backend_connected(&self) -> bool {
        true
    }
}
