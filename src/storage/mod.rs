//! SQLite-backed storage.
//!
//! One `rusqlite::Connection` is opened at startup and owned for the whole
//! process lifetime; queries run on the blocking thread pool against it.
//! The lifecycle controller is the only caller of [`Database::close`].

pub mod product;

use std::sync::{Arc, Mutex, PoisonError};

use rusqlite::Connection;
use thiserror::Error;
use tokio::task;

/// Schema applied at open; idempotent.
const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS products (
    id VARCHAR(36) NOT NULL,
    name TEXT NOT NULL,
    price NUMERIC(10,2) NOT NULL DEFAULT 0.00,
    CONSTRAINT products_pkey PRIMARY KEY (id)
)";

/// Errors from storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No row matched the requested id.
    #[error("product not found")]
    NotFound,

    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The blocking query task was cancelled or panicked.
    #[error("storage task failed: {0}")]
    Task(#[from] task::JoinError),
}

/// Shared handle to the service database.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and apply the schema.
    /// `":memory:"` opens an in-memory database.
    pub async fn open(path: &str) -> Result<Self, StorageError> {
        let path = path.to_string();
        let conn = task::spawn_blocking(move || -> Result<Connection, StorageError> {
            let conn = Connection::open(path)?;
            conn.execute(SCHEMA_SQL, [])?;
            Ok(conn)
        })
        .await??;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a query on the blocking pool against the shared connection.
    pub(crate) async fn call<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        task::spawn_blocking(move || {
            // A poisoned lock means a query thread panicked; the connection
            // itself is still usable.
            let conn = conn.lock().unwrap_or_else(PoisonError::into_inner);
            f(&conn).map_err(StorageError::from)
        })
        .await?
    }

    /// Close the connection. Called exactly once by the lifecycle controller
    /// after the drain completes; failures are logged rather than propagated
    /// since shutdown is already past the point of recovery.
    pub fn close(self) {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                let conn = mutex.into_inner().unwrap_or_else(PoisonError::into_inner);
                if let Err((_, error)) = conn.close() {
                    tracing::warn!(%error, "failed to close database cleanly");
                }
            }
            // A clone can outlive us only inside a forcibly terminated
            // request; the connection closes when the last clone drops.
            Err(_) => {
                tracing::debug!("database handle still shared; deferring close to last drop");
            }
        }
    }
}
