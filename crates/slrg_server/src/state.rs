use crate::error::{ApiError, StartupError};
use crate::settings::DatabaseSettings;
use log::info;
use rusqlite::Connection;
use slrg_core::db::{open_db, open_db_in_memory};
use slrg_core::{ensure_registry_ready, PageLimits, StoreResult};
use std::sync::{Arc, Mutex};

/// Shared handler state: one SQLite connection and the paging bounds.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    pub limits: PageLimits,
}

impl AppState {
    /// Wraps a migrated connection after checking every registry table once.
    ///
    /// Handlers build their stores with `SqliteStore::assume_ready`.
    pub fn new(conn: Connection, limits: PageLimits) -> StoreResult<Self> {
        ensure_registry_ready(&conn)?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
            limits,
        })
    }

    pub fn open(database: &DatabaseSettings, limits: PageLimits) -> Result<Self, StartupError> {
        let conn = if database.in_memory {
            open_db_in_memory()?
        } else {
            open_db(&database.path)?
        };
        let state = Self::new(conn, limits)?;
        info!(
            "event=state_ready module=server status=ok in_memory={} default_size={} max_size={}",
            database.in_memory, limits.default_size, limits.max_size
        );
        Ok(state)
    }

    /// Runs `f` with exclusive access to the connection on the blocking pool.
    ///
    /// The lock is taken inside the blocking task, so neither SQLite work nor
    /// waiting for the lock occupies an async worker.
    pub async fn with_connection<R, F>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&Connection) -> Result<R, ApiError> + Send + 'static,
        R: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db.lock().map_err(|_| ApiError::LockPoisoned)?;
            f(&conn)
        })
        .await?
    }
}
