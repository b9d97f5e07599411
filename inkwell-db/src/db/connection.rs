use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use super::schema::SCHEMA;
use crate::error::DbResult;

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

/// Pragmas applied to every pooled connection
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling support
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// Every in-memory connection is its own database, so in-memory pools are
    /// capped at a single connection.
    pub fn new<P: AsRef<Path>>(path: P, pool_size: u32) -> DbResult<Self> {
        let (manager, max_size) = if Self::is_memory_path(path.as_ref()) {
            (SqliteConnectionManager::memory(), 1)
        } else {
            (SqliteConnectionManager::file(path.as_ref()), pool_size.max(1))
        };

        let manager = manager.with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS));
        let pool = Pool::builder().max_size(max_size).build(manager)?;

        tracing::debug!(
            path = %path.as_ref().display(),
            max_size,
            "Database pool created"
        );
        Ok(Self { pool })
    }

    fn is_memory_path(path: &Path) -> bool {
        path.to_string_lossy()
            .trim()
            .eq_ignore_ascii_case(MEMORY_DB_PATH)
    }

    /// Create an in-memory database pool (useful for testing)
    pub fn in_memory() -> DbResult<Self> {
        Self::new(MEMORY_DB_PATH, 1)
    }

    /// Initialize the database schema
    pub fn initialize(&self) -> DbResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!("Database schema initialized");
        Ok(())
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> DbResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}
