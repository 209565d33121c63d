mod author_repository;
mod book_repository;
mod models;

use crate::errors::Error;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub use author_repository::*;
pub use book_repository::*;
pub use models::*;

/// Schema applied to every freshly opened database
const SCHEMA: &str = include_str!("../../migrations/2024-11-01-000000_create_catalog/up.sql");

/// How long a connection waits on a locked database before giving up. Writes
/// run in immediate transactions so they queue on this instead of failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Per-connection setup run by the pool every time it opens a connection
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            BUSY_TIMEOUT.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

#[derive(Clone, Debug)]
pub struct Database {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl Database {
    /// Opens (or creates) the SQLite database at `db_path` and makes sure the
    /// catalog tables exist.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path of the SQLite file
    /// * `pool_size` - Maximum number of pooled connections
    ///
    /// # Errors
    ///
    /// Returns an Error if the pool cannot be built or the schema cannot be applied
    pub fn new(db_path: &str, pool_size: u32) -> Result<Self, Error> {
        let manager = ConnectionManager::<SqliteConnection>::new(db_path);
        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)?;

        let database = Database {
            pool: Arc::new(pool),
        };

        let mut conn = database.get_conn()?;
        conn.batch_execute(SCHEMA)?;
        info!("Database ready at {}", db_path);

        Ok(database)
    }

    /// Checks a connection out of the pool. It goes back when dropped.
    pub fn get_conn(&self) -> Result<DbConnection, Error> {
        let conn = self.pool.get()?;
        debug!(
            idle = self.pool.state().idle_connections,
            "Acquired database connection"
        );
        Ok(conn)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Database;
    use tempfile::TempDir;

    /// Database backed by a file in a temporary directory. Keep the `TempDir`
    /// alive for as long as the database is used.
    pub fn temp_database() -> (TempDir, Database) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("catalog-test.db");
        let database =
            Database::new(path.to_str().expect("utf-8 temp path"), 4).expect("open database");
        (dir, database)
    }
}
