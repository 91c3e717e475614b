//! Aggregated record store over one SQLite connection.

use crate::db::migrations::latest_version;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::completion_repo::CompletionRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::{RepoError, RepoResult};
use rusqlite::Connection;

const REQUIRED_TABLES: [&str; 4] = ["users", "categories", "tasks", "task_completions"];

/// Record store collaborator consumed by the services.
///
/// Aggregates the per-kind repositories and supplies the transaction
/// boundary that keeps one completion atomic.
pub trait Store:
    TaskRepository + UserRepository + CategoryRepository + CompletionRepository
{
    /// Runs `f` inside a single transaction; rolls back when it errors.
    fn in_transaction<T, E>(&self, f: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        Self: Sized,
        E: From<RepoError>;
}

/// SQLite-backed record store.
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    /// Wraps a connection after checking it was migrated by this binary.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest known migration.
    /// - `MissingRequiredTable` when the schema lacks an engine table.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        for table in REQUIRED_TABLES {
            let exists: i64 = conn.query_row(
                "SELECT EXISTS(
                    SELECT 1
                    FROM sqlite_master
                    WHERE type = 'table' AND name = ?1
                );",
                [table],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }

        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }
}

impl Store for SqliteStore<'_> {
    fn in_transaction<T, E>(&self, f: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<RepoError>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|err| E::from(RepoError::from(err)))?;
        let value = f(self)?;
        tx.commit().map_err(|err| E::from(RepoError::from(err)))?;
        Ok(value)
    }
}
