//! Opening the bookmark database.
//!
//! [`Database`] owns the single `rusqlite::Connection` shared by the bookmark
//! store and its result sets. Migrations run before the handle is returned.

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::migrations;

/// Migrated SQLite connection plus where it lives.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Opens the database file at `path`, creating it and any missing parent
    /// directories, then migrates it to the current schema.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the file cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(dir) {
                warn!(dir = %dir.display(), error = %e, "could not create database directory");
            }
        }
        Self::migrated(Connection::open(path)?, Some(path.to_path_buf()))
    }

    /// In-memory database; everything is lost when it is dropped.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?, None)
    }

    fn migrated(conn: Connection, path: Option<PathBuf>) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn, path })
    }

    /// File backing this database, `None` when in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
