//! Sorted bookmark result set with commit-time change notifications.
//!
//! [`FetchedResults`] keeps the last committed view of `bookmarked_images`
//! (optionally narrowed to one exact URL) ordered by `regular_size_url`.
//! After a transaction commits, [`FetchedResults::refresh`] re-reads the table
//! and reports what changed as a bracketed run of [`PersistenceChange`]s.
//! Nothing is reported for work that never committed.

use rusqlite::{params, Connection};
use std::collections::HashSet;

use crate::types::bookmark::BookmarkedImage;

const SELECT_COLUMNS: &str =
    "SELECT id, title, regular_size_url, large_thumb_size_url, created_at FROM bookmarked_images";

/// Kind of row-level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Delete,
}

/// Change notification emitted after a commit.
///
/// Deletes carry their position in the previous result set (`at`) and arrive
/// in descending order; inserts carry their position in the new result set
/// (`new_position`) and arrive in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceChange {
    WillChange,
    DidChange {
        kind: ChangeKind,
        at: Option<usize>,
        new_position: Option<usize>,
    },
    DidChangeContent,
}

/// Committed, URL-sorted bookmarks plus the diffing needed to report changes.
pub struct FetchedResults {
    predicate: Option<String>,
    objects: Vec<BookmarkedImage>,
}

impl FetchedResults {
    /// Runs the initial fetch. With `predicate` set, only the bookmark whose
    /// `regular_size_url` equals it is tracked.
    pub fn perform_fetch(
        conn: &Connection,
        predicate: Option<&str>,
    ) -> Result<Self, rusqlite::Error> {
        let predicate = predicate.map(str::to_string);
        let objects = Self::query(conn, predicate.as_deref())?;
        Ok(Self { predicate, objects })
    }

    pub fn fetched_objects(&self) -> &[BookmarkedImage] {
        &self.objects
    }

    pub fn object_at(&self, position: usize) -> Option<&BookmarkedImage> {
        self.objects.get(position)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Re-reads committed rows and returns the changes since the last fetch.
    ///
    /// Returns an empty vector when nothing changed. The stored objects are
    /// only replaced once the read has succeeded.
    pub fn refresh(&mut self, conn: &Connection) -> Result<Vec<PersistenceChange>, rusqlite::Error> {
        let fresh = Self::query(conn, self.predicate.as_deref())?;
        let changes = diff(&self.objects, &fresh);
        self.objects = fresh;
        Ok(changes)
    }

    fn query(
        conn: &Connection,
        predicate: Option<&str>,
    ) -> Result<Vec<BookmarkedImage>, rusqlite::Error> {
        let mut results = Vec::new();
        match predicate {
            Some(url) => {
                let mut stmt = conn.prepare(&format!(
                    "{} WHERE regular_size_url = ?1 ORDER BY regular_size_url ASC",
                    SELECT_COLUMNS
                ))?;
                let rows = stmt.query_map(params![url], row_to_image)?;
                for row in rows {
                    results.push(row?);
                }
            }
            None => {
                let mut stmt =
                    conn.prepare(&format!("{} ORDER BY regular_size_url ASC", SELECT_COLUMNS))?;
                let rows = stmt.query_map([], row_to_image)?;
                for row in rows {
                    results.push(row?);
                }
            }
        }
        Ok(results)
    }
}

fn row_to_image(row: &rusqlite::Row) -> rusqlite::Result<BookmarkedImage> {
    Ok(BookmarkedImage {
        id: row.get(0)?,
        title: row.get(1)?,
        regular_size_url: row.get(2)?,
        large_thumb_size_url: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn diff(old: &[BookmarkedImage], new: &[BookmarkedImage]) -> Vec<PersistenceChange> {
    let old_ids: HashSet<&str> = old.iter().map(|b| b.id.as_str()).collect();
    let new_ids: HashSet<&str> = new.iter().map(|b| b.id.as_str()).collect();

    let deletes: Vec<usize> = old
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, b)| !new_ids.contains(b.id.as_str()))
        .map(|(i, _)| i)
        .collect();
    let inserts: Vec<usize> = new
        .iter()
        .enumerate()
        .filter(|(_, b)| !old_ids.contains(b.id.as_str()))
        .map(|(i, _)| i)
        .collect();

    if deletes.is_empty() && inserts.is_empty() {
        return Vec::new();
    }

    let mut changes = Vec::with_capacity(deletes.len() + inserts.len() + 2);
    changes.push(PersistenceChange::WillChange);
    changes.extend(deletes.into_iter().map(|at| PersistenceChange::DidChange {
        kind: ChangeKind::Delete,
        at: Some(at),
        new_position: None,
    }));
    changes.extend(inserts.into_iter().map(|pos| PersistenceChange::DidChange {
        kind: ChangeKind::Insert,
        at: None,
        new_position: Some(pos),
    }));
    changes.push(PersistenceChange::DidChangeContent);
    changes
}
