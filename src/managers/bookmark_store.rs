//! Bookmark Store for ImageBrowser.
//!
//! Implements `BookmarkStoreTrait`: add, remove and query operations for
//! bookmarked images, backed by SQLite via `rusqlite`.
//!
//! Every mutation runs in its own transaction. Once the transaction commits,
//! the store re-reads its sorted result set and publishes the difference on
//! its [`ChangeBus`] as one `BeginBatch … EndBatch` run. Work that fails to
//! commit is rolled back and publishes nothing, so the mirrored list never
//! runs ahead of what is on disk.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::{ChangeKind, Database, FetchedResults, PersistenceChange};
use crate::managers::change_bus::ChangeBus;
use crate::types::bookmark::{BookmarkedImage, NewBookmark};
use crate::types::change::ChangeEvent;
use crate::types::errors::BookmarkError;

/// Trait defining bookmark storage operations.
pub trait BookmarkStoreTrait {
    /// Persists one bookmark. Listeners see `BeginBatch, Insert(pos), EndBatch`
    /// where `pos` is its place in URL order.
    fn add(
        &self,
        title: Option<&str>,
        regular_size_url: &str,
        large_thumb_size_url: &str,
    ) -> Result<(), BookmarkError>;
    /// Deletes the bookmark at `position` of the current sorted list.
    fn remove(&self, position: usize) -> Result<(), BookmarkError>;
    /// Deletes several bookmarks with a single commit and a single batch.
    fn remove_many(&self, positions: &[usize]) -> Result<(), BookmarkError>;
    /// Committed bookmarks sorted ascending by `regular_size_url`.
    fn query(&self) -> Vec<BookmarkedImage>;
    fn contains(&self, regular_size_url: &str) -> bool;
}

/// Holds the "delivering changes" flag for as long as it lives, so a
/// listener that unwinds cannot leave the store refusing every mutation.
struct PublishingGuard<'a>(&'a Cell<bool>);

impl<'a> PublishingGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for PublishingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Bookmark store backed by a shared SQLite database.
pub struct BookmarkStore {
    db: Rc<Database>,
    results: RefCell<FetchedResults>,
    changes: ChangeBus,
    publishing: Cell<bool>,
}

impl BookmarkStore {
    /// Creates a store and performs the initial fetch of committed bookmarks.
    pub fn new(db: Rc<Database>) -> Result<Self, BookmarkError> {
        let results = FetchedResults::perform_fetch(db.connection(), None).map_err(|e| {
            warn!(error = %e, "could not fetch bookmarks");
            BookmarkError::from(e)
        })?;
        Ok(Self {
            db,
            results: RefCell::new(results),
            changes: ChangeBus::new(),
            publishing: Cell::new(false),
        })
    }

    /// Channel on which committed changes are published.
    pub fn changes(&self) -> &ChangeBus {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.results.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.borrow().is_empty()
    }

    pub fn get(&self, position: usize) -> Option<BookmarkedImage> {
        self.results.borrow().object_at(position).cloned()
    }

    /// Convenience wrapper around [`BookmarkStoreTrait::add`].
    pub fn add_bookmark(&self, bookmark: &NewBookmark) -> Result<(), BookmarkError> {
        self.add(
            bookmark.title.as_deref(),
            &bookmark.regular_size_url,
            &bookmark.large_thumb_size_url,
        )
    }

    /// Picks up rows committed through another connection and publishes them.
    pub fn sync(&self) -> Result<(), BookmarkError> {
        self.ensure_not_publishing()?;
        self.publish_committed()
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn ensure_not_publishing(&self) -> Result<(), BookmarkError> {
        if self.publishing.get() {
            warn!("bookmark mutation requested while a change batch is being delivered");
            return Err(BookmarkError::DatabaseError(
                "mutation attempted during change delivery".to_string(),
            ));
        }
        Ok(())
    }

    fn url_exists(&self, regular_size_url: &str) -> Result<bool, BookmarkError> {
        let exists: bool = self.db.connection().query_row(
            "SELECT EXISTS(SELECT 1 FROM bookmarked_images WHERE regular_size_url = ?1)",
            params![regular_size_url],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Re-reads committed state and emits the resulting batch, if any.
    fn publish_committed(&self) -> Result<(), BookmarkError> {
        let changes = self
            .results
            .borrow_mut()
            .refresh(self.db.connection())
            .map_err(|e| {
                warn!(error = %e, "could not refresh bookmarks after commit");
                BookmarkError::from(e)
            })?;

        if changes.is_empty() {
            return Ok(());
        }

        let _publishing = PublishingGuard::enter(&self.publishing);
        for change in changes {
            match change {
                PersistenceChange::WillChange => self.changes.emit(ChangeEvent::BeginBatch),
                PersistenceChange::DidChange {
                    kind: ChangeKind::Insert,
                    new_position: Some(pos),
                    ..
                } => self.changes.emit(ChangeEvent::Insert(pos)),
                PersistenceChange::DidChange {
                    kind: ChangeKind::Delete,
                    at: Some(pos),
                    ..
                } => self.changes.emit(ChangeEvent::Delete(pos)),
                PersistenceChange::DidChange { .. } => {}
                PersistenceChange::DidChangeContent => self.changes.emit(ChangeEvent::EndBatch),
            }
        }
        Ok(())
    }

    fn insert_row(
        &self,
        id: &str,
        title: Option<&str>,
        regular_size_url: &str,
        large_thumb_size_url: &str,
    ) -> Result<(), BookmarkError> {
        let tx = self.db.connection().unchecked_transaction()?;
        tx.execute(
            "INSERT INTO bookmarked_images (id, title, regular_size_url, large_thumb_size_url, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, title, regular_size_url, large_thumb_size_url, Self::now()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_ids(&self, ids: &[String]) -> Result<(), BookmarkError> {
        let tx = self.db.connection().unchecked_transaction()?;
        for id in ids {
            tx.execute("DELETE FROM bookmarked_images WHERE id = ?1", params![id])?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl BookmarkStoreTrait for BookmarkStore {
    fn add(
        &self,
        title: Option<&str>,
        regular_size_url: &str,
        large_thumb_size_url: &str,
    ) -> Result<(), BookmarkError> {
        self.ensure_not_publishing()?;

        if self.url_exists(regular_size_url)? {
            warn!(url = regular_size_url, "image is already bookmarked");
            return Err(BookmarkError::DuplicateUrl(regular_size_url.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        if let Err(e) = self.insert_row(&id, title, regular_size_url, large_thumb_size_url) {
            warn!(error = %e, url = regular_size_url, "could not save bookmark");
            return Err(e);
        }

        debug!(url = regular_size_url, "bookmark saved");
        self.publish_committed()
    }

    fn remove(&self, position: usize) -> Result<(), BookmarkError> {
        self.remove_many(&[position])
    }

    fn remove_many(&self, positions: &[usize]) -> Result<(), BookmarkError> {
        self.ensure_not_publishing()?;

        let mut ids = Vec::with_capacity(positions.len());
        {
            let results = self.results.borrow();
            for &pos in positions {
                let image = results
                    .object_at(pos)
                    .ok_or(BookmarkError::InvalidPosition(pos))?;
                if !ids.contains(&image.id) {
                    ids.push(image.id.clone());
                }
            }
        }

        if ids.is_empty() {
            return Ok(());
        }

        // One transaction: either every delete lands or none does.
        if let Err(e) = self.delete_ids(&ids) {
            warn!(error = %e, count = ids.len(), "could not delete bookmarks");
            return Err(e);
        }

        debug!(count = ids.len(), "bookmarks deleted");
        self.publish_committed()
    }

    fn query(&self) -> Vec<BookmarkedImage> {
        self.results.borrow().fetched_objects().to_vec()
    }

    fn contains(&self, regular_size_url: &str) -> bool {
        match self.url_exists(regular_size_url) {
            Ok(exists) => exists,
            Err(e) => {
                warn!(error = %e, url = regular_size_url, "could not look up bookmark");
                false
            }
        }
    }
}
