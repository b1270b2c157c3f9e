//! Bookmark membership of a single image, for the detail screen.
//!
//! [`ImageMembership`] answers "is this image bookmarked?" and lets the user
//! bookmark it. Its own [`ChangeBus`] publishes `BeginBatch, Insert(0), EndBatch`
//! when the image becomes bookmarked and `BeginBatch, Delete(0), EndBatch` when
//! it stops being bookmarked (for example after a delete from the bookmark
//! list), which is all an "add" button needs to update itself.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use tracing::warn;

use crate::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use crate::managers::change_bus::{ChangeBus, SubscriptionId};
use crate::types::change::ChangeEvent;
use crate::types::errors::BookmarkError;

pub struct ImageMembership {
    store: Rc<BookmarkStore>,
    regular_size_url: String,
    bookmarked: Cell<bool>,
    changes: ChangeBus,
    subscription: Cell<Option<SubscriptionId>>,
}

impl ImageMembership {
    pub fn new(store: Rc<BookmarkStore>, regular_size_url: &str) -> Rc<Self> {
        let membership = Rc::new(Self {
            bookmarked: Cell::new(store.contains(regular_size_url)),
            regular_size_url: regular_size_url.to_string(),
            store: Rc::clone(&store),
            changes: ChangeBus::new(),
            subscription: Cell::new(None),
        });

        let weak: Weak<Self> = Rc::downgrade(&membership);
        let id = store.changes().subscribe(move |event| {
            if *event == ChangeEvent::EndBatch {
                if let Some(membership) = weak.upgrade() {
                    membership.recheck();
                }
            }
        });
        membership.subscription.set(Some(id));
        membership
    }

    pub fn changes(&self) -> &ChangeBus {
        &self.changes
    }

    pub fn regular_size_url(&self) -> &str {
        &self.regular_size_url
    }

    pub fn is_bookmarked(&self) -> bool {
        self.store.contains(&self.regular_size_url)
    }

    /// Bookmarks the image. Emits `Insert(0)` locally as soon as the store has
    /// accepted it; the store's own batch will not produce a second one.
    pub fn toggle_add(
        &self,
        title: Option<&str>,
        large_thumb_size_url: &str,
    ) -> Result<(), BookmarkError> {
        if let Err(e) = self
            .store
            .add(title, &self.regular_size_url, large_thumb_size_url)
        {
            warn!(error = %e, url = %self.regular_size_url, "could not bookmark image");
            return Err(e);
        }
        self.set_bookmarked(true);
        Ok(())
    }

    fn recheck(&self) {
        self.set_bookmarked(self.store.contains(&self.regular_size_url));
    }

    fn set_bookmarked(&self, bookmarked: bool) {
        if self.bookmarked.replace(bookmarked) == bookmarked {
            return;
        }
        let event = if bookmarked {
            ChangeEvent::Insert(0)
        } else {
            ChangeEvent::Delete(0)
        };
        self.changes.emit_batch([event]);
    }
}

impl Drop for ImageMembership {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.store.changes().unsubscribe(id);
        }
    }
}
