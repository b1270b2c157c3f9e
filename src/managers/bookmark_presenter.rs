//! Bookmark list presentation state.
//!
//! [`BookmarkPresenter`] mirrors the store's sorted bookmarks for a list view
//! and forwards the store's change events. `BeginBatch`, `Insert` and `Delete`
//! pass through untouched. On `EndBatch` the snapshot is replaced from
//! [`BookmarkStoreTrait::query`] before the event is forwarded, so a listener
//! reacting to `EndBatch` reads a snapshot that matches the positions it has
//! just applied. The snapshot is never patched from individual events.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use crate::managers::change_bus::{ChangeBus, SubscriptionId};
use crate::types::bookmark::BookmarkedImage;
use crate::types::change::ChangeEvent;
use crate::types::errors::BookmarkError;

pub struct BookmarkPresenter {
    store: Rc<BookmarkStore>,
    images: RefCell<Vec<BookmarkedImage>>,
    edit_enabled: Cell<bool>,
    changes: ChangeBus,
    subscription: Cell<Option<SubscriptionId>>,
    swipe_to_delete_active: Cell<bool>,
}

/// What the list view should do after an edit-mode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTransition {
    /// Multi-select editing turned on or off; show or hide the delete action.
    Editing(bool),
    /// A swipe-to-delete gesture finished; restore the edit action.
    SwipeEnded,
    /// Editing was requested while a swipe gesture owns the row.
    Ignored,
}

impl BookmarkPresenter {
    /// Creates a presenter subscribed to `store`'s changes.
    pub fn new(store: Rc<BookmarkStore>) -> Rc<Self> {
        let images = store.query();
        let presenter = Rc::new(Self {
            edit_enabled: Cell::new(!images.is_empty()),
            images: RefCell::new(images),
            store: Rc::clone(&store),
            changes: ChangeBus::new(),
            subscription: Cell::new(None),
            swipe_to_delete_active: Cell::new(false),
        });

        let weak: Weak<Self> = Rc::downgrade(&presenter);
        let id = store.changes().subscribe(move |event| {
            if let Some(presenter) = weak.upgrade() {
                presenter.handle_store_change(*event);
            }
        });
        presenter.subscription.set(Some(id));
        presenter
    }

    /// Events re-published for the display surface.
    pub fn changes(&self) -> &ChangeBus {
        &self.changes
    }

    fn handle_store_change(&self, event: ChangeEvent) {
        match event {
            ChangeEvent::BeginBatch | ChangeEvent::Insert(_) | ChangeEvent::Delete(_) => {
                self.changes.emit(event);
            }
            ChangeEvent::EndBatch => {
                let images = self.store.query();
                self.edit_enabled.set(!images.is_empty());
                *self.images.borrow_mut() = images;
                self.changes.emit(event);
            }
        }
    }

    /// The mirrored snapshot, in display order.
    pub fn images(&self) -> Vec<BookmarkedImage> {
        self.images.borrow().clone()
    }

    pub fn image_count(&self) -> usize {
        self.images.borrow().len()
    }

    /// Whether the list has anything to edit. Recomputed once per `EndBatch`.
    pub fn edit_enabled(&self) -> bool {
        self.edit_enabled.get()
    }

    pub fn image(&self, index: usize) -> Option<BookmarkedImage> {
        self.images.borrow().get(index).cloned()
    }

    pub fn title(&self, index: usize) -> String {
        self.image(index).and_then(|i| i.title).unwrap_or_default()
    }

    pub fn regular_size_url(&self, index: usize) -> String {
        self.image(index)
            .map(|i| i.regular_size_url)
            .unwrap_or_default()
    }

    pub fn large_thumb_size_url(&self, index: usize) -> String {
        self.image(index)
            .map(|i| i.large_thumb_size_url)
            .unwrap_or_default()
    }

    /// Marks the start of a single-row swipe-to-delete gesture.
    pub fn begin_swipe_to_delete(&self) {
        self.swipe_to_delete_active.set(true);
    }

    pub fn swipe_to_delete_active(&self) -> bool {
        self.swipe_to_delete_active.get()
    }

    /// Edit-mode changes requested by the list view. A swipe gesture puts the
    /// view into editing on its own; its end must not be mistaken for the
    /// user leaving multi-select mode.
    pub fn set_editing(&self, editing: bool) -> EditTransition {
        if !self.swipe_to_delete_active.get() {
            EditTransition::Editing(editing)
        } else if !editing {
            self.swipe_to_delete_active.set(false);
            EditTransition::SwipeEnded
        } else {
            EditTransition::Ignored
        }
    }

    pub fn delete_bookmark(&self, index: usize) -> Result<(), BookmarkError> {
        self.store.remove(index)
    }

    pub fn delete_bookmarks(&self, indexes: &[usize]) -> Result<(), BookmarkError> {
        self.store.remove_many(indexes)
    }
}

impl Drop for BookmarkPresenter {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.store.changes().unsubscribe(id);
        }
    }
}
