//! Unit tests for ImageMembership on the detail screen.

use std::cell::RefCell;
use std::rc::Rc;

use imagebrowser::database::Database;
use imagebrowser::managers::bookmark_presenter::BookmarkPresenter;
use imagebrowser::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use imagebrowser::managers::image_membership::ImageMembership;
use imagebrowser::types::change::ChangeEvent;
use imagebrowser::types::errors::BookmarkError;

fn create_store() -> Rc<BookmarkStore> {
    let db = Rc::new(Database::open_in_memory().unwrap());
    Rc::new(BookmarkStore::new(db).unwrap())
}

fn record(membership: &ImageMembership) -> Rc<RefCell<Vec<ChangeEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    membership
        .changes()
        .subscribe(move |event| sink.borrow_mut().push(*event));
    log
}

#[test]
fn test_bookmark_then_delete_from_list() {
    let store = create_store();
    let presenter = BookmarkPresenter::new(Rc::clone(&store));
    let membership = ImageMembership::new(Rc::clone(&store), "https://x/1");
    let events = record(&membership);

    assert!(!membership.is_bookmarked());

    membership.toggle_add(Some("one"), "https://x/1&w=200").unwrap();
    assert!(membership.is_bookmarked());

    presenter.delete_bookmark(0).unwrap();
    assert!(!membership.is_bookmarked());

    assert_eq!(
        *events.borrow(),
        vec![
            ChangeEvent::BeginBatch,
            ChangeEvent::Insert(0),
            ChangeEvent::EndBatch,
            ChangeEvent::BeginBatch,
            ChangeEvent::Delete(0),
            ChangeEvent::EndBatch,
        ]
    );
}

#[test]
fn test_toggle_add_emits_exactly_one_insert() {
    let store = create_store();
    let membership = ImageMembership::new(Rc::clone(&store), "https://x/1");
    let events = record(&membership);

    membership.toggle_add(None, "t").unwrap();

    let inserts = events
        .borrow()
        .iter()
        .filter(|e| matches!(e, ChangeEvent::Insert(_)))
        .count();
    assert_eq!(inserts, 1);
}

#[test]
fn test_already_bookmarked_image() {
    let store = create_store();
    store.add(None, "https://x/1", "t").unwrap();

    let membership = ImageMembership::new(Rc::clone(&store), "https://x/1");
    assert!(membership.is_bookmarked());
    let events = record(&membership);

    let result = membership.toggle_add(None, "t");

    assert!(matches!(result, Err(BookmarkError::DuplicateUrl(_))));
    assert!(events.borrow().is_empty());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_other_images_do_not_notify() {
    let store = create_store();
    let membership = ImageMembership::new(Rc::clone(&store), "https://x/1");
    let events = record(&membership);

    store.add(None, "https://x/10", "t").unwrap();
    store.add(None, "https://x/2", "t").unwrap();
    store.remove(0).unwrap();

    assert!(events.borrow().is_empty());
    assert!(!membership.is_bookmarked());
}

#[test]
fn test_bookmark_added_through_store_is_noticed() {
    let store = create_store();
    let membership = ImageMembership::new(Rc::clone(&store), "https://x/1");
    let events = record(&membership);

    store.add(None, "https://x/1", "t").unwrap();

    assert_eq!(events.borrow().get(1), Some(&ChangeEvent::Insert(0)));
    assert_eq!(membership.regular_size_url(), "https://x/1");
}

#[test]
fn test_drop_unsubscribes_from_store() {
    let store = create_store();
    let membership = ImageMembership::new(Rc::clone(&store), "https://x/1");
    assert_eq!(store.changes().listener_count(), 1);
    drop(membership);
    assert_eq!(store.changes().listener_count(), 0);
}
