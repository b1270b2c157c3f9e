//! Unit tests for the ChangeBus publish/subscribe channel.

use std::cell::RefCell;
use std::rc::Rc;

use imagebrowser::managers::change_bus::ChangeBus;
use imagebrowser::types::change::ChangeEvent;

fn record(bus: &ChangeBus) -> Rc<RefCell<Vec<ChangeEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    bus.subscribe(move |event| sink.borrow_mut().push(*event));
    log
}

#[test]
fn test_every_listener_sees_events_in_emission_order() {
    let bus = ChangeBus::new();
    let first = record(&bus);
    let second = record(&bus);

    bus.emit_batch([ChangeEvent::Delete(3), ChangeEvent::Insert(0)]);

    let expected = vec![
        ChangeEvent::BeginBatch,
        ChangeEvent::Delete(3),
        ChangeEvent::Insert(0),
        ChangeEvent::EndBatch,
    ];
    assert_eq!(*first.borrow(), expected);
    assert_eq!(*second.borrow(), expected);
}

#[test]
fn test_empty_batch_is_still_bracketed() {
    let bus = ChangeBus::new();
    let log = record(&bus);
    bus.emit_batch([]);
    assert_eq!(*log.borrow(), vec![ChangeEvent::BeginBatch, ChangeEvent::EndBatch]);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let bus = ChangeBus::new();
    let log = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&log);
    let id = bus.subscribe(move |_| *sink.borrow_mut() += 1);

    bus.emit(ChangeEvent::BeginBatch);
    assert!(bus.unsubscribe(id));
    bus.emit(ChangeEvent::EndBatch);

    assert_eq!(*log.borrow(), 1);
    assert_eq!(bus.listener_count(), 0);
    assert!(!bus.unsubscribe(id), "second unsubscribe is a no-op");
}

#[test]
fn test_listener_may_unsubscribe_itself_during_emit() {
    let bus = Rc::new(ChangeBus::new());
    let calls = Rc::new(RefCell::new(0));
    let id_cell = Rc::new(RefCell::new(None));

    let weak_bus = Rc::downgrade(&bus);
    let sink = Rc::clone(&calls);
    let own_id = Rc::clone(&id_cell);
    let id = bus.subscribe(move |_| {
        *sink.borrow_mut() += 1;
        if let (Some(bus), Some(id)) = (weak_bus.upgrade(), *own_id.borrow()) {
            bus.unsubscribe(id);
        }
    });
    *id_cell.borrow_mut() = Some(id);

    bus.emit(ChangeEvent::BeginBatch);
    bus.emit(ChangeEvent::EndBatch);

    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_subscription_ids_are_distinct() {
    let bus = ChangeBus::new();
    let a = bus.subscribe(|_| {});
    let b = bus.subscribe(|_| {});
    assert_ne!(a, b);
    assert_eq!(bus.listener_count(), 2);
}
