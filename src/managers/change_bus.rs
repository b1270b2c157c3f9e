//! Typed publish/subscribe channel for bookmark change notifications.
//!
//! A [`ChangeBus`] lives on the UI thread. Listeners run synchronously, in
//! subscription order, for every emitted [`ChangeEvent`]. Subscribing or
//! unsubscribing from inside a listener is allowed and takes effect with the
//! next emitted event.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::types::change::ChangeEvent;

/// Handle returned by [`ChangeBus::subscribe`], used to unsubscribe.
pub type SubscriptionId = u64;

type Listener = Rc<dyn Fn(&ChangeEvent)>;

/// Single-threaded event channel owned by a data source.
#[derive(Default)]
pub struct ChangeBus {
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<SubscriptionId>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns its subscription handle.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Delivers one event to every current listener.
    pub fn emit(&self, event: ChangeEvent) {
        // Snapshot so listeners may (un)subscribe without a borrow conflict.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }

    /// Emits `BeginBatch`, the given mutations in order, then `EndBatch`.
    pub fn emit_batch<I>(&self, mutations: I)
    where
        I: IntoIterator<Item = ChangeEvent>,
    {
        self.emit(ChangeEvent::BeginBatch);
        for event in mutations {
            debug_assert!(event.is_mutation(), "batch body must only hold mutations");
            self.emit(event);
        }
        self.emit(ChangeEvent::EndBatch);
    }
}
