//! Single-threaded publish/subscribe.
//!
//! Each subscriber owns a queue. `publish` appends a clone of the event to
//! every live queue, so a subscriber sees events in publish order and drains
//! them whenever its owner pumps it. Dropping a [`Subscription`] closes its
//! queue; the bus forgets closed queues on the next publish.

use std::cell::{Cell, RefCell};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct EventBus<E> {
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, Sender<E>)>>,
}

impl<E: Clone> EventBus<E> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> Subscription<E> {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let (sender, receiver) = mpsc::channel();
        self.subscribers.borrow_mut().push((id, sender));
        Subscription { id, receiver }
    }

    /// Stop delivering to `id`. Events already queued stay readable.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    /// Queue `event` for every subscriber. Returns how many received it.
    pub fn publish(&self, event: E) -> usize {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|(_, sender)| sender.send(event.clone()).is_ok());
        log::trace!("event delivered to {} subscriber(s)", subscribers.len());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Subscription<E> {
    id: SubscriptionId,
    receiver: Receiver<E>,
}

impl<E> Subscription<E> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Next queued event, if any.
    pub fn try_next(&self) -> Option<E> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// All queued events, oldest first.
    pub fn drain(&self) -> Vec<E> {
        self.receiver.try_iter().collect()
    }
}
