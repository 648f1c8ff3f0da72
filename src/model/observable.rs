//! Shared, observable person records.
//!
//! The address book owns each stored person through a [`PersonCell`]. Views
//! hold the same `Rc` and read the current value at draw time; they learn
//! about replacements through the cell's change bus.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::bus::{EventBus, Subscription};

use super::person::Person;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonId(Uuid);

impl PersonId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonChanged {
    pub id: PersonId,
}

pub type SharedPerson = Rc<PersonCell>;

pub struct PersonCell {
    id: PersonId,
    current: RefCell<Person>,
    changes: EventBus<PersonChanged>,
}

impl PersonCell {
    pub fn new(person: Person) -> SharedPerson {
        Rc::new(Self {
            id: PersonId::new(),
            current: RefCell::new(person),
            changes: EventBus::new(),
        })
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    /// Run `f` against the current value.
    pub fn read<R>(&self, f: impl FnOnce(&Person) -> R) -> R {
        f(&self.current.borrow())
    }

    pub fn snapshot(&self) -> Person {
        self.current.borrow().clone()
    }

    /// Swap in a new value and notify watchers.
    pub fn replace(&self, person: Person) {
        *self.current.borrow_mut() = person;
        self.changes.publish(PersonChanged { id: self.id });
    }

    pub fn watch(&self) -> Subscription<PersonChanged> {
        self.changes.subscribe()
    }

    pub fn unwatch(&self, subscription: &Subscription<PersonChanged>) -> bool {
        self.changes.unsubscribe(subscription.id())
    }

    pub fn watcher_count(&self) -> usize {
        self.changes.subscriber_count()
    }
}

impl fmt::Debug for PersonCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonCell")
            .field("id", &self.id)
            .field("name", &self.current.borrow().name().as_str())
            .finish()
    }
}
