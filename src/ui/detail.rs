//! Detail panel driven by selection events.
//!
//! The view is either empty (placeholder, hidden badge) or populated with
//! one shared person. The badge, fields and tag chips are all read from
//! the person whenever the panel is drawn, so edits made by the book show
//! up without a new selection.

use std::rc::Rc;

use crate::bus::{EventBus, Subscription};
use crate::model::{PersonChanged, SharedPerson};
use crate::palette::{self, RgbColor, DEFAULT_TAG_COLOR};
use crate::phone;

/// Badge radius while a person is shown. The empty panel uses zero.
pub const ACCENT_RADIUS: u16 = 2;

const PLACEHOLDER: &str = "Select a contact";

#[derive(Debug, Clone)]
pub struct SelectionChanged {
    pub new_selection: Option<SharedPerson>,
}

impl SelectionChanged {
    pub fn to(person: SharedPerson) -> Self {
        Self {
            new_selection: Some(person),
        }
    }

    pub fn cleared() -> Self {
        Self {
            new_selection: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accent {
    pub initials: String,
    pub color: RgbColor,
    pub radius: u16,
}

impl Accent {
    fn hidden() -> Self {
        Self {
            initials: String::new(),
            color: palette::BLUE,
            radius: 0,
        }
    }

    fn for_initials(initials: String) -> Self {
        let color = palette::accent_for(&initials);
        Self {
            initials,
            color,
            radius: ACCENT_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub label: String,
    pub color: RgbColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// Everything the panel draws, read at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub accent: Accent,
    pub placeholder: Option<&'static str>,
    pub fields: Vec<DetailField>,
    pub tags: Vec<TagChip>,
}

struct Populated {
    person: SharedPerson,
    watch: Subscription<PersonChanged>,
}

impl Populated {
    fn bind(person: SharedPerson) -> Self {
        let watch = person.watch();
        Self { person, watch }
    }

    fn release(self) {
        self.person.unwatch(&self.watch);
    }
}

enum DetailState {
    Empty,
    Populated(Populated),
}

pub struct DetailView {
    bus: Rc<EventBus<SelectionChanged>>,
    selections: Subscription<SelectionChanged>,
    state: DetailState,
    phone_region: Option<String>,
    transitions: u64,
}

impl DetailView {
    pub fn new(bus: Rc<EventBus<SelectionChanged>>, phone_region: Option<String>) -> Self {
        let selections = bus.subscribe();
        Self {
            bus,
            selections,
            state: DetailState::Empty,
            phone_region,
            transitions: 0,
        }
    }

    /// Handle queued selection events in publish order and clear pending
    /// change notices for the shown person. Returns the number of selection
    /// events handled.
    pub fn pump(&mut self) -> usize {
        let events = self.selections.drain();
        let handled = events.len();
        for event in &events {
            self.on_selection_changed(event);
        }
        self.note_changes();
        handled
    }

    pub fn on_selection_changed(&mut self, event: &SelectionChanged) {
        match &event.new_selection {
            Some(person) => {
                log::info!(
                    "handling SelectionChanged: {}",
                    person.read(|p| p.name().to_string())
                );
                let next = Populated::bind(Rc::clone(person));
                self.transition(DetailState::Populated(next));
            }
            None => {
                log::info!("handling SelectionChanged: cleared");
                self.free_resources();
            }
        }
    }

    /// Drop the shown person and return to the placeholder.
    pub fn free_resources(&mut self) {
        if matches!(self.state, DetailState::Populated(_)) {
            self.transition(DetailState::Empty);
        }
    }

    fn transition(&mut self, next: DetailState) {
        let previous = std::mem::replace(&mut self.state, next);
        if let DetailState::Populated(old) = previous {
            old.release();
        }
        self.transitions += 1;
    }

    fn note_changes(&mut self) {
        if let DetailState::Populated(populated) = &mut self.state {
            let changes = populated.watch.drain().len();
            if changes > 0 {
                log::debug!("shown person changed {} time(s)", changes);
            }
        }
    }

    pub fn is_populated(&self) -> bool {
        matches!(self.state, DetailState::Populated(_))
    }

    pub fn current(&self) -> Option<&SharedPerson> {
        match &self.state {
            DetailState::Populated(populated) => Some(&populated.person),
            DetailState::Empty => None,
        }
    }

    /// Number of state transitions so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Everything the panel shows, taken from one read of the person so
    /// the badge, fields and chips always describe the same value.
    pub fn panel(&self) -> DetailPanel {
        let DetailState::Populated(populated) = &self.state else {
            return DetailPanel {
                accent: Accent::hidden(),
                placeholder: Some(PLACEHOLDER),
                fields: Vec::new(),
                tags: Vec::new(),
            };
        };

        populated.person.read(|p| {
            let mut fields = vec![
                DetailField {
                    label: "Name",
                    value: p.name().to_string(),
                },
                DetailField {
                    label: "Phone",
                    value: p.phone().to_string(),
                },
            ];
            if let Some(intl) =
                phone::international(p.phone().as_str(), self.phone_region.as_deref())
            {
                fields.push(DetailField {
                    label: "Intl",
                    value: intl,
                });
            }
            fields.push(DetailField {
                label: "Email",
                value: p.email().to_string(),
            });
            fields.push(DetailField {
                label: "Address",
                value: p.address().to_string(),
            });

            let tags = p
                .tags()
                .iter()
                .map(|tag| TagChip {
                    label: tag.label().to_string(),
                    color: p.tag_colors().get(tag).unwrap_or(DEFAULT_TAG_COLOR),
                })
                .collect();

            DetailPanel {
                accent: Accent::for_initials(p.name().initials()),
                placeholder: None,
                fields,
                tags,
            }
        })
    }
}

impl Drop for DetailView {
    fn drop(&mut self) {
        self.free_resources();
        self.bus.unsubscribe(self.selections.id());
    }
}
