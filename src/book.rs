//! In-memory address book. Executes add and edit commands and owns the
//! shared person records the UI displays.

use std::collections::HashMap;

use crate::command::{
    edit_success_message, success_message, Command, CommandError, CommandFacility, CommandResult,
    MESSAGE_DUPLICATE_PERSON, MESSAGE_INVALID_PERSON,
};
use crate::model::{Person, PersonCell, PersonId, SharedPerson, TagColorMap, TagSet};
use crate::palette::RgbColor;

#[derive(Debug, Default)]
pub struct AddressBook {
    persons: Vec<SharedPerson>,
    /// Case-folded tag label -> color attached to persons carrying that tag.
    tag_colors: HashMap<String, RgbColor>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag_colors(tag_colors: &HashMap<String, RgbColor>) -> Self {
        Self {
            persons: Vec::new(),
            tag_colors: tag_colors
                .iter()
                .map(|(label, color)| (label.trim().to_lowercase(), *color))
                .collect(),
        }
    }

    pub fn persons(&self) -> &[SharedPerson] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SharedPerson> {
        self.persons.get(index)
    }

    pub fn find(&self, id: PersonId) -> Option<&SharedPerson> {
        self.persons.iter().find(|cell| cell.id() == id)
    }

    fn contains_other(&self, person: &Person, except: Option<PersonId>) -> bool {
        self.persons
            .iter()
            .filter(|cell| Some(cell.id()) != except)
            .any(|cell| cell.read(|existing| existing.is_same_person(person)))
    }

    fn colors_for(&self, tags: &TagSet) -> TagColorMap {
        let mut colors = TagColorMap::new();
        for tag in tags {
            if let Some(color) = self.tag_colors.get(tag.key()) {
                colors.insert(tag.clone(), *color);
            }
        }
        colors
    }

    fn add(&mut self, person: Person) -> Result<CommandResult, CommandError> {
        if self.contains_other(&person, None) {
            return Err(CommandError::command(MESSAGE_DUPLICATE_PERSON));
        }

        let feedback = success_message(&person);
        let colors = self.colors_for(person.tags());
        let cell = PersonCell::new(person.with_tag_colors(colors));
        log::debug!("stored person {}", cell.id());
        self.persons.push(cell);
        Ok(CommandResult::new(feedback))
    }

    fn edit(&mut self, target: PersonId, person: Person) -> Result<CommandResult, CommandError> {
        if self.contains_other(&person, Some(target)) {
            return Err(CommandError::command(MESSAGE_DUPLICATE_PERSON));
        }

        let feedback = edit_success_message(&person);
        let colors = self.colors_for(person.tags());
        let cell = self
            .find(target)
            .ok_or_else(|| CommandError::command(MESSAGE_INVALID_PERSON))?;
        cell.replace(person.with_tag_colors(colors));
        Ok(CommandResult::new(feedback))
    }
}

impl CommandFacility for AddressBook {
    fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        log::debug!("executing {}", command.word());
        match command {
            Command::Add(person) => self.add(person),
            Command::Edit { target, person } => self.edit(target, person),
        }
    }
}
