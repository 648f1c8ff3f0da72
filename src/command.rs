//! Boundary to whatever executes commands against the address book.

use std::fmt;

use thiserror::Error;

use crate::model::tag::MESSAGE_DUPLICATE_TAGS;
use crate::model::{Person, PersonId};

pub const MESSAGE_DUPLICATE_PERSON: &str = "This person already exists in the address book";
pub const MESSAGE_INVALID_PERSON: &str = "The person provided is not in the address book";

/// Feedback an add returns when it stores `person`.
pub fn success_message(person: &Person) -> String {
    format!("New person added: {}", person)
}

pub fn edit_success_message(person: &Person) -> String {
    format!("Edited Person: {}", person)
}

#[derive(Debug, Clone)]
pub enum Command {
    Add(Person),
    Edit { target: PersonId, person: Person },
}

impl Command {
    pub fn word(&self) -> &'static str {
        match self {
            Command::Add(_) => "add",
            Command::Edit { .. } => "edit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Add(person) => write!(f, "add {}", person),
            Command::Edit { target, person } => write!(f, "edit {} {}", target, person),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback_to_user: String,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback_to_user: feedback.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{message}")]
    Command { message: String },
    #[error("{}", MESSAGE_DUPLICATE_TAGS)]
    DuplicateTag,
}

impl CommandError {
    pub fn command(message: impl Into<String>) -> Self {
        CommandError::Command {
            message: message.into(),
        }
    }
}

/// Executes commands. Calls are synchronous and never retried by callers.
pub trait CommandFacility {
    fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError>;
}
