//! User-facing notifications for add and edit results.

use crate::form::InvalidFields;
use crate::model::tag::MESSAGE_DUPLICATE_TAGS;
use crate::submit::SubmissionOutcome;

pub const ADD_COMMAND_TITLE: &str = "AddressBook Add Command";
pub const ADD_WINDOW_TITLE: &str = "Add Person";
pub const ADD_SUCCESS_HEADER: &str = "Add Successful";
pub const ADD_SUCCESS_MESSAGE: &str = "Person added successfully";
pub const ADD_FAILED_HEADER: &str = "Add Unsuccessful";
pub const ERROR_HEADER: &str = "Error";
pub const ADD_ERROR_MESSAGE: &str = "An unexpected error has occurred. Please try again.";
pub const EDIT_COMMAND_TITLE: &str = "AddressBook Edit Command";
pub const EDIT_WINDOW_TITLE: &str = "Edit Person";
pub const EDIT_SUCCESS_HEADER: &str = "Edit Successful";
pub const EDIT_SUCCESS_MESSAGE: &str = "Person edited successfully";
pub const EDIT_FAILED_HEADER: &str = "Edit Unsuccessful";
pub const INVALID_FIELDS_TITLE: &str = "Invalid Fields";
pub const INVALID_FIELDS_HEADER: &str = "Please correct invalid fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// What the add dialog does once the notification is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalAction {
    Close,
    KeepOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub header: String,
    pub body: String,
    pub action: TerminalAction,
}

impl Notification {
    fn error(title: &str, header: &str, body: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.to_string(),
            header: header.to_string(),
            body: body.into(),
            action: TerminalAction::KeepOpen,
        }
    }
}

/// Titles and headers that differ between the add and edit dialogs.
struct Wording {
    command_title: &'static str,
    window_title: &'static str,
    success_header: &'static str,
    success_body: &'static str,
    failed_header: &'static str,
}

const ADD_WORDING: Wording = Wording {
    command_title: ADD_COMMAND_TITLE,
    window_title: ADD_WINDOW_TITLE,
    success_header: ADD_SUCCESS_HEADER,
    success_body: ADD_SUCCESS_MESSAGE,
    failed_header: ADD_FAILED_HEADER,
};

const EDIT_WORDING: Wording = Wording {
    command_title: EDIT_COMMAND_TITLE,
    window_title: EDIT_WINDOW_TITLE,
    success_header: EDIT_SUCCESS_HEADER,
    success_body: EDIT_SUCCESS_MESSAGE,
    failed_header: EDIT_FAILED_HEADER,
};

pub fn present(outcome: &SubmissionOutcome) -> Notification {
    present_with(&ADD_WORDING, outcome)
}

pub fn present_edit(outcome: &SubmissionOutcome) -> Notification {
    present_with(&EDIT_WORDING, outcome)
}

fn present_with(wording: &Wording, outcome: &SubmissionOutcome) -> Notification {
    match outcome {
        SubmissionOutcome::Success(_) => Notification {
            severity: Severity::Info,
            title: wording.command_title.to_string(),
            header: wording.success_header.to_string(),
            body: wording.success_body.to_string(),
            action: TerminalAction::Close,
        },
        SubmissionOutcome::DuplicateEntry(message) => {
            Notification::error(wording.window_title, wording.failed_header, message.clone())
        }
        SubmissionOutcome::DuplicateTag => {
            Notification::error(wording.window_title, ERROR_HEADER, MESSAGE_DUPLICATE_TAGS)
        }
        SubmissionOutcome::OtherFailure(_) | SubmissionOutcome::AnomalousFeedback(_) => {
            Notification::error(wording.command_title, ERROR_HEADER, ADD_ERROR_MESSAGE)
        }
    }
}

pub fn present_invalid(invalid: &InvalidFields) -> Notification {
    Notification::error(INVALID_FIELDS_TITLE, INVALID_FIELDS_HEADER, invalid.message())
}
