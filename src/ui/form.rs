use crossterm::event::{Event, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::command::CommandFacility;
use crate::form::RawFormInput;
use crate::model::{Person, PersonId};
use crate::submit::{self, Intent, SubmissionReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    Email,
    Address,
    Tags,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Phone,
        FormField::Email,
        FormField::Address,
        FormField::Tags,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "NAME",
            FormField::Phone => "PHONE",
            FormField::Email => "EMAIL",
            FormField::Address => "ADDRESS",
            FormField::Tags => "TAGS",
        }
    }

    pub fn index(self) -> usize {
        match self {
            FormField::Name => 0,
            FormField::Phone => 1,
            FormField::Email => 2,
            FormField::Address => 3,
            FormField::Tags => 4,
        }
    }

    /// Next field, wrapping to the first
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous field, wrapping to the last
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The add/edit person dialog: five text inputs and a confirm action.
pub struct PersonDialog {
    inputs: [Input; 5],
    focus: usize,
    intent: Intent,
}

impl Default for PersonDialog {
    fn default() -> Self {
        Self {
            inputs: Default::default(),
            focus: 0,
            intent: Intent::Add,
        }
    }
}

impl PersonDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dialog pre-filled with `person`, confirming as an edit of `target`.
    pub fn editing(target: PersonId, person: &Person) -> Self {
        let raw = RawFormInput::from(person);
        let mut dialog = Self {
            intent: Intent::Edit(target),
            ..Self::default()
        };
        dialog.set_value(FormField::Name, &raw.name);
        dialog.set_value(FormField::Phone, &raw.phone);
        dialog.set_value(FormField::Email, &raw.email);
        dialog.set_value(FormField::Address, &raw.address);
        dialog.set_value(FormField::Tags, &raw.tags);
        dialog
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn title(&self) -> &'static str {
        match self.intent {
            Intent::Add => "ADD PERSON",
            Intent::Edit(_) => "EDIT PERSON",
        }
    }

    pub fn focus(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus().next().index();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus().prev().index();
    }

    pub fn value(&self, field: FormField) -> &str {
        self.inputs[field.index()].value()
    }

    pub fn set_value(&mut self, field: FormField, value: &str) {
        self.inputs[field.index()] = Input::new(value.to_string());
    }

    pub fn visual_cursor(&self) -> usize {
        self.inputs[self.focus].visual_cursor()
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        self.inputs[self.focus]
            .handle_event(&Event::Key(key))
            .is_some()
    }

    pub fn raw_input(&self) -> RawFormInput {
        RawFormInput {
            name: self.value(FormField::Name).to_string(),
            phone: self.value(FormField::Phone).to_string(),
            email: self.value(FormField::Email).to_string(),
            address: self.value(FormField::Address).to_string(),
            tags: self.value(FormField::Tags).to_string(),
        }
    }

    /// Submit the current input once. The caller shows the notification
    /// and closes the dialog when it says so.
    pub fn confirm(&self, facility: &mut dyn CommandFacility) -> SubmissionReport {
        submit::submit_form_as(facility, self.intent, &self.raw_input())
    }
}
