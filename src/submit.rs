//! The add pipeline: validate, normalize tags, assemble, execute, classify.

use crate::command::{
    edit_success_message, success_message, Command, CommandError, CommandFacility,
    MESSAGE_DUPLICATE_PERSON,
};
use crate::form::{self, InvalidFields, RawFormInput};
use crate::model::{Person, PersonId, TagParseError};
use crate::notify::{self, Notification};

/// What a submitted form is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Add,
    Edit(PersonId),
}

impl Intent {
    fn command(self, person: Person) -> Command {
        match self {
            Intent::Add => Command::Add(person),
            Intent::Edit(target) => Command::Edit { target, person },
        }
    }

    fn expected_feedback(self, person: &Person) -> String {
        match self {
            Intent::Add => success_message(person),
            Intent::Edit(_) => edit_success_message(person),
        }
    }
}

/// What became of one submitted person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success(Person),
    /// The facility already holds this person; carries its message.
    DuplicateEntry(String),
    DuplicateTag,
    OtherFailure(String),
    /// The facility returned normally but not with the expected success
    /// feedback. Never treated as success.
    AnomalousFeedback(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }
}

/// Hand `person` to the facility as an add and classify the result.
///
/// Success is recognized by comparing the returned feedback with
/// [`success_message`] for this person, byte for byte.
pub fn submit(facility: &mut dyn CommandFacility, person: Person) -> SubmissionOutcome {
    submit_as(facility, Intent::Add, person)
}

pub fn submit_as(
    facility: &mut dyn CommandFacility,
    intent: Intent,
    person: Person,
) -> SubmissionOutcome {
    let expected = intent.expected_feedback(&person);
    let command = intent.command(person.clone());
    let word = command.word();
    match facility.execute(command) {
        Ok(result) if result.feedback_to_user == expected => {
            log::info!("{} {}", word, person.name());
            SubmissionOutcome::Success(person)
        }
        Ok(result) => {
            log::warn!(
                "{} returned unexpected feedback {:?} (expected {:?})",
                word,
                result.feedback_to_user,
                expected
            );
            SubmissionOutcome::AnomalousFeedback(result.feedback_to_user)
        }
        Err(CommandError::DuplicateTag) => SubmissionOutcome::DuplicateTag,
        Err(CommandError::Command { message }) if message == MESSAGE_DUPLICATE_PERSON => {
            SubmissionOutcome::DuplicateEntry(message)
        }
        Err(CommandError::Command { message }) => {
            log::error!("{} failed: {}", word, message);
            SubmissionOutcome::OtherFailure(message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Invalid(InvalidFields),
    Submitted(SubmissionOutcome),
}

/// Result of one confirm: what happened and the one notification to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub outcome: FormOutcome,
    pub notification: Notification,
}

impl SubmissionReport {
    pub fn added(&self) -> Option<&Person> {
        match &self.outcome {
            FormOutcome::Submitted(SubmissionOutcome::Success(person)) => Some(person),
            _ => None,
        }
    }
}

/// Run the whole add pipeline for one form submission.
///
/// A repeated tag is caught before the facility is called.
pub fn submit_form(facility: &mut dyn CommandFacility, input: &RawFormInput) -> SubmissionReport {
    submit_form_as(facility, Intent::Add, input)
}

pub fn submit_form_as(
    facility: &mut dyn CommandFacility,
    intent: Intent,
    input: &RawFormInput,
) -> SubmissionReport {
    let valid = match form::validate(input) {
        Ok(valid) => valid,
        Err(invalid) => {
            log::debug!("rejected form with {} invalid field(s)", invalid.failures.len());
            let notification = notify::present_invalid(&invalid);
            return SubmissionReport {
                outcome: FormOutcome::Invalid(invalid),
                notification,
            };
        }
    };

    let outcome = match valid.tag_set() {
        Ok(tags) => submit_as(facility, intent, valid.assemble(tags)),
        Err(TagParseError::Duplicate { label }) => {
            log::debug!("duplicate tag `{}` in form", label);
            SubmissionOutcome::DuplicateTag
        }
        // Format errors were reported by validate(); reaching here means the
        // tag list and per-tag validators disagree.
        Err(TagParseError::Format(err)) => SubmissionOutcome::OtherFailure(err.to_string()),
    };

    let notification = match intent {
        Intent::Add => notify::present(&outcome),
        Intent::Edit(_) => notify::present_edit(&outcome),
    };
    SubmissionReport {
        outcome: FormOutcome::Submitted(outcome),
        notification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandResult;
    use crate::model::person::fixtures::person;

    /// Facility that answers every command with a canned result.
    struct Scripted {
        reply: Result<CommandResult, CommandError>,
        calls: usize,
    }

    impl Scripted {
        fn new(reply: Result<CommandResult, CommandError>) -> Self {
            Self { reply, calls: 0 }
        }
    }

    impl CommandFacility for Scripted {
        fn execute(&mut self, _command: Command) -> Result<CommandResult, CommandError> {
            self.calls += 1;
            self.reply.clone()
        }
    }

    #[test]
    fn test_matching_feedback_is_success() {
        let p = person("John Doe", "98765432", "friend");
        let mut facility = Scripted::new(Ok(CommandResult::new(success_message(&p))));
        assert_eq!(submit(&mut facility, p.clone()), SubmissionOutcome::Success(p));
        assert_eq!(facility.calls, 1);
    }

    #[test]
    fn test_mismatched_feedback_is_anomalous() {
        let p = person("John Doe", "98765432", "friend");
        let near = format!("{} ", success_message(&p));
        let mut facility = Scripted::new(Ok(CommandResult::new(near.clone())));
        assert_eq!(
            submit(&mut facility, p),
            SubmissionOutcome::AnomalousFeedback(near)
        );
    }

    #[test]
    fn test_duplicate_person_message() {
        let mut facility = Scripted::new(Err(CommandError::command(MESSAGE_DUPLICATE_PERSON)));
        assert_eq!(
            submit(&mut facility, person("Ann", "123", "")),
            SubmissionOutcome::DuplicateEntry(MESSAGE_DUPLICATE_PERSON.to_string())
        );
    }

    #[test]
    fn test_other_error_keeps_message() {
        let mut facility = Scripted::new(Err(CommandError::command("disk on fire")));
        assert_eq!(
            submit(&mut facility, person("Ann", "123", "")),
            SubmissionOutcome::OtherFailure("disk on fire".to_string())
        );
    }

    #[test]
    fn test_facility_duplicate_tag() {
        let mut facility = Scripted::new(Err(CommandError::DuplicateTag));
        assert_eq!(
            submit(&mut facility, person("Ann", "123", "")),
            SubmissionOutcome::DuplicateTag
        );
    }

    #[test]
    fn test_duplicate_tags_never_reach_facility() {
        let mut facility = Scripted::new(Err(CommandError::command("unreachable")));
        let input = RawFormInput {
            name: "John Doe".into(),
            phone: "98765432".into(),
            email: "john@example.com".into(),
            address: "123 Clementi Rd".into(),
            tags: "friend,friend".into(),
        };
        let report = submit_form(&mut facility, &input);
        assert_eq!(
            report.outcome,
            FormOutcome::Submitted(SubmissionOutcome::DuplicateTag)
        );
        assert_eq!(facility.calls, 0);
        assert!(report.added().is_none());
    }

    #[test]
    fn test_edit_sends_edit_and_expects_edit_feedback() {
        use crate::book::AddressBook;
        use crate::notify::TerminalAction;

        let mut book = AddressBook::new();
        book.execute(Command::Add(person("Ann", "123", ""))).unwrap();
        let target = book.get(0).unwrap().id();

        let mut input = RawFormInput::from(&book.get(0).unwrap().snapshot());
        input.name = "Ann Lee".into();
        let report = submit_form_as(&mut book, Intent::Edit(target), &input);

        assert_eq!(
            report.added().map(|p| p.name().to_string()),
            Some("Ann Lee".to_string())
        );
        assert_eq!(report.notification.action, TerminalAction::Close);
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(0).unwrap().read(|p| p.name().to_string()), "Ann Lee");

        // Add feedback does not count as a successful edit
        let p = person("Bob", "456", "");
        let mut facility = Scripted::new(Ok(CommandResult::new(success_message(&p))));
        assert!(matches!(
            submit_as(&mut facility, Intent::Edit(target), p),
            SubmissionOutcome::AnomalousFeedback(_)
        ));
    }

    #[test]
    fn test_invalid_form_never_reaches_facility() {
        let mut facility = Scripted::new(Err(CommandError::command("unreachable")));
        let report = submit_form(&mut facility, &RawFormInput::default());
        assert!(matches!(report.outcome, FormOutcome::Invalid(_)));
        assert_eq!(facility.calls, 0);
    }
}
