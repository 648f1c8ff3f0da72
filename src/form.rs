//! Raw add-form input, aggregated validation, and assembly into a
//! [`Person`].

use thiserror::Error;

use crate::model::{
    Address, Email, Field, FieldFormatError, Name, Person, Phone, TagList, TagParseError, TagSet,
};

/// Text exactly as typed into the add form. Accessors trim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFormInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub tags: String,
}

impl RawFormInput {
    pub fn name(&self) -> &str {
        self.name.trim()
    }

    pub fn phone(&self) -> &str {
        self.phone.trim()
    }

    pub fn email(&self) -> &str {
        self.email.trim()
    }

    pub fn address(&self) -> &str {
        self.address.trim()
    }

    pub fn tags(&self) -> &str {
        self.tags.trim()
    }
}

impl From<&Person> for RawFormInput {
    fn from(person: &Person) -> Self {
        RawFormInput {
            name: person.name().to_string(),
            phone: person.phone().to_string(),
            email: person.email().to_string(),
            address: person.address().to_string(),
            tags: person.tags().to_input_string(),
        }
    }
}

/// Every constraint the input broke, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct InvalidFields {
    pub failures: Vec<FieldFormatError>,
}

impl InvalidFields {
    /// One constraint message per line.
    pub fn message(&self) -> String {
        self.failures
            .iter()
            .map(|failure| failure.constraints)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Input whose fields all passed their validators. Tags are format-checked
/// but not yet normalized.
#[derive(Debug, Clone)]
pub struct ValidForm {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    tags: String,
}

impl ValidForm {
    pub fn raw_tags(&self) -> &str {
        &self.tags
    }

    /// Normalize the tag list; fails on a repeated label.
    pub fn tag_set(&self) -> Result<TagSet, TagParseError> {
        TagSet::parse(&self.tags)
    }

    pub fn assemble(self, tags: TagSet) -> Person {
        Person::new(self.name, self.phone, self.email, self.address, tags)
    }
}

/// Check every field and report all failures at once.
pub fn validate(input: &RawFormInput) -> Result<ValidForm, InvalidFields> {
    let mut failures = Vec::new();

    let name = Name::parse(input.name()).map_err(|e| failures.push(e)).ok();
    let phone = Phone::parse(input.phone()).map_err(|e| failures.push(e)).ok();
    let email = Email::parse(input.email()).map_err(|e| failures.push(e)).ok();
    let address = Address::parse(input.address())
        .map_err(|e| failures.push(e))
        .ok();

    let tags = input.tags();
    if !tags.is_empty() {
        if let Err(err) = TagList::check(tags) {
            failures.push(err);
        }
    }

    match (name, phone, email, address) {
        (Some(name), Some(phone), Some(email), Some(address)) if failures.is_empty() => {
            Ok(ValidForm {
                name,
                phone,
                email,
                address,
                tags: tags.to_string(),
            })
        }
        _ => Err(InvalidFields { failures }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tag;

    fn john() -> RawFormInput {
        RawFormInput {
            name: "John Doe".into(),
            phone: "98765432".into(),
            email: "john@example.com".into(),
            address: "123 Clementi Rd".into(),
            tags: "friend,colleague".into(),
        }
    }

    #[test]
    fn test_valid_input_assembles_person() {
        let form = validate(&john()).unwrap();
        let tags = form.tag_set().unwrap();
        let person = form.assemble(tags);
        assert_eq!(person.name().as_str(), "John Doe");
        assert_eq!(person.tags().len(), 2);
    }

    #[test]
    fn test_input_is_trimmed() {
        let mut input = john();
        input.name = "  John Doe ".into();
        input.tags = "   ".into();
        let person = {
            let form = validate(&input).unwrap();
            let tags = form.tag_set().unwrap();
            form.assemble(tags)
        };
        assert_eq!(person.name().as_str(), "John Doe");
        assert!(person.tags().is_empty());
    }

    #[test]
    fn test_every_failure_reported() {
        let input = RawFormInput {
            name: "J@hn".into(),
            phone: "12".into(),
            email: "nope".into(),
            address: "".into(),
            tags: "bad tag".into(),
        };
        let err = validate(&input).unwrap_err();
        assert_eq!(err.failures.len(), 5);
        let message = err.message();
        for constraint in [
            Name::CONSTRAINTS,
            Phone::CONSTRAINTS,
            Email::CONSTRAINTS,
            Address::CONSTRAINTS,
            TagList::CONSTRAINTS,
        ] {
            assert!(message.contains(constraint), "missing: {}", constraint);
        }
        assert_eq!(message.lines().count(), 5);
    }

    #[test]
    fn test_single_failure_message() {
        let mut input = john();
        input.email = "john.example.com".into();
        let err = validate(&input).unwrap_err();
        assert_eq!(err.message(), Email::CONSTRAINTS);
        assert_eq!(err.to_string(), err.message());

        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert_eq!(boxed.to_string(), Email::CONSTRAINTS);
    }

    #[test]
    fn test_person_round_trips_into_form_input() {
        let form = validate(&john()).unwrap();
        let tags = form.tag_set().unwrap();
        let person = form.assemble(tags);
        assert_eq!(RawFormInput::from(&person), john());
    }

    #[test]
    fn test_duplicate_tags_pass_validation_but_fail_normalization() {
        let mut input = john();
        input.tags = "friend,friend".into();
        let form = validate(&input).unwrap();
        assert!(matches!(
            form.tag_set(),
            Err(TagParseError::Duplicate { .. })
        ));
        assert!(Tag::is_valid("friend"));
    }
}
