//! Constraint-checked contact attributes.
//!
//! Every attribute type pairs a total predicate with a fixed constraint
//! message. The newtypes can only be built through their `parse`, so a
//! value of type `Name` (etc.) always satisfies its predicate.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]][[:alnum:] ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.]+@[\w.]+$").expect("valid email regex"));
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S.*$").expect("valid address regex"));

/// A raw string rejected by a field validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{constraints}")]
pub struct FieldFormatError {
    pub field: &'static str,
    pub constraints: &'static str,
}

/// Predicate and constraint message for one attribute type.
pub trait Field {
    const LABEL: &'static str;
    const CONSTRAINTS: &'static str;

    fn is_valid(raw: &str) -> bool;

    /// Validate without building a value.
    fn check(raw: &str) -> Result<(), FieldFormatError> {
        if Self::is_valid(raw) {
            Ok(())
        } else {
            Err(FieldFormatError {
                field: Self::LABEL,
                constraints: Self::CONSTRAINTS,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Field for Name {
    const LABEL: &'static str = "name";
    const CONSTRAINTS: &'static str =
        "Person names should only contain alphanumeric characters and spaces, and it should not be blank";

    fn is_valid(raw: &str) -> bool {
        NAME_RE.is_match(raw)
    }
}

impl Field for Phone {
    const LABEL: &'static str = "phone";
    const CONSTRAINTS: &'static str =
        "Phone numbers can only contain numbers, and should be at least 3 digits long";

    fn is_valid(raw: &str) -> bool {
        PHONE_RE.is_match(raw)
    }
}

impl Field for Email {
    const LABEL: &'static str = "email";
    const CONSTRAINTS: &'static str =
        "Person emails should be 2 alphanumeric/period strings separated by '@'";

    fn is_valid(raw: &str) -> bool {
        EMAIL_RE.is_match(raw)
    }
}

impl Field for Address {
    const LABEL: &'static str = "address";
    const CONSTRAINTS: &'static str =
        "Person addresses can take any values, and it should not be blank";

    fn is_valid(raw: &str) -> bool {
        ADDRESS_RE.is_match(raw)
    }
}

macro_rules! validated_field {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                /// The only way to build this value.
                pub fn parse(raw: &str) -> Result<Self, FieldFormatError> {
                    <$ty as Field>::check(raw)?;
                    Ok(Self(raw.to_string()))
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

validated_field!(Name, Phone, Email, Address);

impl Name {
    /// First character of the name, used for the avatar badge.
    pub fn initials(&self) -> String {
        self.0.chars().next().map(String::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert!(Name::is_valid("John Doe"));
        assert!(Name::is_valid("Peter the 2nd"));
        assert!(!Name::is_valid(""));
        assert!(!Name::is_valid(" John"));
        assert!(!Name::is_valid("John^"));
        assert!(!Name::is_valid("Jo*hn"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(Phone::is_valid("911"));
        assert!(Phone::is_valid("98765432"));
        assert!(!Phone::is_valid(""));
        assert!(!Phone::is_valid("91"));
        assert!(!Phone::is_valid("9011p041"));
        assert!(!Phone::is_valid("9312 1534"));
    }

    #[test]
    fn test_email_validation() {
        assert!(Email::is_valid("john@example.com"));
        assert!(Email::is_valid("a@b"));
        assert!(Email::is_valid("first.last@mail.example.org"));
        assert!(!Email::is_valid(""));
        assert!(!Email::is_valid("@example.com"));
        assert!(!Email::is_valid("john@"));
        assert!(!Email::is_valid("john.example.com"));
        assert!(!Email::is_valid("john@@example.com"));
    }

    #[test]
    fn test_address_validation() {
        assert!(Address::is_valid("123 Clementi Rd"));
        assert!(Address::is_valid("-"));
        assert!(!Address::is_valid(""));
        assert!(!Address::is_valid(" "));
    }

    #[test]
    fn test_parse_reports_constraints() {
        let err = Phone::parse("12").unwrap_err();
        assert_eq!(err.field, "phone");
        assert_eq!(err.to_string(), Phone::CONSTRAINTS);

        let name = Name::parse("John Doe").unwrap();
        assert_eq!(name.as_str(), "John Doe");
        assert_eq!(name.initials(), "J");
    }
}
