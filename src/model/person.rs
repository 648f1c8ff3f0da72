use std::collections::HashMap;
use std::fmt;

use crate::palette::RgbColor;

use super::field::{Address, Email, Name, Phone};
use super::tag::{Tag, TagSet};

/// Display colors for some of a person's tags. Tags without an entry are
/// drawn in the default tag color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagColorMap {
    colors: HashMap<Tag, RgbColor>,
}

impl TagColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: Tag, color: RgbColor) {
        self.colors.insert(tag, color);
    }

    pub fn get(&self, tag: &Tag) -> Option<RgbColor> {
        self.colors.get(tag).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// A contact entry. Only built from already validated fields and never
/// changed afterwards; an edit produces a new `Person`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    tags: TagSet,
    tag_colors: TagColorMap,
}

impl Person {
    pub fn new(name: Name, phone: Phone, email: Email, address: Address, tags: TagSet) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            tags,
            tag_colors: TagColorMap::new(),
        }
    }

    /// Same person with `colors` as its tag color map.
    pub fn with_tag_colors(mut self, colors: TagColorMap) -> Self {
        self.tag_colors = colors;
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn tag_colors(&self) -> &TagColorMap {
        &self.tag_colors
    }

    /// Identity used for duplicate detection: the four contact fields,
    /// tags and colors excluded.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name
            && self.phone == other.phone
            && self.email == other.email
            && self.address == other.address
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Phone: {} Email: {} Address: {} Tags: {}",
            self.name, self.phone, self.email, self.address, self.tags
        )
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn person(name: &str, phone: &str, tags: &str) -> Person {
        Person::new(
            Name::parse(name).unwrap(),
            Phone::parse(phone).unwrap(),
            Email::parse("someone@example.com").unwrap(),
            Address::parse("123 Clementi Rd").unwrap(),
            TagSet::parse(tags).unwrap(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::person;
    use super::*;

    #[test]
    fn test_display_lists_fields_and_tags() {
        let p = person("John Doe", "98765432", "friend,colleague");
        assert_eq!(
            p.to_string(),
            "John Doe Phone: 98765432 Email: someone@example.com Address: 123 Clementi Rd Tags: [friend][colleague]"
        );
    }

    #[test]
    fn test_same_person_ignores_tags() {
        let a = person("John Doe", "98765432", "friend");
        let b = person("John Doe", "98765432", "colleague");
        let c = person("John Doe", "11111111", "friend");
        assert!(a.is_same_person(&b));
        assert!(!a.is_same_person(&c));
    }

    #[test]
    fn test_tag_colors_lookup() {
        let tags = TagSet::parse("friend,gym").unwrap();
        let friend = tags.iter().next().unwrap().clone();
        let mut colors = TagColorMap::new();
        colors.insert(friend.clone(), RgbColor::new(255, 0, 0));

        let p = person("Ann", "123", "friend,gym").with_tag_colors(colors);
        assert_eq!(p.tag_colors().get(&friend), Some(RgbColor::new(255, 0, 0)));
        let gym = Tag::parse("gym").unwrap();
        assert_eq!(p.tag_colors().get(&gym), None);
    }
}
