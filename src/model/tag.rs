use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::field::{Field, FieldFormatError};

pub const TAG_DELIMITER: char = ',';

pub const MESSAGE_DUPLICATE_TAGS: &str =
    "Duplicate Tags found. Remove Duplicate Tags and try again.";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[[:alnum:]]+$").expect("valid tag regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagParseError {
    #[error(transparent)]
    Format(#[from] FieldFormatError),
    #[error("{}", MESSAGE_DUPLICATE_TAGS)]
    Duplicate { label: String },
}

/// A tag label. Two tags are the same tag when their labels match
/// ignoring case; the label keeps the spelling it was first entered with.
#[derive(Debug, Clone)]
pub struct Tag {
    label: String,
    key: String,
}

impl Field for Tag {
    const LABEL: &'static str = "tag";
    const CONSTRAINTS: &'static str = "Tags names should be alphanumeric";

    fn is_valid(raw: &str) -> bool {
        TAG_RE.is_match(raw)
    }
}

impl Tag {
    pub fn parse(raw: &str) -> Result<Self, FieldFormatError> {
        let label = raw.trim();
        <Tag as Field>::check(label)?;
        Ok(Self {
            label: label.to_string(),
            key: label.to_lowercase(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Case-folded label that decides tag identity.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.label)
    }
}

/// Format check for a whole delimited tag list, as typed in the form.
pub struct TagList;

impl Field for TagList {
    const LABEL: &'static str = "tags";
    const CONSTRAINTS: &'static str = "Tags should be alphanumeric and separated by commas";

    fn is_valid(raw: &str) -> bool {
        raw.split(TAG_DELIMITER)
            .all(|token| Tag::is_valid(token.trim()))
    }
}

/// Insertion-ordered set of distinct tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `raw` on the delimiter and build a set. A label that repeats
    /// after normalization is an error, never silently collapsed.
    pub fn parse(raw: &str) -> Result<Self, TagParseError> {
        let trimmed = raw.trim();
        let mut set = TagSet::new();
        if trimmed.is_empty() {
            return Ok(set);
        }

        for token in trimmed.split(TAG_DELIMITER) {
            let tag = Tag::parse(token)?;
            set.insert(tag)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, tag: Tag) -> Result<(), TagParseError> {
        if self.contains(&tag) {
            return Err(TagParseError::Duplicate {
                label: tag.label,
            });
        }
        self.tags.push(tag);
        Ok(())
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Render back to the delimited form accepted by [`TagSet::parse`].
    pub fn to_input_string(&self) -> String {
        self.tags
            .iter()
            .map(Tag::label)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tag in &self.tags {
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_empty_set() {
        assert!(TagSet::parse("").unwrap().is_empty());
        assert!(TagSet::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_trims_and_keeps_order() {
        let set = TagSet::parse(" friend , colleague,gym ").unwrap();
        let labels: Vec<_> = set.iter().map(Tag::label).collect();
        assert_eq!(labels, vec!["friend", "colleague", "gym"]);
    }

    #[test]
    fn test_duplicate_tags_rejected() {
        let err = TagSet::parse("friend,friend").unwrap_err();
        assert_eq!(
            err,
            TagParseError::Duplicate {
                label: "friend".to_string()
            }
        );
        assert_eq!(err.to_string(), MESSAGE_DUPLICATE_TAGS);

        // Case-folded labels collide too
        assert!(matches!(
            TagSet::parse("friend, Friend"),
            Err(TagParseError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_format_error_for_bad_token() {
        let err = TagSet::parse("friend,best friend").unwrap_err();
        assert!(matches!(err, TagParseError::Format(_)));
        assert!(matches!(
            TagSet::parse("friend,,gym"),
            Err(TagParseError::Format(_))
        ));
    }

    #[test]
    fn test_normalizing_is_idempotent() {
        let first = TagSet::parse("Friend,colleague").unwrap();
        let second = TagSet::parse(&first.to_input_string()).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.to_input_string(), "Friend,colleague");
    }

    #[test]
    fn test_tag_list_validator() {
        assert!(TagList::is_valid("friend"));
        assert!(TagList::is_valid("friend, colleague"));
        assert!(!TagList::is_valid("friend;colleague"));
        assert!(!TagList::is_valid("friend,"));
    }

    #[test]
    fn test_display() {
        let set = TagSet::parse("friend,colleague").unwrap();
        assert_eq!(set.to_string(), "[friend][colleague]");
    }
}
