pub mod field;
pub mod observable;
pub mod person;
pub mod tag;

pub use field::{Address, Email, Field, FieldFormatError, Name, Phone};
pub use observable::{PersonCell, PersonChanged, PersonId, SharedPerson};
pub use person::{Person, TagColorMap};
pub use tag::{Tag, TagList, TagParseError, TagSet};
