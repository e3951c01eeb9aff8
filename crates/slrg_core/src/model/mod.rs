//! Domain model for members and the records they own.
//!
//! # Responsibility
//! - Define the five entity records exchanged with stores and HTTP callers.
//! - Describe each entity through the [`Entity`] trait so endpoints and
//!   stores stay generic.
//!
//! # Invariants
//! - Identifiers are assigned by the store, never chosen by the client.
//! - An identifier, once assigned, never changes for the lifetime of a record.
//! - Owned records reference exactly one member through `member_id`.

pub mod appearances;
pub mod assessment;
pub mod education;
pub mod further_education;
pub mod member;
mod validation;

pub use validation::{FieldError, ValidationError};

use std::fmt::Debug;

/// Store-assigned record identifier.
pub type EntityId = i64;

/// Property name shared by every entity for its identifier.
pub const ID_PROPERTY: &str = "id";

/// Comparable projection of one entity property, used for in-memory sorting.
///
/// Variant order matches SQLite's ordering of storage classes, so memory and
/// SQLite stores sort mixed/null values the same way.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Null,
    Int(i64),
    Text(String),
}

impl From<Option<&str>> for SortValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Null, |text| Self::Text(text.to_string()))
    }
}

impl From<Option<i64>> for SortValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Null, Self::Int)
    }
}

/// Behaviour shared by every persisted record type.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Entity-type name used in alerts and logs (`member`, `assessment`, ...).
    const NAME: &'static str;
    /// Collection segment under `/api` (`members`, `assessments`, ...).
    const COLLECTION: &'static str;
    /// JSON property names accepted as sort keys, besides `id`.
    const SORT_PROPERTIES: &'static [&'static str];

    fn id(&self) -> Option<EntityId>;

    fn set_id(&mut self, id: EntityId);

    /// Checks field-level invariants, collecting every violation.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Returns the sortable value of `property`, or `None` when the property
    /// is not sortable for this entity.
    fn sort_value(&self, property: &str) -> Option<SortValue>;

    /// Returns whether `property` may be used as a sort key.
    fn is_sortable(property: &str) -> bool {
        property == ID_PROPERTY || Self::SORT_PROPERTIES.contains(&property)
    }

    /// Returns a copy of this record carrying `id`.
    fn with_id(mut self, id: EntityId) -> Self {
        self.set_id(id);
        self
    }
}

/// Entity owned by exactly one member.
pub trait MemberOwned: Entity {
    fn member_id(&self) -> Option<EntityId>;
}
