//! Member domain model.
//!
//! # Responsibility
//! - Define the root record of the registry.
//! - Validate personal attributes before persistence.
//!
//! # Invariants
//! - `first_name` and `last_name` are never blank.
//! - Dates are ISO `YYYY-MM-DD` text; `member_since` is not before
//!   `birth_date`.
//! - Deleting a member deletes every record it owns.

use super::validation::FieldChecks;
use super::{Entity, EntityId, SortValue, ValidationError};
use serde::{Deserialize, Serialize};

/// A person registered with the organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Store-assigned; `None` until created.
    #[serde(default)]
    pub id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Date the person joined the organisation.
    #[serde(default)]
    pub member_since: Option<String>,
    /// Inactive members are kept for history but no longer take part.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Member {
    /// Creates an active member without an identifier.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            email: None,
            phone: None,
            member_since: None,
            active: true,
        }
    }
}

impl Entity for Member {
    const NAME: &'static str = "member";
    const COLLECTION: &'static str = "members";
    const SORT_PROPERTIES: &'static [&'static str] = &[
        "firstName",
        "lastName",
        "birthDate",
        "email",
        "memberSince",
        "active",
    ];

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = FieldChecks::new(Self::NAME);
        checks.required_text("firstName", &self.first_name);
        checks.required_text("lastName", &self.last_name);
        checks.optional_date("birthDate", self.birth_date.as_deref());
        checks.optional_date("memberSince", self.member_since.as_deref());
        checks.date_order(
            "memberSince",
            self.birth_date.as_deref(),
            self.member_since.as_deref(),
        );
        checks.optional_email("email", self.email.as_deref());
        checks.finish()
    }

    fn sort_value(&self, property: &str) -> Option<SortValue> {
        let value = match property {
            "id" => self.id.into(),
            "firstName" => SortValue::Text(self.first_name.clone()),
            "lastName" => SortValue::Text(self.last_name.clone()),
            "birthDate" => self.birth_date.as_deref().into(),
            "email" => self.email.as_deref().into(),
            "memberSince" => self.member_since.as_deref().into(),
            "active" => SortValue::Int(i64::from(self.active)),
            _ => return None,
        };
        Some(value)
    }
}
