//! Appearance (duty/event attendance) record owned by a member.
//!
//! The type name stays plural to match the `/appearances` collection and the
//! entity name the UI alerts are keyed by.

use super::validation::FieldChecks;
use super::{Entity, EntityId, MemberOwned, SortValue, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearances {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub member_id: Option<EntityId>,
    /// Event or duty name.
    pub event: String,
    #[serde(default)]
    pub appeared_on: Option<String>,
    /// Whole hours served; never negative.
    #[serde(default)]
    pub hours: Option<i64>,
}

impl Appearances {
    pub fn new(member_id: EntityId, event: impl Into<String>) -> Self {
        Self {
            id: None,
            member_id: Some(member_id),
            event: event.into(),
            appeared_on: None,
            hours: None,
        }
    }
}

impl Entity for Appearances {
    const NAME: &'static str = "appearances";
    const COLLECTION: &'static str = "appearances";
    const SORT_PROPERTIES: &'static [&'static str] =
        &["memberId", "event", "appearedOn", "hours"];

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = FieldChecks::new(Self::NAME);
        checks.required_ref("memberId", self.member_id);
        checks.required_text("event", &self.event);
        checks.optional_date("appearedOn", self.appeared_on.as_deref());
        if self.hours.is_some_and(|hours| hours < 0) {
            checks.reject("hours", "must not be negative");
        }
        checks.finish()
    }

    fn sort_value(&self, property: &str) -> Option<SortValue> {
        let value = match property {
            "id" => self.id.into(),
            "memberId" => self.member_id.into(),
            "event" => SortValue::Text(self.event.clone()),
            "appearedOn" => self.appeared_on.as_deref().into(),
            "hours" => self.hours.into(),
            _ => return None,
        };
        Some(value)
    }
}

impl MemberOwned for Appearances {
    fn member_id(&self) -> Option<EntityId> {
        self.member_id
    }
}
