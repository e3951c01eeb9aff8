//! Further education (refresher course) record owned by a member.
//!
//! # Invariants
//! - `valid_until` is not earlier than `completed_on` when both are set.

use super::validation::FieldChecks;
use super::{Entity, EntityId, MemberOwned, SortValue, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurtherEducation {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub member_id: Option<EntityId>,
    pub course: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub completed_on: Option<String>,
    /// Last day the refreshed qualification counts as current.
    #[serde(default)]
    pub valid_until: Option<String>,
}

impl FurtherEducation {
    pub fn new(member_id: EntityId, course: impl Into<String>) -> Self {
        Self {
            id: None,
            member_id: Some(member_id),
            course: course.into(),
            provider: None,
            completed_on: None,
            valid_until: None,
        }
    }
}

impl Entity for FurtherEducation {
    const NAME: &'static str = "furtherEducation";
    const COLLECTION: &'static str = "further-educations";
    const SORT_PROPERTIES: &'static [&'static str] =
        &["memberId", "course", "provider", "completedOn", "validUntil"];

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = FieldChecks::new(Self::NAME);
        checks.required_ref("memberId", self.member_id);
        checks.required_text("course", &self.course);
        checks.optional_date("completedOn", self.completed_on.as_deref());
        checks.optional_date("validUntil", self.valid_until.as_deref());
        checks.date_order(
            "validUntil",
            self.completed_on.as_deref(),
            self.valid_until.as_deref(),
        );
        checks.finish()
    }

    fn sort_value(&self, property: &str) -> Option<SortValue> {
        let value = match property {
            "id" => self.id.into(),
            "memberId" => self.member_id.into(),
            "course" => SortValue::Text(self.course.clone()),
            "provider" => self.provider.as_deref().into(),
            "completedOn" => self.completed_on.as_deref().into(),
            "validUntil" => self.valid_until.as_deref().into(),
            _ => return None,
        };
        Some(value)
    }
}

impl MemberOwned for FurtherEducation {
    fn member_id(&self) -> Option<EntityId> {
        self.member_id
    }
}
