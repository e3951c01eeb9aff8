//! Assessment record owned by a member.

use super::validation::FieldChecks;
use super::{Entity, EntityId, MemberOwned, SortValue, ValidationError};
use serde::{Deserialize, Serialize};

/// Highest score an assessment can carry.
pub const MAX_SCORE: i64 = 100;

/// Outcome of one practical or theoretical assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub member_id: Option<EntityId>,
    /// Percentage score in `0..=100`.
    pub score: i64,
    #[serde(default)]
    pub assessed_on: Option<String>,
    #[serde(default)]
    pub assessor: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl Assessment {
    pub fn new(member_id: EntityId, score: i64) -> Self {
        Self {
            id: None,
            member_id: Some(member_id),
            score,
            assessed_on: None,
            assessor: None,
            remarks: None,
        }
    }
}

impl Entity for Assessment {
    const NAME: &'static str = "assessment";
    const COLLECTION: &'static str = "assessments";
    const SORT_PROPERTIES: &'static [&'static str] =
        &["memberId", "score", "assessedOn", "assessor"];

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = FieldChecks::new(Self::NAME);
        checks.required_ref("memberId", self.member_id);
        if !(0..=MAX_SCORE).contains(&self.score) {
            checks.reject("score", format!("must be between 0 and {MAX_SCORE}"));
        }
        checks.optional_date("assessedOn", self.assessed_on.as_deref());
        checks.finish()
    }

    fn sort_value(&self, property: &str) -> Option<SortValue> {
        let value = match property {
            "id" => self.id.into(),
            "memberId" => self.member_id.into(),
            "score" => SortValue::Int(self.score),
            "assessedOn" => self.assessed_on.as_deref().into(),
            "assessor" => self.assessor.as_deref().into(),
            _ => return None,
        };
        Some(value)
    }
}

impl MemberOwned for Assessment {
    fn member_id(&self) -> Option<EntityId> {
        self.member_id
    }
}
