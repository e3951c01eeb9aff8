//! Basic education (qualification) record owned by a member.

use super::validation::FieldChecks;
use super::{Entity, EntityId, MemberOwned, SortValue, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub member_id: Option<EntityId>,
    /// Qualification name, e.g. `Brevet Plus Pool`.
    pub title: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub completed_on: Option<String>,
}

impl Education {
    pub fn new(member_id: EntityId, title: impl Into<String>) -> Self {
        Self {
            id: None,
            member_id: Some(member_id),
            title: title.into(),
            institution: None,
            completed_on: None,
        }
    }
}

impl Entity for Education {
    const NAME: &'static str = "education";
    const COLLECTION: &'static str = "educations";
    const SORT_PROPERTIES: &'static [&'static str] =
        &["memberId", "title", "institution", "completedOn"];

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = FieldChecks::new(Self::NAME);
        checks.required_ref("memberId", self.member_id);
        checks.required_text("title", &self.title);
        checks.optional_date("completedOn", self.completed_on.as_deref());
        checks.finish()
    }

    fn sort_value(&self, property: &str) -> Option<SortValue> {
        let value = match property {
            "id" => self.id.into(),
            "memberId" => self.member_id.into(),
            "title" => SortValue::Text(self.title.clone()),
            "institution" => self.institution.as_deref().into(),
            "completedOn" => self.completed_on.as_deref().into(),
            _ => return None,
        };
        Some(value)
    }
}

impl MemberOwned for Education {
    fn member_id(&self) -> Option<EntityId> {
        self.member_id
    }
}
