//! Column mappings for every persisted entity.

use super::sqlite_store::SqlEntity;
use crate::model::appearances::Appearances;
use crate::model::assessment::Assessment;
use crate::model::education::Education;
use crate::model::further_education::FurtherEducation;
use crate::model::member::Member;
use rusqlite::types::Value;
use rusqlite::Row;

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn opt_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text)
}

fn opt_int(value: Option<i64>) -> Value {
    value.map_or(Value::Null, Value::Integer)
}

impl SqlEntity for Member {
    const TABLE: &'static str = "members";
    const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("firstName", "first_name"),
        ("lastName", "last_name"),
        ("birthDate", "birth_date"),
        ("email", "email"),
        ("phone", "phone"),
        ("memberSince", "member_since"),
        ("active", "active"),
    ];

    fn to_sql_values(&self) -> Vec<Value> {
        vec![
            text(&self.first_name),
            text(&self.last_name),
            opt_text(self.birth_date.as_deref()),
            opt_text(self.email.as_deref()),
            opt_text(self.phone.as_deref()),
            opt_text(self.member_since.as_deref()),
            Value::Integer(i64::from(self.active)),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            birth_date: row.get("birth_date")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            member_since: row.get("member_since")?,
            active: row.get("active")?,
        })
    }
}

impl SqlEntity for Assessment {
    const TABLE: &'static str = "assessments";
    const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("memberId", "member_id"),
        ("score", "score"),
        ("assessedOn", "assessed_on"),
        ("assessor", "assessor"),
        ("remarks", "remarks"),
    ];

    fn to_sql_values(&self) -> Vec<Value> {
        vec![
            opt_int(self.member_id),
            Value::Integer(self.score),
            opt_text(self.assessed_on.as_deref()),
            opt_text(self.assessor.as_deref()),
            opt_text(self.remarks.as_deref()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            member_id: row.get("member_id")?,
            score: row.get("score")?,
            assessed_on: row.get("assessed_on")?,
            assessor: row.get("assessor")?,
            remarks: row.get("remarks")?,
        })
    }
}

impl SqlEntity for Education {
    const TABLE: &'static str = "educations";
    const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("memberId", "member_id"),
        ("title", "title"),
        ("institution", "institution"),
        ("completedOn", "completed_on"),
    ];

    fn to_sql_values(&self) -> Vec<Value> {
        vec![
            opt_int(self.member_id),
            text(&self.title),
            opt_text(self.institution.as_deref()),
            opt_text(self.completed_on.as_deref()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            member_id: row.get("member_id")?,
            title: row.get("title")?,
            institution: row.get("institution")?,
            completed_on: row.get("completed_on")?,
        })
    }
}

impl SqlEntity for Appearances {
    const TABLE: &'static str = "appearances";
    const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("memberId", "member_id"),
        ("event", "event"),
        ("appearedOn", "appeared_on"),
        ("hours", "hours"),
    ];

    fn to_sql_values(&self) -> Vec<Value> {
        vec![
            opt_int(self.member_id),
            text(&self.event),
            opt_text(self.appeared_on.as_deref()),
            opt_int(self.hours),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            member_id: row.get("member_id")?,
            event: row.get("event")?,
            appeared_on: row.get("appeared_on")?,
            hours: row.get("hours")?,
        })
    }
}

impl SqlEntity for FurtherEducation {
    const TABLE: &'static str = "further_educations";
    const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("memberId", "member_id"),
        ("course", "course"),
        ("provider", "provider"),
        ("completedOn", "completed_on"),
        ("validUntil", "valid_until"),
    ];

    fn to_sql_values(&self) -> Vec<Value> {
        vec![
            opt_int(self.member_id),
            text(&self.course),
            opt_text(self.provider.as_deref()),
            opt_text(self.completed_on.as_deref()),
            opt_text(self.valid_until.as_deref()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            member_id: row.get("member_id")?,
            course: row.get("course")?,
            provider: row.get("provider")?,
            completed_on: row.get("completed_on")?,
            valid_until: row.get("valid_until")?,
        })
    }
}
