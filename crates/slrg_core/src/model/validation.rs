//! Validation errors and field checks shared by all entities.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// One rejected field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Client input rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A create request carried an identifier.
    IdExists { entity: &'static str },
    /// One or more fields violate entity invariants.
    Fields {
        entity: &'static str,
        errors: Vec<FieldError>,
    },
    /// Sort key is malformed or not sortable for the entity.
    InvalidSort { entity: &'static str, sort: String },
    /// Paging parameter is not a non-negative integer.
    InvalidPaging {
        parameter: &'static str,
        value: String,
    },
}

impl ValidationError {
    /// Machine-readable key, without the `error.` prefix.
    pub fn error_key(&self) -> &'static str {
        match self {
            Self::IdExists { .. } => "idexists",
            Self::Fields { .. } => "validation",
            Self::InvalidSort { .. } | Self::InvalidPaging { .. } => "badrequest",
        }
    }

    /// Entity-type name the failure refers to, if any.
    pub fn entity(&self) -> Option<&'static str> {
        match self {
            Self::IdExists { entity }
            | Self::Fields { entity, .. }
            | Self::InvalidSort { entity, .. } => Some(entity),
            Self::InvalidPaging { .. } => None,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Fields { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdExists { entity } => write!(f, "a new {entity} cannot already have an ID"),
            Self::Fields { entity, errors } => {
                write!(f, "invalid {entity}:")?;
                for error in errors {
                    write!(f, " {} {};", error.field, error.message)?;
                }
                Ok(())
            }
            Self::InvalidSort { entity, sort } => {
                write!(f, "cannot sort {entity} by `{sort}`")
            }
            Self::InvalidPaging { parameter, value } => {
                write!(f, "invalid paging parameter {parameter}=`{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Accumulates field violations for one record.
pub(crate) struct FieldChecks {
    entity: &'static str,
    errors: Vec<FieldError>,
}

impl FieldChecks {
    pub(crate) fn new(entity: &'static str) -> Self {
        Self {
            entity,
            errors: Vec::new(),
        }
    }

    pub(crate) fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub(crate) fn required_text(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.reject(field, "must not be blank");
        }
    }

    pub(crate) fn required_ref<T>(&mut self, field: &'static str, value: Option<T>) {
        if value.is_none() {
            self.reject(field, "is required");
        }
    }

    pub(crate) fn optional_date(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            if parse_iso_date(value).is_none() {
                self.reject(field, format!("`{value}` is not a YYYY-MM-DD calendar date"));
            }
        }
    }

    pub(crate) fn optional_email(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            if !EMAIL_RE.is_match(value) {
                self.reject(field, format!("`{value}` is not an email address"));
            }
        }
    }

    /// `later` must not precede `earlier` when both are set.
    pub(crate) fn date_order(
        &mut self,
        later_field: &'static str,
        earlier: Option<&str>,
        later: Option<&str>,
    ) {
        // Unparseable dates are already reported by `optional_date`.
        let (Some(earlier), Some(later)) = (
            earlier.and_then(parse_iso_date),
            later.and_then(parse_iso_date),
        ) else {
            return;
        };
        if later < earlier {
            self.reject(later_field, format!("must not be before {earlier}"));
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(ValidationError::Fields {
            entity: self.entity,
            errors: self.errors,
        })
    }
}

/// Strict `YYYY-MM-DD` that must also exist on the calendar.
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::{FieldChecks, ValidationError};

    #[test]
    fn optional_date_accepts_iso_and_rejects_other_shapes() {
        let mut checks = FieldChecks::new("member");
        checks.optional_date("birthDate", Some("1990-02-28"));
        checks.optional_date("memberSince", None);
        assert!(checks.finish().is_ok());

        let mut checks = FieldChecks::new("member");
        checks.optional_date("birthDate", Some("28.02.1990"));
        checks.optional_date("memberSince", Some("2020-13-01"));
        let err = checks.finish().expect_err("malformed dates must fail");
        assert_eq!(err.field_errors().len(), 2);
        assert_eq!(err.error_key(), "validation");
    }

    #[test]
    fn optional_date_rejects_days_missing_from_the_calendar() {
        let mut checks = FieldChecks::new("member");
        checks.optional_date("birthDate", Some("2023-02-31"));
        checks.optional_date("memberSince", Some("2023-04-31"));
        let err = checks.finish().expect_err("impossible dates must fail");
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["birthDate", "memberSince"]);

        let mut checks = FieldChecks::new("member");
        checks.optional_date("birthDate", Some("2024-02-29"));
        checks.optional_date("memberSince", Some("2023-2-28"));
        let err = checks.finish().expect_err("unpadded month must fail");
        assert_eq!(err.field_errors()[0].field, "memberSince");
    }

    #[test]
    fn date_order_skips_values_that_are_not_dates() {
        let mut checks = FieldChecks::new("furtherEducation");
        checks.date_order("validUntil", Some("2024-02-30"), Some("2023-05-01"));
        assert!(checks.finish().is_ok());
    }

    #[test]
    fn date_order_rejects_reversed_range() {
        let mut checks = FieldChecks::new("furtherEducation");
        checks.date_order("validUntil", Some("2024-05-01"), Some("2023-05-01"));
        let err = checks.finish().expect_err("reversed range must fail");
        assert_eq!(err.field_errors()[0].field, "validUntil");
    }

    #[test]
    fn id_exists_maps_to_stable_key() {
        let err = ValidationError::IdExists { entity: "member" };
        assert_eq!(err.error_key(), "idexists");
        assert_eq!(err.entity(), Some("member"));
        assert_eq!(err.to_string(), "a new member cannot already have an ID");
    }
}
