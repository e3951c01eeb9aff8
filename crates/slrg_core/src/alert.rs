//! Outcome alerts consumed by the UI notification mechanism.
//!
//! Alerts are transport-neutral here; the HTTP layer renders them as
//! response headers.

use crate::model::{EntityId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Created,
    Updated,
    Deleted,
}

impl AlertKind {
    pub fn key(self) -> &'static str {
        match self {
            Self::Created => "success.create",
            Self::Updated => "success.update",
            Self::Deleted => "success.delete",
        }
    }
}

/// Successful write outcome keyed by entity name and identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub entity_name: &'static str,
    pub param: String,
}

impl Alert {
    pub fn new(kind: AlertKind, entity_name: &'static str, id: EntityId) -> Self {
        Self {
            kind,
            entity_name,
            param: id.to_string(),
        }
    }

    pub fn key(&self) -> &'static str {
        self.kind.key()
    }
}

/// Rejected request outcome, e.g. `error.idexists` for `member`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureAlert {
    pub error_key: String,
    pub entity_name: Option<&'static str>,
    pub message: String,
}

impl FailureAlert {
    pub fn new(
        error_key: &str,
        entity_name: Option<&'static str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_key: format!("error.{error_key}"),
            entity_name,
            message: message.into(),
        }
    }
}

impl From<&ValidationError> for FailureAlert {
    fn from(value: &ValidationError) -> Self {
        Self::new(value.error_key(), value.entity(), value.to_string())
    }
}
