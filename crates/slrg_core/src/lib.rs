//! Core domain logic for the SLRG member registry.
//! This crate is the single source of truth for entity invariants and CRUD
//! semantics; transport layers only shape its outcomes.

pub mod alert;
pub mod db;
pub mod logging;
pub mod model;
pub mod paging;
pub mod repo;
pub mod service;

pub use alert::{Alert, AlertKind, FailureAlert};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::appearances::Appearances;
pub use model::assessment::Assessment;
pub use model::education::Education;
pub use model::further_education::FurtherEducation;
pub use model::member::Member;
pub use model::{Entity, EntityId, FieldError, MemberOwned, SortValue, ValidationError};
pub use paging::{Direction, Page, PageLimits, PageRequest, SortOrder};
pub use repo::{
    ensure_registry_ready, EntityStore, MemoryStore, OwnedStore, SqlEntity, SqliteStore,
    StoreError, StoreResult,
};
pub use service::crud_endpoint::{
    CrudEndpoint, EndpointError, EndpointResult, SaveCommand, Saved,
};
pub use service::related_endpoint::RelatedListEndpoint;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
