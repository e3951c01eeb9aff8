//! Store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the [`EntityStore`] contract every endpoint depends on.
//! - Isolate SQLite query details from endpoint orchestration.
//! - Provide an in-memory store so endpoints can be exercised without SQLite.
//!
//! # Invariants
//! - `insert` always assigns a fresh identifier and never reuses one.
//! - `update` is a full replace keyed by an existing identifier; a missing
//!   identifier yields `StoreError::NotFound`.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod memory_store;
pub mod sqlite_store;
mod tables;

use crate::db::DbError;
use crate::model::{Entity, EntityId, MemberOwned};
use crate::paging::{Page, PageRequest};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use memory_store::MemoryStore;
pub use sqlite_store::{ensure_registry_ready, SqlEntity, SqliteStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure shared by all store implementations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Update target does not exist.
    NotFound(EntityId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Sort property has no backing column/value.
    InvalidSort(String),
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
    /// A write succeeded but its read-back did not.
    InconsistentState(&'static str),
    /// Store state is unusable (e.g. poisoned lock).
    Unavailable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "store requires table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "store requires column `{column}` in table `{table}`")
            }
            Self::InvalidSort(property) => write!(f, "unsupported sort property `{property}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
            Self::Unavailable(details) => write!(f, "store unavailable: {details}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD and paged-query contract for one entity type.
pub trait EntityStore<T: Entity> {
    /// Persists `record` under a fresh identifier, ignoring any id it
    /// carries, and returns the stored record.
    fn insert(&self, record: &T) -> StoreResult<T>;

    /// Replaces the record stored under `id` with `record`.
    fn update(&self, id: EntityId, record: &T) -> StoreResult<T>;

    fn find_one(&self, id: EntityId) -> StoreResult<Option<T>>;

    /// Returns one page ordered by `request.sort`, plus the total count.
    fn find_page(&self, request: &PageRequest) -> StoreResult<Page<T>>;

    /// Hard-deletes `id`; returns whether a record was removed.
    fn delete(&self, id: EntityId) -> StoreResult<bool>;
}

/// Scoped lookups for records owned by a member.
pub trait OwnedStore<T: MemberOwned>: EntityStore<T> {
    /// All records owned by `member_id`, ordered by identifier.
    fn find_by_member_id(&self, member_id: EntityId) -> StoreResult<Vec<T>>;
}

impl<T: Entity, S: EntityStore<T> + ?Sized> EntityStore<T> for &S {
    fn insert(&self, record: &T) -> StoreResult<T> {
        (**self).insert(record)
    }

    fn update(&self, id: EntityId, record: &T) -> StoreResult<T> {
        (**self).update(id, record)
    }

    fn find_one(&self, id: EntityId) -> StoreResult<Option<T>> {
        (**self).find_one(id)
    }

    fn find_page(&self, request: &PageRequest) -> StoreResult<Page<T>> {
        (**self).find_page(request)
    }

    fn delete(&self, id: EntityId) -> StoreResult<bool> {
        (**self).delete(id)
    }
}

impl<T: MemberOwned, S: OwnedStore<T> + ?Sized> OwnedStore<T> for &S {
    fn find_by_member_id(&self, member_id: EntityId) -> StoreResult<Vec<T>> {
        (**self).find_by_member_id(member_id)
    }
}
