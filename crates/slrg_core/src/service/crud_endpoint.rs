//! Generic CRUD use-cases for one entity type.
//!
//! # Responsibility
//! - Map create/update/list/get/delete onto an [`EntityStore`].
//! - Shape outcomes (stored record, location, alert) for transport layers.
//!
//! # Invariants
//! - Create vs. update is decided once, by [`SaveCommand`], from the
//!   presence of an identifier.
//! - Client-supplied identifiers are never persisted on create.
//! - Listing always orders by a total key (`id` appended as tie-break).
//! - No version check on update: the last write wins.

use crate::alert::{Alert, AlertKind};
use crate::model::{Entity, EntityId, ValidationError, ID_PROPERTY};
use crate::paging::{Direction, Page, PageRequest};
use crate::repo::{EntityStore, StoreError};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type EndpointResult<T> = Result<T, EndpointError>;

/// Failure of an endpoint use-case.
#[derive(Debug)]
pub enum EndpointError {
    /// Client input rejected; nothing was written.
    Validation(ValidationError),
    /// Update target does not exist.
    NotFound { entity: &'static str, id: EntityId },
    /// Persistence failure, not recoverable at this layer.
    Store(StoreError),
}

impl Display for EndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EndpointError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for EndpointError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Attaches entity context to a store failure.
pub(crate) fn store_error<T: Entity>(err: StoreError) -> EndpointError {
    match err {
        StoreError::NotFound(id) => EndpointError::NotFound {
            entity: T::NAME,
            id,
        },
        StoreError::InvalidSort(sort) => EndpointError::Validation(ValidationError::InvalidSort {
            entity: T::NAME,
            sort,
        }),
        other => EndpointError::Store(other),
    }
}

/// Write intent decided once at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveCommand<T> {
    /// Record without identifier; the store assigns one.
    Create(T),
    /// Full replace of the record stored under `id`.
    Update { id: EntityId, record: T },
}

impl<T: Entity> SaveCommand<T> {
    /// Intent of a create request.
    ///
    /// # Errors
    /// - `ValidationError::IdExists` when the record already carries an id.
    pub fn for_create(record: T) -> Result<Self, ValidationError> {
        if record.id().is_some() {
            return Err(ValidationError::IdExists { entity: T::NAME });
        }
        Ok(Self::Create(record))
    }

    /// Intent of an update request; records without id fall back to create.
    pub fn for_update(record: T) -> Self {
        match record.id() {
            Some(id) => Self::Update { id, record },
            None => Self::Create(record),
        }
    }

    pub fn record(&self) -> &T {
        match self {
            Self::Create(record) | Self::Update { record, .. } => record,
        }
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved<T> {
    Created {
        record: T,
        /// `/api/{collection}/{id}` of the new record.
        location: String,
        alert: Alert,
    },
    Updated {
        record: T,
        alert: Alert,
    },
}

impl<T> Saved<T> {
    pub fn record(&self) -> &T {
        match self {
            Self::Created { record, .. } | Self::Updated { record, .. } => record,
        }
    }

    pub fn alert(&self) -> &Alert {
        match self {
            Self::Created { alert, .. } | Self::Updated { alert, .. } => alert,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Created { location, .. } => Some(location),
            Self::Updated { .. } => None,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Self::Created { record, .. } | Self::Updated { record, .. } => record,
        }
    }
}

/// CRUD facade over one entity store.
pub struct CrudEndpoint<T, S> {
    store: S,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, S: EntityStore<T>> CrudEndpoint<T, S> {
    /// Creates an endpoint using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Resource path of the collection, e.g. `/api/members`.
    pub fn collection_path() -> String {
        format!("/api/{}", T::COLLECTION)
    }

    /// Resource path of one record, e.g. `/api/members/1`.
    pub fn location(id: EntityId) -> String {
        format!("/api/{}/{id}", T::COLLECTION)
    }

    /// Creates a new record.
    ///
    /// # Errors
    /// - `Validation(IdExists)` when `record` carries an id.
    /// - `Validation(Fields)` when field invariants fail.
    pub fn create(&self, record: T) -> EndpointResult<Saved<T>> {
        debug!(
            "event=entity_create module=service status=start entity={}",
            T::NAME
        );
        self.save(SaveCommand::for_create(record)?)
    }

    /// Updates an existing record, or creates it when it has no id.
    ///
    /// # Errors
    /// - `NotFound` when the id does not exist.
    /// - `Validation(Fields)` when field invariants fail.
    pub fn update(&self, record: T) -> EndpointResult<Saved<T>> {
        debug!(
            "event=entity_update module=service status=start entity={} id={:?}",
            T::NAME,
            record.id()
        );
        self.save(SaveCommand::for_update(record))
    }

    /// Executes a decided write intent.
    pub fn save(&self, command: SaveCommand<T>) -> EndpointResult<Saved<T>> {
        command.record().validate()?;

        match command {
            SaveCommand::Create(record) => {
                let stored = self.store.insert(&record).map_err(store_error::<T>)?;
                let id = stored.id().ok_or(EndpointError::Store(
                    StoreError::InconsistentState("stored record has no id"),
                ))?;
                debug!(
                    "event=entity_create module=service status=ok entity={} id={id}",
                    T::NAME
                );
                Ok(Saved::Created {
                    record: stored,
                    location: Self::location(id),
                    alert: Alert::new(AlertKind::Created, T::NAME, id),
                })
            }
            SaveCommand::Update { id, record } => {
                let stored = self.store.update(id, &record).map_err(store_error::<T>)?;
                debug!(
                    "event=entity_update module=service status=ok entity={} id={id}",
                    T::NAME
                );
                Ok(Saved::Updated {
                    record: stored,
                    alert: Alert::new(AlertKind::Updated, T::NAME, id),
                })
            }
        }
    }

    /// Lists one page of records.
    ///
    /// # Errors
    /// - `Validation(InvalidSort)` when a sort key is not sortable.
    pub fn list(&self, request: PageRequest) -> EndpointResult<Page<T>> {
        if let Some(order) = request
            .sort
            .iter()
            .find(|order| !T::is_sortable(&order.property))
        {
            let direction = match order.direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            return Err(ValidationError::InvalidSort {
                entity: T::NAME,
                sort: format!("{},{direction}", order.property),
            }
            .into());
        }

        let request = request.with_id_tiebreak(ID_PROPERTY);
        debug!(
            "event=entity_list module=service entity={} page={} size={}",
            T::NAME,
            request.page,
            request.size
        );
        self.store.find_page(&request).map_err(store_error::<T>)
    }

    /// Gets one record; absence is `Ok(None)`.
    pub fn get_one(&self, id: EntityId) -> EndpointResult<Option<T>> {
        self.store.find_one(id).map_err(store_error::<T>)
    }

    /// Hard-deletes one record. Missing ids are not an error.
    pub fn delete(&self, id: EntityId) -> EndpointResult<Alert> {
        let removed = self.store.delete(id).map_err(store_error::<T>)?;
        debug!(
            "event=entity_delete module=service status=ok entity={} id={id} removed={removed}",
            T::NAME
        );
        Ok(Alert::new(AlertKind::Deleted, T::NAME, id))
    }
}
