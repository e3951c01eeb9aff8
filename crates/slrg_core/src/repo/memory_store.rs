//! In-memory entity store.
//!
//! Mirrors the SQLite store's observable behaviour (fresh ids, full-replace
//! updates, ordering of nulls and mixed values) without a database. Owned
//! records are not cascaded when a member is deleted from a separate store.

use super::{EntityStore, OwnedStore, StoreError, StoreResult};
use crate::model::{Entity, EntityId, MemberOwned, SortValue};
use crate::paging::{Direction, Page, PageRequest, SortOrder};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

struct MemoryState<T> {
    rows: BTreeMap<EntityId, T>,
    last_id: EntityId,
}

pub struct MemoryStore<T> {
    state: Mutex<MemoryState<T>>,
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.rows.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, MemoryState<T>>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned"))
    }
}

impl<T: Entity> EntityStore<T> for MemoryStore<T> {
    fn insert(&self, record: &T) -> StoreResult<T> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let id = state.last_id;
        let stored = record.clone().with_id(id);
        state.rows.insert(id, stored.clone());
        Ok(stored)
    }

    fn update(&self, id: EntityId, record: &T) -> StoreResult<T> {
        let mut state = self.lock()?;
        let slot = state.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = record.clone().with_id(id);
        Ok(slot.clone())
    }

    fn find_one(&self, id: EntityId) -> StoreResult<Option<T>> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    fn find_page(&self, request: &PageRequest) -> StoreResult<Page<T>> {
        let unsortable = request
            .sort
            .iter()
            .find(|order| !T::is_sortable(&order.property));
        if let Some(order) = unsortable {
            return Err(StoreError::InvalidSort(order.property.clone()));
        }

        let mut records: Vec<T> = self.lock()?.rows.values().cloned().collect();

        records.sort_by(|left, right| compare_records(left, right, &request.sort));
        let total = records.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = records
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .collect();
        Ok(Page::new(content, request, total))
    }

    fn delete(&self, id: EntityId) -> StoreResult<bool> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }
}

impl<T: MemberOwned> OwnedStore<T> for MemoryStore<T> {
    fn find_by_member_id(&self, member_id: EntityId) -> StoreResult<Vec<T>> {
        Ok(self
            .lock()?
            .rows
            .values()
            .filter(|record| record.member_id() == Some(member_id))
            .cloned()
            .collect())
    }
}

fn compare_records<T: Entity>(left: &T, right: &T, sort: &[SortOrder]) -> Ordering {
    sort.iter()
        .map(|order| {
            let left = left.sort_value(&order.property).unwrap_or(SortValue::Null);
            let right = right.sort_value(&order.property).unwrap_or(SortValue::Null);
            match order.direction {
                Direction::Asc => left.cmp(&right),
                Direction::Desc => right.cmp(&left),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
