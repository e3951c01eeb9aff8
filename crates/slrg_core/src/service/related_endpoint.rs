//! Read-only projections of the records a member owns.
//!
//! # Invariants
//! - A missing member yields `None`; an existing member with no records
//!   yields an empty list.
//! - Results are the full child set ordered by id, never paged.

use super::crud_endpoint::{store_error, EndpointResult};
use crate::model::member::Member;
use crate::model::{EntityId, MemberOwned};
use crate::repo::{EntityStore, OwnedStore};
use log::debug;
use std::marker::PhantomData;

/// Child-list lookup scoped by member id.
pub struct RelatedListEndpoint<T, P, C> {
    members: P,
    children: C,
    _entity: PhantomData<fn() -> T>,
}

impl<T, P, C> RelatedListEndpoint<T, P, C>
where
    T: MemberOwned,
    P: EntityStore<Member>,
    C: OwnedStore<T>,
{
    pub fn new(members: P, children: C) -> Self {
        Self {
            members,
            children,
            _entity: PhantomData,
        }
    }

    /// Lists every `T` owned by `member_id`, or `None` if no such member.
    pub fn list_by_parent(&self, member_id: EntityId) -> EndpointResult<Option<Vec<T>>> {
        if self
            .members
            .find_one(member_id)
            .map_err(store_error::<Member>)?
            .is_none()
        {
            debug!(
                "event=related_list module=service status=missing_parent entity={} member_id={member_id}",
                T::NAME
            );
            return Ok(None);
        }

        let children = self
            .children
            .find_by_member_id(member_id)
            .map_err(store_error::<T>)?;
        debug!(
            "event=related_list module=service status=ok entity={} member_id={member_id} count={}",
            T::NAME,
            children.len()
        );
        Ok(Some(children))
    }
}
