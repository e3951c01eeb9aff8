//! Records owned by one member, e.g. `/api/members/7/assessments`.

use super::crud::RestEntity;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use log::debug;
use slrg_core::{
    Appearances, Assessment, Education, Entity, EntityId, FurtherEducation, Member, MemberOwned,
    RelatedListEndpoint, SqliteStore,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/members/:id/assessments",
            get(list_owned::<Assessment>),
        )
        .route("/api/members/:id/educations", get(list_owned::<Education>))
        .route(
            "/api/members/:id/appearances",
            get(list_owned::<Appearances>),
        )
        .route(
            "/api/members/:id/furtheredu",
            get(list_owned::<FurtherEducation>),
        )
}

async fn list_owned<T: RestEntity + MemberOwned>(
    State(state): State<AppState>,
    member_id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Vec<T>>, ApiError> {
    let Path(member_id) = member_id?;
    debug!(
        "event=rest_request module=server action=list_owned entity={} member_id={member_id}",
        T::NAME
    );
    let owned = state
        .with_connection(move |conn| {
            let endpoint = RelatedListEndpoint::new(
                SqliteStore::<Member>::assume_ready(conn),
                SqliteStore::<T>::assume_ready(conn),
            );
            Ok(endpoint.list_by_parent(member_id)?)
        })
        .await?;
    owned.map(Json).ok_or(ApiError::NotFound {
        entity: Member::NAME,
        id: member_id,
    })
}
