//! Generic REST handlers for one entity collection.
//!
//! Every entity gets the same five routes under `/api/{collection}`; the
//! entity type is the only thing that varies.

use crate::error::ApiError;
use crate::headers;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use slrg_core::{CrudEndpoint, EntityId, PageRequest, Saved, SqlEntity, SqliteStore};

/// Entity exposed over REST: persisted in SQLite and carried as JSON.
pub trait RestEntity: SqlEntity + Serialize + DeserializeOwned {}

impl<T> RestEntity for T where T: SqlEntity + Serialize + DeserializeOwned {}

pub fn routes<T: RestEntity>() -> Router<AppState> {
    let collection = format!("/api/{}", T::COLLECTION);
    Router::new()
        .route(
            &collection,
            get(list::<T>).post(create::<T>).put(update::<T>),
        )
        .route(
            &format!("{collection}/:id"),
            get(get_one::<T>).delete(delete::<T>),
        )
}

async fn create<T: RestEntity>(
    State(state): State<AppState>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(record) = payload?;
    debug!(
        "event=rest_request module=server action=create entity={}",
        T::NAME
    );
    let saved = state
        .with_connection(move |conn| {
            let endpoint = CrudEndpoint::new(SqliteStore::<T>::assume_ready(conn));
            Ok(endpoint.create(record)?)
        })
        .await?;
    Ok(saved_response(saved))
}

async fn update<T: RestEntity>(
    State(state): State<AppState>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(record) = payload?;
    debug!(
        "event=rest_request module=server action=update entity={} id={:?}",
        T::NAME,
        record.id()
    );
    let saved = state
        .with_connection(move |conn| {
            let endpoint = CrudEndpoint::new(SqliteStore::<T>::assume_ready(conn));
            Ok(endpoint.update(record)?)
        })
        .await?;
    Ok(saved_response(saved))
}

async fn list<T: RestEntity>(
    State(state): State<AppState>,
    uri: Uri,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let request = page_request::<T>(&params, &state)?;
    debug!(
        "event=rest_request module=server action=list entity={} page={} size={}",
        T::NAME,
        request.page,
        request.size
    );
    let page = state
        .with_connection(move |conn| {
            let endpoint = CrudEndpoint::new(SqliteStore::<T>::assume_ready(conn));
            Ok(endpoint.list(request)?)
        })
        .await?;
    let headers = headers::pagination(&page, uri.path());
    Ok((StatusCode::OK, headers, Json(page.content)).into_response())
}

async fn get_one<T: RestEntity>(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<T>, ApiError> {
    let Path(id) = id?;
    debug!(
        "event=rest_request module=server action=get entity={} id={id}",
        T::NAME
    );
    let record = state
        .with_connection(move |conn| {
            let endpoint = CrudEndpoint::new(SqliteStore::<T>::assume_ready(conn));
            Ok(endpoint.get_one(id)?)
        })
        .await?;
    record.map(Json).ok_or(ApiError::NotFound {
        entity: T::NAME,
        id,
    })
}

async fn delete<T: RestEntity>(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    debug!(
        "event=rest_request module=server action=delete entity={} id={id}",
        T::NAME
    );
    let alert = state
        .with_connection(move |conn| {
            let endpoint = CrudEndpoint::new(SqliteStore::<T>::assume_ready(conn));
            Ok(endpoint.delete(id)?)
        })
        .await?;
    Ok((StatusCode::OK, headers::alert(&alert)).into_response())
}

fn page_request<T: RestEntity>(
    params: &[(String, String)],
    state: &AppState,
) -> Result<PageRequest, ApiError> {
    let single = |name: &str| {
        params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };
    let sort: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "sort")
        .map(|(_, value)| value.as_str())
        .collect();
    Ok(PageRequest::from_params(
        T::NAME,
        single("page"),
        single("size"),
        &sort,
        &state.limits,
    )?)
}

fn saved_response<T: Serialize>(saved: Saved<T>) -> Response {
    match saved {
        Saved::Created {
            record,
            location,
            alert,
        } => {
            let mut headers = headers::alert(&alert);
            headers::put(&mut headers, LOCATION, &location);
            (StatusCode::CREATED, headers, Json(record)).into_response()
        }
        Saved::Updated { record, alert } => {
            (StatusCode::OK, headers::alert(&alert), Json(record)).into_response()
        }
    }
}
