use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use slrg_core::db::migrations::current_user_version;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    status: &'static str,
    version: &'static str,
    schema_version: u32,
}

/// Liveness probe; also proves the connection is usable.
pub async fn health(State(state): State<AppState>) -> Result<Json<Health>, ApiError> {
    let schema_version = state
        .with_connection(|conn| {
            current_user_version(conn).map_err(|err| ApiError::Store(err.into()))
        })
        .await?;
    Ok(Json(Health {
        status: "UP",
        version: env!("CARGO_PKG_VERSION"),
        schema_version,
    }))
}
