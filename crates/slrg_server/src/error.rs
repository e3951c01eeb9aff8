use crate::headers;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, error, warn};
use serde::Serialize;
use slrg_core::db::DbError;
use slrg_core::{EndpointError, EntityId, FailureAlert, StoreError, ValidationError};
use thiserror::Error;

/// Failure of one HTTP request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("malformed request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("malformed path: {0}")]
    Path(#[from] PathRejection),

    #[error("malformed query: {0}")]
    Query(#[from] QueryRejection),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    #[error("database connection lock poisoned")]
    LockPoisoned,

    #[error("database task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl From<EndpointError> for ApiError {
    fn from(value: EndpointError) -> Self {
        match value {
            EndpointError::Validation(err) => Self::Validation(err),
            EndpointError::NotFound { entity, id } => Self::NotFound { entity, id },
            EndpointError::Store(err) => Self::Store(err),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: String,
    description: String,
    field_errors: Vec<FieldErrorBody>,
}

#[derive(Serialize)]
struct FieldErrorBody {
    field: &'static str,
    message: String,
}

impl ApiError {
    fn bad_request(failure: FailureAlert, field_errors: Vec<FieldErrorBody>) -> Response {
        let body = ErrorBody {
            message: failure.error_key.clone(),
            description: failure.message.clone(),
            field_errors,
        };
        (
            StatusCode::BAD_REQUEST,
            headers::failure(&failure),
            Json(body),
        )
            .into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(err) => {
                warn!(
                    "event=request_rejected module=server status=bad_request key={} detail={err}",
                    err.error_key()
                );
                let field_errors = err
                    .field_errors()
                    .iter()
                    .map(|error| FieldErrorBody {
                        field: error.field,
                        message: error.message.clone(),
                    })
                    .collect();
                Self::bad_request(FailureAlert::from(&err), field_errors)
            }
            Self::Body(_) | Self::Path(_) | Self::Query(_) => {
                let detail = self.to_string();
                warn!("event=request_rejected module=server status=bad_request detail={detail}");
                Self::bad_request(FailureAlert::new("badrequest", None, detail), Vec::new())
            }
            Self::NotFound { entity, id } => {
                debug!("event=request_not_found module=server entity={entity} id={id}");
                StatusCode::NOT_FOUND.into_response()
            }
            Self::Store(_) | Self::LockPoisoned | Self::Worker(_) => {
                error!("event=request_failed module=server status=error detail={self}");
                let body = ErrorBody {
                    message: "error.internal".to_string(),
                    description: "internal server error".to_string(),
                    field_errors: Vec::new(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Failure before or while serving.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("database setup failed: {0}")]
    Database(#[from] DbError),

    #[error("database schema not usable: {0}")]
    Schema(#[from] StoreError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server stopped with error: {0}")]
    Serve(std::io::Error),
}
