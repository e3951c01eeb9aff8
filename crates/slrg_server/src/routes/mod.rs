use crate::headers;
use crate::state::AppState;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use slrg_core::{Appearances, Assessment, Education, FurtherEducation, Member};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub mod crud;
pub mod health;
pub mod related;

/// Builds the full `/api` router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .merge(crud::routes::<Member>())
        .merge(crud::routes::<Assessment>())
        .merge(crud::routes::<Education>())
        .merge(crud::routes::<Appearances>())
        .merge(crud::routes::<FurtherEducation>())
        .merge(related::routes())
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .expose_headers(headers::exposed())
        .max_age(Duration::from_secs(60 * 60))
}
