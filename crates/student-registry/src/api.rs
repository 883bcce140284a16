use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::error::RegistryError;
use crate::{RegisterStudent, Student, StudentRegistry};

/// Build the HTTP surface around an already constructed registry
pub fn router(registry: StudentRegistry) -> Router {
    Router::new()
        .route("/students", get(list_students).post(register_student))
        .route("/health", get(health))
        .with_state(registry)
        .layer(TraceLayer::new_for_http())
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn register_student(
    State(registry): State<StudentRegistry>,
    payload: Result<Json<RegisterStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), RegistryError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Malformed registration body: {}", rejection.body_text());
        RegistryError::Validation(format!("invalid request body: {}", rejection.body_text()))
    })?;

    let student = registry.register(request).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn list_students(
    State(registry): State<StudentRegistry>,
) -> Result<Json<Vec<Student>>, RegistryError> {
    let students = registry.list().await?;
    Ok(Json(students))
}
