use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{0}")]
    Validation(String),

    #[error("student with RA {0} already exists")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl RegistryError {
    pub fn status(&self) -> StatusCode {
        match self {
            RegistryError::Validation(_) => StatusCode::BAD_REQUEST,
            RegistryError::Conflict(_) => StatusCode::CONFLICT,
            RegistryError::StoreUnavailable(_) | RegistryError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Translate a failed insert, recognising the `ra` unique constraint.
    pub(crate) fn from_insert(err: sqlx::Error, ra: &str) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return RegistryError::Conflict(ra.to_string());
            }
        }
        err.into()
    }
}

impl From<sqlx::Error> for RegistryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => RegistryError::StoreUnavailable(err.to_string()),
            other => RegistryError::Database(other),
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store failures are logged in full but never echoed to the client.
        let message = match &self {
            RegistryError::Validation(_) | RegistryError::Conflict(_) => self.to_string(),
            RegistryError::StoreUnavailable(detail) => {
                tracing::error!("Store unavailable: {}", detail);
                "store unavailable".to_string()
            }
            RegistryError::Database(e) => {
                tracing::error!("Unexpected database error: {}", e);
                "internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
