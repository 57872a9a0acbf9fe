use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

pub const DOESNT_EXIST: &str = "ERR:RESOURCE:01";
pub const ALREADY_EXISTS: &str = "ERR:RESOURCE:02";
pub const ID_REQUIRED: &str = "ERR:RESOURCE:03";

#[derive(Debug, Error)]
pub enum CrudError {
    #[error("ERR:RESOURCE:01 {resource} '{id}' doesn't exist")]
    NotFound { resource: &'static str, id: String },

    #[error("ERR:RESOURCE:02 {resource} '{id}' already exists")]
    AlreadyExists { resource: &'static str, id: String },

    #[error("ERR:RESOURCE:03 {resource} requires an explicit identifier")]
    IdRequired { resource: &'static str },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CrudResult<T> = Result<T, CrudError>;

impl CrudError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        CrudError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn already_exists(resource: &'static str, id: impl ToString) -> Self {
        CrudError::AlreadyExists {
            resource,
            id: id.to_string(),
        }
    }

    /// Stable resource error code, if this error carries one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            CrudError::NotFound { .. } => Some(DOESNT_EXIST),
            CrudError::AlreadyExists { .. } => Some(ALREADY_EXISTS),
            CrudError::IdRequired { .. } => Some(ID_REQUIRED),
            _ => None,
        }
    }
}

impl From<CrudError> for AppError {
    fn from(err: CrudError) -> Self {
        let message = err.to_string();
        match err {
            CrudError::NotFound { .. } => AppError::NotFound(message),
            CrudError::AlreadyExists { .. } => AppError::Conflict(message),
            CrudError::IdRequired { .. } => AppError::NotImplemented(message),
            CrudError::Validation(errors) => AppError::ValidationError(errors),
            CrudError::Forbidden(msg) => AppError::Forbidden(msg),
            CrudError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for CrudError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for CrudError {
    fn from(err: mongodb::error::Error) -> Self {
        CrudError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for CrudError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        CrudError::Database(err.to_string())
    }
}
