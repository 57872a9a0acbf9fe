use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use crud::CrudError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Crud(#[from] CrudError),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        let message = err.to_string();
        match err {
            UserError::Crud(err) => err.into(),
            UserError::InvalidCredentials => AppError::Unauthorized(message),
            UserError::Forbidden(msg) => AppError::Forbidden(msg),
            UserError::PasswordHash(_) | UserError::Token(_) => {
                tracing::error!("{}", message);
                AppError::InternalServerError("An internal error occurred".to_string())
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (
                UserError::PasswordHash("bad salt".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CrudError::not_found("User", "alba").into(),
                StatusCode::NOT_FOUND,
            ),
            (
                CrudError::IdRequired { resource: "User" }.into(),
                StatusCode::NOT_IMPLEMENTED,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
