//! Path parameter extractor with structured rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Like [`axum::extract::Path`], but failures become an [`AppError`].
///
/// ```ignore
/// async fn get_event(AppPath(id): AppPath<String>) -> String {
///     format!("Event: {id}")
/// }
///
/// let app = Router::new().route("/event/{id}", get(get_event));
/// ```
pub struct AppPath<T>(pub T);

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(AppPath(value))
    }
}
