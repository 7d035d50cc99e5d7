use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pinned_core::error::AppError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
///
/// This is the sole translator from internal error kinds to HTTP status
/// codes and user-facing messages.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self.0 {
            AppError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
            AppError::ProfileNotFound(_) => {
                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            AppError::NoPinnedRepos => (
                StatusCode::NOT_FOUND,
                "No pinned repositories found".to_string(),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please try again later.".to_string(),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        (status, axum::Json(ErrorResponse { error })).into_response()
    }
}
