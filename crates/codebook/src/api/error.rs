//! Mapping from library errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::{ErrorMessage, Message, INVALID_MESSAGE, NOT_FOUND_MESSAGE};
use crate::error::Error;

/// Error returned by handlers.
///
/// Wraps the library [`Error`]; the status and body are chosen from its
/// variant when the response is built.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            Error::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidBody(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.0 {
            Error::RecordNotFound { .. } => (
                status,
                Json(Message {
                    message: NOT_FOUND_MESSAGE,
                }),
            )
                .into_response(),
            Error::InvalidBody(source) => (
                status,
                Json(ErrorMessage {
                    message: INVALID_MESSAGE,
                    error: source.to_string(),
                }),
            )
                .into_response(),
            other => {
                error!(error = %other, "Request failed");
                (
                    status,
                    Json(ErrorMessage {
                        message: "Internal error",
                        error: other.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
