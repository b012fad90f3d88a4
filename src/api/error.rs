use crate::error::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Request-boundary error: a status code plus the message the caller is
/// allowed to see. Upstream and datastore details stay in the logs.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(message) => Self::bad_request(message),
            Error::Configuration(_) => Self::internal(err.to_string()),
            Error::Upstream { .. } => {
                // Details were logged where the call was made.
                Self::internal("Failed to fetch conversations")
            }
            Error::Persistence(_) => {
                tracing::error!(error = %err, "persistence error");
                Self::internal("Failed to persist conversation")
            }
            Error::Http(_) => {
                tracing::error!(error = %err, "transport error");
                Self::internal("Internal server error")
            }
        }
    }
}
