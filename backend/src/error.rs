use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::constants::*;
use shared::email_capture::ErrorResponse;
use tracing::{error, warn};
use validator::ValidationError;

use crate::storage::StoreError;

#[derive(Debug)]
pub enum ApiError {
    MethodNotAllowed,
    MalformedPayload(serde_json::Error),
    InvalidEmail(ValidationError),
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidEmail(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MalformedPayload(_) | Self::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the error and renders it. Store failure details only leave the
    /// server when `expose_details` is set.
    pub fn render(self, expose_details: bool) -> Response {
        let status = self.status();
        let body = match self {
            Self::MethodNotAllowed => ErrorResponse {
                error: METHOD_NOT_ALLOWED_TITLE.to_string(),
                message: METHOD_NOT_ALLOWED_ERROR.to_string(),
                details: None,
            },
            Self::MalformedPayload(e) => {
                warn!("Rejected malformed submission body: {}", e);
                ErrorResponse {
                    error: BAD_REQUEST_TITLE.to_string(),
                    message: MALFORMED_BODY_ERROR.to_string(),
                    details: None,
                }
            }
            Self::InvalidEmail(e) => {
                warn!("Rejected submission with invalid email ({})", e.code);
                ErrorResponse {
                    error: INVALID_EMAIL_TITLE.to_string(),
                    message: INVALID_EMAIL_ERROR.to_string(),
                    details: None,
                }
            }
            Self::Store(e) => {
                error!("Error processing submission: {}", e);
                ErrorResponse {
                    error: INTERNAL_ERROR_TITLE.to_string(),
                    message: SAVE_FAILED_ERROR.to_string(),
                    details: expose_details.then(|| e.to_string()),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.render(false)
    }
}
