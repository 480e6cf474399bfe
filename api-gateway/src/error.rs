//! Error handling for the API gateway
//!
//! Every failure is rendered with the same envelope, `{"error": "<message>"}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::Error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message returned for every 404
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";

const INTERNAL_MESSAGE: &str = "Internal server error";

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Common error: {0}")]
    Common(#[from] Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl ApiError {
    /// Status code and client-facing message for this error
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                format!("Method {} not allowed for this resource", method),
            ),
            ApiError::Common(e) => match e {
                Error::FundNotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
                Error::MissingFields(_) | Error::InvalidField { .. } | Error::ValidationError(_) => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                Error::DuplicateFund(_) => (StatusCode::CONFLICT, e.to_string()),
                Error::ConfigurationError(_)
                | Error::Internal(_)
                | Error::Database(_)
                | Error::Migration(_)
                | Error::Serialization(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            // Correlates the opaque 500 body with the logged cause
            let error_id = Uuid::new_v4();
            tracing::error!("API Error [{}]: {:?}", error_id, &self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
