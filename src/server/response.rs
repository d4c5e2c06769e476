//! Response envelope and error mapping for the HTTP API

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::FlashgateError;

/// Message sent with every successful reply
pub const SUCCESS_MESSAGE: &str = "Success";

/// Message sent for every unclassified failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Uniform response body: `{ message, data? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Outcome description
    pub message: String,
    /// Model reply text, present on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Envelope {
    /// `{ message: "Success", data }`
    pub fn success(data: impl Into<String>) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data.into()),
        }
    }

    /// `{ message }` without data
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// Failure of an API handler
#[derive(Debug)]
pub enum ApiError {
    /// Caller sent data of the wrong shape (400)
    InvalidInput(String),
    /// Request body exceeded the configured limit (413)
    PayloadTooLarge(String),
    /// Anything else; logged, never shown to the caller (500)
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<FlashgateError>() {
            Some(FlashgateError::InvalidInput(reason)) => Self::InvalidInput(reason.clone()),
            _ => Self::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidInput(reason) => {
                tracing::debug!("Rejected request: {}", reason);
                (StatusCode::BAD_REQUEST, reason)
            }
            Self::PayloadTooLarge(reason) => {
                tracing::warn!("Rejected oversized request: {}", reason);
                (StatusCode::PAYLOAD_TOO_LARGE, reason)
            }
            Self::Internal(err) => {
                tracing::error!("Request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(Envelope::message(message))).into_response()
    }
}
