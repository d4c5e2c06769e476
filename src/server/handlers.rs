//! Route handlers
//!
//! Each handler pulls the caller's input out of the request, hands it to the
//! [`RequestBuilder`](crate::request::RequestBuilder) and wraps the reply in an
//! [`Envelope`]. Shape validation lives in the builder; the handlers only
//! translate transport-level problems (bad JSON, bad multipart) into
//! `InvalidInput`.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use super::response::{ApiError, Envelope};
use super::AppState;
use crate::request::Attachment;

/// Form field carrying the prompt
pub const PROMPT_FIELD: &str = "prompt";

/// Form field carrying the uploaded file
pub const FILE_FIELD: &str = "fileUpload";

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::InvalidInput(err.body_text())
    }
}

/// `POST /api/generate-text` with `{ prompt }`
pub async fn generate_text(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let body = json_body(body)?;
    let prompt = body.get(PROMPT_FIELD).and_then(Value::as_str);

    let text = state.builder.generate_text(prompt).await?;
    Ok(Json(Envelope::success(text)))
}

/// `POST /api/file-processing` with multipart `prompt` + `fileUpload`
pub async fn file_processing(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let mut multipart =
        multipart.map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))?;

    let mut prompt = String::new();
    let mut attachment: Option<Attachment> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(PROMPT_FIELD) => {
                prompt = field.text().await.map_err(multipart_error)?;
            }
            Some(FILE_FIELD) => {
                if attachment.is_some() {
                    return Err(ApiError::InvalidInput(
                        "Only one file may be uploaded".to_string(),
                    ));
                }
                let mime_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_MIME_TYPE)
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                tracing::debug!("Received upload: mime_type={}, size={}", mime_type, bytes.len());
                attachment = Some(Attachment { mime_type, bytes });
            }
            other => {
                tracing::debug!("Ignoring unexpected form field: {:?}", other);
            }
        }
    }

    let text = state
        .builder
        .process_file(&prompt, attachment.as_ref())
        .await?;
    Ok(Json(Envelope::success(text)))
}

/// `POST /api/chat` with `{ conversation: [{ role, text }] }`
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let body = json_body(body)?;
    let conversation = body.get("conversation").cloned().unwrap_or(Value::Null);

    let text = state.builder.chat(&conversation).await?;
    Ok(Json(Envelope::success(text)))
}
