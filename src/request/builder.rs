//! Payload assembly and provider invocation
//!
//! The three `build_*` functions are pure and independently testable. The
//! [`RequestBuilder`] owns the provider handle and composes build + invoke so
//! every entry shape shares one invocation path.

use std::sync::Arc;

use serde_json::Value;

use super::{Attachment, ContentPart, ModelRequest, Turn};
use crate::error::{FlashgateError, Result};
use crate::providers::Provider;

const CONVERSATION_NOT_ARRAY: &str = "Conversation must be an array of messages";

/// Builds a request holding a single text part
///
/// # Errors
///
/// Returns `InvalidInput` if the prompt is absent or empty.
///
/// # Examples
///
/// ```
/// use flashgate::request::build_from_prompt;
///
/// let request = build_from_prompt(Some("Hello")).unwrap();
/// assert_eq!(request.len(), 1);
/// assert_eq!(request.parts()[0].as_text(), Some("Hello"));
/// ```
pub fn build_from_prompt(prompt: Option<&str>) -> Result<ModelRequest> {
    match prompt {
        Some(prompt) if !prompt.is_empty() => {
            Ok(ModelRequest::from_parts(vec![ContentPart::text(prompt)]))
        }
        _ => Err(FlashgateError::InvalidInput("Prompt is required".to_string()).into()),
    }
}

/// Builds a request of `[inline binary, text]` from a prompt and a file
///
/// The attachment always precedes the prompt.
///
/// # Errors
///
/// Returns `InvalidInput` if the attachment is absent or carries no bytes.
pub fn build_from_prompt_and_attachment(
    prompt: &str,
    attachment: Option<&Attachment>,
) -> Result<ModelRequest> {
    let attachment = attachment
        .ok_or_else(|| FlashgateError::InvalidInput("File upload is required".to_string()))?;

    if attachment.bytes.is_empty() {
        return Err(FlashgateError::InvalidInput("Uploaded file is empty".to_string()).into());
    }

    Ok(ModelRequest::from_parts(vec![
        ContentPart::inline_binary(attachment.mime_type.clone(), attachment.to_base64()),
        ContentPart::text(prompt),
    ]))
}

/// Builds a conversation request from an untyped JSON value
///
/// The value must be an array of `{ "role": "user" | "model", "text": ... }`
/// objects. Part *i* of the result corresponds to element *i*.
///
/// # Errors
///
/// Returns `InvalidInput` if the value is not an array, if the array is empty,
/// or if any element is not a well-formed turn.
///
/// # Examples
///
/// ```
/// use flashgate::request::build_from_conversation;
/// use serde_json::json;
///
/// assert!(build_from_conversation(&json!("not-an-array")).is_err());
///
/// let request = build_from_conversation(&json!([
///     {"role": "user", "text": "Hi"},
///     {"role": "model", "text": "Hello!"}
/// ]))
/// .unwrap();
/// assert_eq!(request.len(), 2);
/// ```
pub fn build_from_conversation(conversation: &Value) -> Result<ModelRequest> {
    let items = conversation
        .as_array()
        .ok_or_else(|| FlashgateError::InvalidInput(CONVERSATION_NOT_ARRAY.to_string()))?;

    let turns = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Turn>(item.clone()).map_err(|e| {
                FlashgateError::InvalidInput(format!("Invalid message at index {}: {}", index, e))
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    build_from_turns(&turns)
}

/// Builds a conversation request from already-typed turns
///
/// # Errors
///
/// Returns `InvalidInput` if there are no turns.
pub fn build_from_turns(turns: &[Turn]) -> Result<ModelRequest> {
    if turns.is_empty() {
        return Err(FlashgateError::InvalidInput(
            "Conversation must contain at least one message".to_string(),
        )
        .into());
    }

    Ok(ModelRequest::from_parts(
        turns
            .iter()
            .map(|turn| ContentPart::turn(turn.role, turn.text.clone()))
            .collect(),
    ))
}

/// Builds requests and sends them to the injected provider
///
/// Cloning is cheap; the provider is shared behind an `Arc`.
#[derive(Clone)]
pub struct RequestBuilder {
    provider: Arc<dyn Provider>,
}

impl RequestBuilder {
    /// Creates a builder around an explicitly owned provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Model identifier of the underlying provider
    pub fn model(&self) -> String {
        self.provider.model()
    }

    /// Sends a request to the provider and returns its reply text
    ///
    /// Every failure, whatever its origin, is reported as
    /// `FlashgateError::Provider`.
    pub async fn invoke(&self, request: &ModelRequest) -> Result<String> {
        tracing::debug!(
            "Invoking provider: model={}, parts={}",
            self.provider.model(),
            request.len()
        );

        self.provider
            .generate_content(request)
            .await
            .map_err(|e| match e.downcast::<FlashgateError>() {
                Ok(FlashgateError::Provider(reason)) => FlashgateError::Provider(reason).into(),
                Ok(other) => FlashgateError::Provider(other.to_string()).into(),
                Err(e) => FlashgateError::Provider(format!("{:#}", e)).into(),
            })
    }

    /// Single prompt -> reply
    pub async fn generate_text(&self, prompt: Option<&str>) -> Result<String> {
        let request = build_from_prompt(prompt)?;
        self.invoke(&request).await
    }

    /// Prompt plus uploaded file -> reply
    pub async fn process_file(&self, prompt: &str, attachment: Option<&Attachment>) -> Result<String> {
        let request = build_from_prompt_and_attachment(prompt, attachment)?;
        self.invoke(&request).await
    }

    /// Conversation history -> reply to its last turn
    pub async fn chat(&self, conversation: &Value) -> Result<String> {
        let request = build_from_conversation(conversation)?;
        self.invoke(&request).await
    }
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("model", &self.provider.model())
            .finish()
    }
}
