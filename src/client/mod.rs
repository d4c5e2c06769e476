//! Client for a running gateway
//!
//! [`GatewayClient`] speaks the gateway's three routes over HTTP.
//! [`ChatSession`] pairs it with a [`ConversationStore`] so each message is
//! sent together with the whole history, the way the chat page does.

pub mod conversation;

pub use conversation::ConversationStore;

use crate::error::{FlashgateError, Result};
use crate::request::{Attachment, Role, Turn};
use crate::server::response::Envelope;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::json;

/// HTTP client for the gateway API
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    /// Creates a client for the gateway at `base_url`
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    ///
    /// # Examples
    ///
    /// ```
    /// use flashgate::client::GatewayClient;
    ///
    /// let client = GatewayClient::new("http://localhost:3000/").unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:3000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("flashgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FlashgateError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Gateway base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}/api/{}", self.base_url, route)
    }

    /// `POST /api/generate-text`
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url("generate-text"))
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(FlashgateError::Http)?;
        Self::read_envelope(response).await
    }

    /// `POST /api/file-processing` as multipart form data
    pub async fn process_file(
        &self,
        prompt: &str,
        attachment: Attachment,
        file_name: &str,
    ) -> Result<String> {
        let file_part = Part::bytes(attachment.bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str(&attachment.mime_type)
            .map_err(|e| FlashgateError::Client(format!("Invalid MIME type: {}", e)))?;

        let form = Form::new()
            .text("prompt", prompt.to_string())
            .part("fileUpload", file_part);

        let response = self
            .client
            .post(self.url("file-processing"))
            .multipart(form)
            .send()
            .await
            .map_err(FlashgateError::Http)?;
        Self::read_envelope(response).await
    }

    /// `POST /api/chat` with the full conversation
    pub async fn chat(&self, conversation: &[Turn]) -> Result<String> {
        let response = self
            .client
            .post(self.url("chat"))
            .json(&json!({ "conversation": conversation }))
            .send()
            .await
            .map_err(FlashgateError::Http)?;
        Self::read_envelope(response).await
    }

    async fn read_envelope(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let envelope: Option<Envelope> = response.json().await.ok();

        if !status.is_success() {
            let message = envelope
                .map(|e| e.message)
                .unwrap_or_else(|| "no response body".to_string());
            tracing::warn!("Gateway returned {}: {}", status, message);
            return Err(FlashgateError::Client(format!(
                "Gateway returned {}: {}",
                status, message
            ))
            .into());
        }

        envelope
            .and_then(|e| e.data)
            .filter(|data| !data.is_empty())
            .ok_or_else(|| FlashgateError::EmptyReply.into())
    }
}

/// One chat session: history plus the client that carries it
#[derive(Debug)]
pub struct ChatSession {
    client: GatewayClient,
    store: ConversationStore,
}

impl ChatSession {
    /// Starts a session with empty history
    pub fn new(client: GatewayClient) -> Self {
        Self {
            client,
            store: ConversationStore::new(),
        }
    }

    /// Sends a user message with the accumulated history
    ///
    /// The user turn is recorded before the request is sent and stays in the
    /// history even when the request fails. The model's reply is recorded
    /// only on success.
    ///
    /// # Errors
    ///
    /// Returns error if the gateway is unreachable, answers with a non-success
    /// status, or answers without data
    pub async fn send(&mut self, text: &str) -> Result<String> {
        self.store.append(Role::User, text);
        let reply = self.client.chat(self.store.turns()).await?;
        self.store.append(Role::Model, reply.clone());
        Ok(reply)
    }

    /// Conversation so far
    pub fn history(&self) -> &ConversationStore {
        &self.store
    }
}
