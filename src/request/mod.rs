//! Request shaping for the model provider
//!
//! This module defines the provider-agnostic request types (`ModelRequest`,
//! `ContentPart`, `Turn`, `Attachment`) and the [`RequestBuilder`] that turns
//! one of three caller intents (plain prompt, prompt plus file, multi-turn
//! conversation) into a `ModelRequest` and hands it to the injected provider.

pub mod builder;

pub use builder::{
    build_from_conversation, build_from_prompt, build_from_prompt_and_attachment,
    build_from_turns, RequestBuilder,
};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Speaker role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing into the client
    User,
    /// The generative model
    Model,
}

impl Role {
    /// Wire name used by the provider ("user" or "model")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who said it
    pub role: Role,
    /// What was said
    pub text: String,
}

impl Turn {
    /// Creates a user turn
    ///
    /// # Examples
    ///
    /// ```
    /// use flashgate::request::{Role, Turn};
    ///
    /// let turn = Turn::user("Hello");
    /// assert_eq!(turn.role, Role::User);
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Creates a model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Uploaded file carried by a single request
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Declared MIME type of the upload
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Bytes,
}

impl Attachment {
    /// Creates a new attachment
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Encodes the raw bytes as standard base64 text
    ///
    /// # Examples
    ///
    /// ```
    /// use flashgate::request::Attachment;
    ///
    /// let attachment = Attachment::new("text/plain", &b"hi"[..]);
    /// assert_eq!(attachment.to_base64(), "aGk=");
    /// ```
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Payload of a single content part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartKind {
    /// Plain text
    Text {
        /// The text value
        value: String,
    },
    /// Binary data carried inline as base64
    InlineBinary {
        /// MIME type of the decoded data
        mime_type: String,
        /// Standard base64 encoding of the data
        base64_data: String,
    },
}

/// One atomic unit of a provider request
///
/// Parts without a role belong to the single user message of a one-shot
/// request. Parts with a role are conversation turns and keep their own
/// speaker tag on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPart {
    /// Speaker tag for conversation parts
    pub role: Option<Role>,
    /// Text or inline binary payload
    pub kind: PartKind,
}

impl ContentPart {
    /// Untagged text part
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            role: None,
            kind: PartKind::Text {
                value: value.into(),
            },
        }
    }

    /// Untagged inline binary part
    pub fn inline_binary(mime_type: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Self {
            role: None,
            kind: PartKind::InlineBinary {
                mime_type: mime_type.into(),
                base64_data: base64_data.into(),
            },
        }
    }

    /// Text part tagged with a conversation role
    pub fn turn(role: Role, value: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            kind: PartKind::Text {
                value: value.into(),
            },
        }
    }

    /// Returns the text value if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            PartKind::Text { value } => Some(value),
            PartKind::InlineBinary { .. } => None,
        }
    }
}

/// Provider-agnostic request: a non-empty ordered sequence of content parts
///
/// Instances are only produced by the builder functions in this module, which
/// all guarantee at least one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    parts: Vec<ContentPart>,
}

impl ModelRequest {
    pub(crate) fn from_parts(parts: Vec<ContentPart>) -> Self {
        debug_assert!(!parts.is_empty(), "a model request needs at least one part");
        Self { parts }
    }

    /// Content parts in request order
    pub fn parts(&self) -> &[ContentPart] {
        &self.parts
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always false for requests built through this module
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
