//! Flashgate - HTTP gateway to Gemini
//!
//! This library forwards user text, uploaded files, and multi-turn chat
//! history to a hosted generative-language model and renders its textual
//! replies as safe HTML.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `request`: Payload shaping (prompt, prompt + file, conversation) and provider invocation
//! - `providers`: Provider trait and the Gemini implementation
//! - `server`: axum routes, response envelope, and error mapping
//! - `client`: Gateway client and the append-only conversation store
//! - `formatter`: Model text to HTML rendering pipeline
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use flashgate::{Config, GeminiProvider, RequestBuilder};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::default();
//!     config.provider.api_key = Some("my-key".to_string());
//!
//!     let builder = RequestBuilder::new(Arc::new(GeminiProvider::new(config.provider.clone())?));
//!     let reply = builder.generate_text(Some("Hello!")).await?;
//!     println!("{}", flashgate::format_reply(&reply));
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod formatter;
pub mod providers;
pub mod request;
pub mod server;

// Re-export commonly used types
pub use client::{ChatSession, ConversationStore, GatewayClient};
pub use config::Config;
pub use error::{FlashgateError, Result};
pub use formatter::format_reply;
pub use providers::{GeminiProvider, Provider};
pub use request::{Attachment, ModelRequest, RequestBuilder, Role, Turn};

#[cfg(test)]
pub mod test_utils;
