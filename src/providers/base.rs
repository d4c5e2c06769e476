//! Base provider trait for Flashgate
//!
//! This module defines the Provider trait that the Gemini client implements
//! and that tests substitute with a stub.

use crate::error::Result;
use crate::request::ModelRequest;
use async_trait::async_trait;

/// Generative-text provider
///
/// A provider exposes exactly one operation: send an ordered set of content
/// parts to a model and return the reply text. Implementations must be
/// shareable across concurrent requests.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Sends the request to the model and returns its textual reply
    ///
    /// # Arguments
    ///
    /// * `request` - Content parts to send, in order
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, authentication failure,
    /// provider-side error or a reply without text
    async fn generate_content(&self, request: &ModelRequest) -> Result<String>;

    /// Identifier of the model requests are sent to
    fn model(&self) -> String;
}
