//! Gemini provider implementation for Flashgate
//!
//! This module implements the Provider trait for Google's Generative Language
//! REST API (`models/{model}:generateContent`). It maps a [`ModelRequest`]
//! onto Gemini `contents` and extracts the reply text of the first candidate.

use crate::config::ProviderConfig;
use crate::error::{FlashgateError, Result};
use crate::providers::Provider;
use crate::request::{ModelRequest, PartKind, Role};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use flashgate::config::ProviderConfig;
/// use flashgate::providers::{GeminiProvider, Provider};
/// use flashgate::request::build_from_prompt;
///
/// # async fn example() -> flashgate::error::Result<()> {
/// let config = ProviderConfig {
///     api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config)?;
/// let request = build_from_prompt(Some("Hello!"))?;
/// let text = provider.generate_content(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: ProviderConfig,
    api_key: String,
}

/// Request body for generateContent
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

/// One role-tagged message in the request
#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

/// Request part: either text or inline data
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

/// Response body from generateContent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

/// Response part; only text parts contribute to the reply
#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

/// Error envelope returned with non-success statuses
#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Errors
    ///
    /// Returns error if no API key is configured or the HTTP client cannot be
    /// built
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                FlashgateError::Config(
                    "Missing Gemini API key (set GEMINI_API_KEY or provider.api_key)".to_string(),
                )
            })?;

        let mut builder = Client::builder().user_agent(concat!("flashgate/", env!("CARGO_PKG_VERSION")));
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| FlashgateError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Full URL of the generateContent endpoint for the configured model
    ///
    /// # Examples
    ///
    /// ```
    /// use flashgate::config::ProviderConfig;
    /// use flashgate::providers::GeminiProvider;
    ///
    /// let config = ProviderConfig {
    ///     api_key: Some("k".to_string()),
    ///     api_base: "http://localhost:9999/".to_string(),
    ///     ..Default::default()
    /// };
    /// let provider = GeminiProvider::new(config).unwrap();
    /// assert_eq!(
    ///     provider.endpoint(),
    ///     "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
    /// );
    /// ```
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Convert a model request to Gemini contents
    ///
    /// Consecutive untagged parts are gathered into one `user` content.
    /// Every role-tagged part becomes its own content.
    fn convert_request(&self, request: &ModelRequest) -> GeminiRequest {
        let mut contents: Vec<GeminiContent> = Vec::new();
        let mut open_untagged = false;

        for part in request.parts() {
            let wire_part = match &part.kind {
                PartKind::Text { value } => GeminiPart::Text {
                    text: value.clone(),
                },
                PartKind::InlineBinary {
                    mime_type,
                    base64_data,
                } => GeminiPart::InlineData {
                    inline_data: GeminiInlineData {
                        mime_type: mime_type.clone(),
                        data: base64_data.clone(),
                    },
                },
            };

            match part.role {
                None if open_untagged => {
                    if let Some(last) = contents.last_mut() {
                        last.parts.push(wire_part);
                    }
                }
                None => {
                    contents.push(GeminiContent {
                        role: Role::User.as_str().to_string(),
                        parts: vec![wire_part],
                    });
                    open_untagged = true;
                }
                Some(role) => {
                    contents.push(GeminiContent {
                        role: role.as_str().to_string(),
                        parts: vec![wire_part],
                    });
                    open_untagged = false;
                }
            }
        }

        GeminiRequest { contents }
    }

    /// Concatenate the non-thought text parts of the first candidate
    fn extract_text(response: GeminiResponse) -> Result<String> {
        if let Some(usage) = &response.usage_metadata {
            tracing::debug!(
                "Gemini usage: prompt_tokens={}, completion_tokens={}",
                usage.prompt_token_count,
                usage.candidates_token_count
            );
        }

        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(
                FlashgateError::Provider(format!("Gemini returned no reply: {}", reason)).into(),
            );
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter(|part| !part.thought)
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(FlashgateError::Provider(format!(
                "Gemini reply contained no text (finish_reason={})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))
            .into());
        }

        Ok(text)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate_content(&self, request: &ModelRequest) -> Result<String> {
        let body = self.convert_request(request);

        tracing::debug!(
            "Sending Gemini request: model={}, {} contents",
            self.config.model,
            body.contents.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                FlashgateError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<GeminiErrorBody>(&error_text)
                .map(|b| format!("{} {}", b.error.status, b.error.message))
                .unwrap_or(error_text);
            tracing::error!("Gemini returned error {}: {}", status, detail);
            return Err(FlashgateError::Provider(format!(
                "Gemini returned error {}: {}",
                status, detail
            ))
            .into());
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            FlashgateError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        Self::extract_text(gemini_response)
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_base", &self.config.api_base)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}
