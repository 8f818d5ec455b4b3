//! Ollama providers for embeddings and chat completion.
//!
//! This module is only available when the `ollama` feature is enabled.
//! Embeddings use Ollama's native `/api/embeddings` endpoint; chat uses
//! the OpenAI-compatible `/v1/chat/completions` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::completion::{ChatMessage, ChatModel};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// The default Ollama server address.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// The default embedding model.
const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

/// Embedding dimensionality of `nomic-embed-text`.
const DEFAULT_EMBED_DIMENSIONS: usize = 768;

/// The default chat model.
const DEFAULT_CHAT_MODEL: &str = "llama3.1:8b";

/// Reply returned when the chat endpoint produces no content.
const EMPTY_RESPONSE_REPLY: &str = "Sorry, I could not generate a response.";

/// An [`EmbeddingProvider`] backed by a local Ollama server.
///
/// # Configuration
///
/// - `base_url` – defaults to `http://localhost:11434`.
/// - `model` – defaults to `nomic-embed-text` (768 dimensions).
///
/// # Example
///
/// ```rust,ignore
/// use kb_rag::ollama::OllamaEmbeddingProvider;
///
/// let provider = OllamaEmbeddingProvider::new();
/// let embedding = provider.embed("hello world").await?;
/// ```
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbeddingProvider {
    /// Create a new provider with the default server address and model.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_EMBED_MODEL.into(),
            dimensions: DEFAULT_EMBED_DIMENSIONS,
        }
    }

    /// Set the Ollama server base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the embedding model and its dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }
}

impl Default for OllamaEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Extract the error detail from a non-success response body.
fn error_detail(body: String) -> String {
    serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error).unwrap_or(body)
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Ollama", text_len = text.len(), model = %self.model, "embedding text");

        let url = format!("{}/api/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&EmbeddingRequest { model: &self.model, prompt: text })
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "embedding request failed");
                RagError::Embedding {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = error_detail(response.text().await.unwrap_or_default());
            error!(provider = "Ollama", %status, "embedding API error");
            return Err(RagError::Embedding {
                provider: "Ollama".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse embedding response");
            RagError::Embedding {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(parsed.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// A [`ChatModel`] backed by Ollama's OpenAI-compatible chat endpoint.
///
/// # Configuration
///
/// - `base_url` – defaults to `http://localhost:11434`.
/// - `model` – defaults to `llama3.1:8b`.
/// - `temperature` – defaults to `0.3`, keeping answers close to the
///   provided context.
/// - `max_tokens` – defaults to `1000`.
pub struct OllamaChatModel {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaChatModel {
    /// Create a new chat model with the default server address and model.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_CHAT_MODEL.into(),
            temperature: 0.3,
            max_tokens: 1000,
        }
    }

    /// Set the Ollama server base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the chat model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for OllamaChatModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatModel for OllamaChatModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        debug!(
            provider = "Ollama",
            model = %self.model,
            message_count = messages.len(),
            "requesting chat completion"
        );

        let url = format!("{}/v1/chat/completions", self.base_url);
        let request_body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response =
            self.client.post(&url).json(&request_body).send().await.map_err(|e| {
                error!(provider = "Ollama", error = %e, "chat request failed");
                RagError::Completion {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = error_detail(response.text().await.unwrap_or_default());
            error!(provider = "Ollama", %status, "chat API error");
            return Err(RagError::Completion {
                provider: "Ollama".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse chat response");
            RagError::Completion {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| EMPTY_RESPONSE_REPLY.to_string()))
    }
}
