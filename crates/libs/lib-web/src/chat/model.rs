//! # Chat Model
//!
//! [`ChatModel`] is the seam between the chat service and the hosted
//! generative-AI provider. Production uses [`GenaiChatModel`] (rust-genai,
//! Gemini by default); tests plug in their own implementations.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use lib_core::AiConfig;
use thiserror::Error;

/// Incremental reply text.
pub type TextStream = BoxStream<'static, Result<String, ModelError>>;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The provider call failed (network, auth, quota, bad model name).
    #[error("AI request failed: {0}")]
    Request(String),

    /// The provider answered without any text.
    #[error("Empty response from AI")]
    EmptyResponse,

    /// Built without the `genai` feature.
    #[error("AI chat is not enabled. Please enable the 'genai' feature.")]
    Disabled,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Name reported in logs.
    fn model_name(&self) -> &str;

    /// Generate a complete reply for a single composed prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    /// Generate a reply as a stream of text fragments.
    async fn generate_stream(&self, prompt: &str) -> Result<TextStream, ModelError>;
}

/// [`ChatModel`] backed by rust-genai.
///
/// Any provider genai resolves from the model name works; the key comes from
/// [`AiConfig::api_key`] or, when that is empty, from the provider's own
/// environment variable (e.g. `GEMINI_API_KEY`).
pub struct GenaiChatModel {
    config: AiConfig,
    #[cfg(feature = "genai")]
    client: genai::Client,
}

impl GenaiChatModel {
    pub fn new(config: AiConfig) -> Self {
        #[cfg(feature = "genai")]
        let client = build_client(&config.api_key);

        Self {
            config,
            #[cfg(feature = "genai")]
            client,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

#[cfg(feature = "genai")]
fn build_client(api_key: &str) -> genai::Client {
    use genai::resolver::{AuthData, AuthResolver};
    use genai::Client;

    if api_key.is_empty() {
        return Client::default();
    }

    let api_key = api_key.to_string();
    let auth_resolver = AuthResolver::from_resolver_fn(
        move |_model_iden| -> Result<Option<AuthData>, genai::resolver::Error> {
            Ok(Some(AuthData::from_single(api_key.clone())))
        },
    );

    Client::builder().with_auth_resolver(auth_resolver).build()
}

#[cfg(feature = "genai")]
impl GenaiChatModel {
    fn request(prompt: &str) -> genai::chat::ChatRequest {
        use genai::chat::{ChatMessage, ChatRequest};
        ChatRequest::new(vec![ChatMessage::user(prompt)])
    }

    fn options(&self) -> genai::chat::ChatOptions {
        genai::chat::ChatOptions::default()
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
    }
}

#[cfg(feature = "genai")]
#[async_trait]
impl ChatModel for GenaiChatModel {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        tracing::debug!(model = %self.config.model, "[AI] exec_chat");

        let options = self.options();
        let chat_res = self
            .client
            .exec_chat(&self.config.model, Self::request(prompt), Some(&options))
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let text = chat_res
            .first_text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ModelError::EmptyResponse)?;

        Ok(text.to_string())
    }

    async fn generate_stream(&self, prompt: &str) -> Result<TextStream, ModelError> {
        use futures_util::StreamExt;
        use genai::chat::ChatStreamEvent;

        tracing::debug!(model = %self.config.model, "[AI] exec_chat_stream");

        let options = self.options();
        let response = self
            .client
            .exec_chat_stream(&self.config.model, Self::request(prompt), Some(&options))
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let stream = response.stream.filter_map(|event| async move {
            match event {
                Ok(ChatStreamEvent::Chunk(chunk)) if !chunk.content.is_empty() => Some(Ok(chunk.content)),
                Ok(_) => None,
                Err(e) => Some(Err(ModelError::Request(e.to_string()))),
            }
        });

        Ok(stream.boxed())
    }
}

#[cfg(not(feature = "genai"))]
#[async_trait]
impl ChatModel for GenaiChatModel {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        Err(ModelError::Disabled)
    }

    async fn generate_stream(&self, _prompt: &str) -> Result<TextStream, ModelError> {
        Err(ModelError::Disabled)
    }
}
