//! # Chat Service
//!
//! Loads the active prompt configuration, assembles the context and hands the
//! composed prompt to the [`ChatModel`].

use crate::chat::{assemble_context, compose_prompt, ChatModel, TextStream};
use lib_core::model::store::ChatPromptRepository;
use lib_core::{AppError, DbPool};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

pub struct ChatService {
    db: DbPool,
    model: Arc<dyn ChatModel>,
}

impl ChatService {
    pub fn new(db: DbPool, model: Arc<dyn ChatModel>) -> Self {
        Self { db, model }
    }

    /// Build the full prompt for `message` from the active configuration.
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn build_prompt(&self, message: &str) -> Result<String, AppError> {
        let config = ChatPromptRepository::find_active(&self.db).await?;
        debug!(config = ?config.as_ref().map(|c| c.id), "[CHAT] Prompt configuration resolved");

        let ctx = assemble_context(&self.db, config.as_ref()).await?;
        Ok(compose_prompt(Some(&ctx.system_prompt), Some(&ctx.context), message))
    }

    /// Generate a complete reply.
    #[instrument(skip(self, message), fields(model = %self.model.model_name()))]
    pub async fn reply(&self, message: &str) -> Result<String, AppError> {
        let prompt = self.build_prompt(message).await?;

        let reply = self.model.generate(&prompt).await.map_err(|e| {
            error!(error = %e, "[CHAT] Model call failed");
            AppError::Upstream(e.to_string())
        })?;

        info!(reply_len = reply.len(), "[CHAT] Reply generated");
        Ok(reply)
    }

    /// Generate a reply as a stream of text fragments.
    #[instrument(skip(self, message), fields(model = %self.model.model_name()))]
    pub async fn reply_stream(&self, message: &str) -> Result<TextStream, AppError> {
        let prompt = self.build_prompt(message).await?;

        self.model.generate_stream(&prompt).await.map_err(|e| {
            error!(error = %e, "[CHAT] Model stream failed to start");
            AppError::Upstream(e.to_string())
        })
    }
}
