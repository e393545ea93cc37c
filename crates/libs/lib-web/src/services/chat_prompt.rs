//! # Chat Prompt Service
//!
//! Admin management of prompt configurations. Activation is exclusive; the
//! repository deactivates the other configurations in the same transaction.

use lib_core::model::store::models::{ChatPromptConfig, ChatPromptForCreate, ChatPromptForUpdate};
use lib_core::model::store::ChatPromptRepository;
use lib_core::{AppError, DbPool};
use lib_utils::validate_not_empty;
use tracing::{info, instrument};

pub struct ChatPromptService {
    db: DbPool,
}

impl ChatPromptService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<ChatPromptConfig>, AppError> {
        Ok(ChatPromptRepository::list(&self.db).await?)
    }

    pub async fn get(&self, id: i64) -> Result<ChatPromptConfig, AppError> {
        ChatPromptRepository::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| prompt_not_found(id))
    }

    #[instrument(skip(self, data), fields(name = %data.name, active = data.is_active))]
    pub async fn create(&self, data: ChatPromptForCreate) -> Result<ChatPromptConfig, AppError> {
        validate_not_empty(&data.name, "Tên").map_err(AppError::InvalidInput)?;
        validate_not_empty(&data.prompt, "Nội dung prompt").map_err(AppError::InvalidInput)?;

        let config = ChatPromptRepository::create(&self.db, data).await?;
        info!(id = config.id, "[PROMPTS] Created");
        Ok(config)
    }

    #[instrument(skip(self, data))]
    pub async fn update(&self, id: i64, data: ChatPromptForUpdate) -> Result<ChatPromptConfig, AppError> {
        if let Some(name) = &data.name {
            validate_not_empty(name, "Tên").map_err(AppError::InvalidInput)?;
        }
        if let Some(prompt) = &data.prompt {
            validate_not_empty(prompt, "Nội dung prompt").map_err(AppError::InvalidInput)?;
        }

        let config = ChatPromptRepository::update(&self.db, id, data)
            .await?
            .ok_or_else(|| prompt_not_found(id))?;
        info!(id, active = config.is_active, "[PROMPTS] Updated");
        Ok(config)
    }

    #[instrument(skip(self))]
    pub async fn activate(&self, id: i64) -> Result<ChatPromptConfig, AppError> {
        let config = ChatPromptRepository::activate(&self.db, id)
            .await?
            .ok_or_else(|| prompt_not_found(id))?;
        info!(id, "[PROMPTS] Activated");
        Ok(config)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !ChatPromptRepository::delete(&self.db, id).await? {
            return Err(prompt_not_found(id));
        }
        info!(id, "[PROMPTS] Deleted");
        Ok(())
    }
}

fn prompt_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Không tìm thấy cấu hình prompt {}", id))
}
