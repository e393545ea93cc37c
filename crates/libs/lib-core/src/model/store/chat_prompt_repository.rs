//! # Chat Prompt Repository
//!
//! Data access for admin-managed chat prompt configurations.
//!
//! At most one configuration is active: every write that activates a row
//! deactivates the others in the same transaction. Reads still tolerate
//! several active rows (e.g. edited by hand) and pick the most recently
//! updated one.

use super::models::{ChatPromptConfig, ChatPromptForCreate, ChatPromptForUpdate};
use super::DbPool;
use chrono::Utc;
use sqlx::{query, query_as, Sqlite, Transaction};

pub struct ChatPromptRepository;

impl ChatPromptRepository {
    /// All configurations, newest first.
    pub async fn list(pool: &DbPool) -> Result<Vec<ChatPromptConfig>, sqlx::Error> {
        query_as::<_, ChatPromptConfig>("SELECT * FROM chat_prompts ORDER BY updated_at DESC, id DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<ChatPromptConfig>, sqlx::Error> {
        query_as::<_, ChatPromptConfig>("SELECT * FROM chat_prompts WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The active configuration, if any.
    pub async fn find_active(pool: &DbPool) -> Result<Option<ChatPromptConfig>, sqlx::Error> {
        query_as::<_, ChatPromptConfig>(
            "SELECT * FROM chat_prompts WHERE is_active = 1 ORDER BY updated_at DESC, id DESC LIMIT 1",
        )
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &DbPool, data: ChatPromptForCreate) -> Result<ChatPromptConfig, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        if data.is_active {
            Self::deactivate_all(&mut tx).await?;
        }

        let id = query(
            r#"
            INSERT INTO chat_prompts (name, prompt, is_active, include_products, include_news,
                                      include_categories, include_contacts, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            "#,
        )
        .bind(&data.name)
        .bind(&data.prompt)
        .bind(data.is_active)
        .bind(data.include_products)
        .bind(data.include_news)
        .bind(data.include_categories)
        .bind(data.include_contacts)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;

        Self::find_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Apply a partial update. `Ok(None)` when `id` does not exist.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        data: ChatPromptForUpdate,
    ) -> Result<Option<ChatPromptConfig>, sqlx::Error> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let merged = data.merge_into(current);
        let mut tx = pool.begin().await?;

        if merged.is_active {
            Self::deactivate_all(&mut tx).await?;
        }

        query(
            r#"
            UPDATE chat_prompts
            SET name = ?1, prompt = ?2, is_active = ?3, include_products = ?4, include_news = ?5,
                include_categories = ?6, include_contacts = ?7, updated_at = ?8
            WHERE id = ?9
            "#,
        )
        .bind(&merged.name)
        .bind(&merged.prompt)
        .bind(merged.is_active)
        .bind(merged.include_products)
        .bind(merged.include_news)
        .bind(merged.include_categories)
        .bind(merged.include_contacts)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Self::find_by_id(pool, id).await
    }

    /// Make `id` the only active configuration. `Ok(None)` when it does not exist.
    pub async fn activate(pool: &DbPool, id: i64) -> Result<Option<ChatPromptConfig>, sqlx::Error> {
        Self::update(pool, id, ChatPromptForUpdate::new().is_active(true)).await
    }

    /// Delete a configuration. Returns whether a row was removed.
    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = query("DELETE FROM chat_prompts WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn deactivate_all(tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
        query("UPDATE chat_prompts SET is_active = 0 WHERE is_active = 1")
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
