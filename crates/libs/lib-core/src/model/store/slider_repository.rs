//! # Slider Repository
//!
//! Carousel slides. Public reads return active slides ordered by `order`
//! ascending (ties by creation time, then id); admin reads return all.

use super::models::{Slider, SliderForCreate, SliderForUpdate};
use super::DbPool;
use chrono::Utc;
use sqlx::{query, query_as};

pub struct SliderRepository;

impl SliderRepository {
    /// Active slides in display order.
    pub async fn list_active(pool: &DbPool) -> Result<Vec<Slider>, sqlx::Error> {
        query_as::<_, Slider>(
            "SELECT * FROM sliders WHERE is_active = 1 ORDER BY sort_order ASC, created_at ASC, id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Every slide, active or not, in display order.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<Slider>, sqlx::Error> {
        query_as::<_, Slider>("SELECT * FROM sliders ORDER BY sort_order ASC, created_at ASC, id ASC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Slider>, sqlx::Error> {
        query_as::<_, Slider>("SELECT * FROM sliders WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &DbPool, data: SliderForCreate) -> Result<Slider, sqlx::Error> {
        let id = query(
            r#"
            INSERT INTO sliders (title, description, image_url, link, button_text, sort_order, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.image_url)
        .bind(&data.link)
        .bind(&data.button_text)
        .bind(data.order)
        .bind(data.is_active)
        .bind(Utc::now())
        .execute(pool)
        .await?
        .last_insert_rowid();

        Self::find_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Apply a partial update. `Ok(None)` when `id` does not exist.
    pub async fn update(pool: &DbPool, id: i64, data: SliderForUpdate) -> Result<Option<Slider>, sqlx::Error> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let merged = data.merge_into(current);

        query(
            r#"
            UPDATE sliders
            SET title = ?1, description = ?2, image_url = ?3, link = ?4, button_text = ?5,
                sort_order = ?6, is_active = ?7
            WHERE id = ?8
            "#,
        )
        .bind(&merged.title)
        .bind(&merged.description)
        .bind(&merged.image_url)
        .bind(&merged.link)
        .bind(&merged.button_text)
        .bind(merged.order)
        .bind(merged.is_active)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(Some(merged))
    }

    /// Delete a slide. Returns whether a row was removed.
    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = query("DELETE FROM sliders WHERE id = ?").bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
