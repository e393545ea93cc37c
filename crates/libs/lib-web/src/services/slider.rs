//! # Slider Service
//!
//! Public carousel reads with a built-in fallback set, and admin writes that
//! publish the refreshed list to [`SliderFeed`] subscribers.

use super::slider_feed::{SliderFeed, SliderSubscription};
use chrono::{TimeZone, Utc};
use lib_core::model::store::models::{Slider, SliderForCreate, SliderForUpdate};
use lib_core::model::store::SliderRepository;
use lib_core::{AppError, DbPool};
use lib_utils::{validate_non_negative, validate_not_empty};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Slides shown when the store has none or cannot be read.
///
/// Ids are negative so they never collide with stored rows.
pub fn default_sliders() -> Vec<Slider> {
    let created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default();
    let slide = |id: i64, title: &str, description: &str, image_url: &str, link: &str, order: i64| Slider {
        id,
        title: title.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        link: Some(link.to_string()),
        button_text: Some("Xem chi tiết".to_string()),
        order,
        is_active: true,
        created_at,
    };

    vec![
        slide(
            -1,
            "Thép ống & thép hộp mạ kẽm",
            "Đa dạng quy cách, đạt tiêu chuẩn ASTM và JIS",
            "/images/sliders/thep-ong.jpg",
            "/san-pham",
            1,
        ),
        slide(
            -2,
            "Tôn mạ màu chất lượng cao",
            "Bền màu, chống ăn mòn cho mọi công trình",
            "/images/sliders/ton-ma-mau.jpg",
            "/san-pham",
            2,
        ),
        slide(
            -3,
            "Giao hàng toàn quốc",
            "Hệ thống chi nhánh và kho bãi trên khắp cả nước",
            "/images/sliders/giao-hang.jpg",
            "/lien-he",
            3,
        ),
    ]
}

pub struct SliderService {
    db: DbPool,
    feed: Arc<SliderFeed>,
}

impl SliderService {
    pub fn new(db: DbPool, feed: Arc<SliderFeed>) -> Self {
        Self { db, feed }
    }

    /// Active sliders in display order, or [`default_sliders`] when the
    /// store is empty or unreachable.
    #[instrument(skip(self))]
    pub async fn active_or_default(&self) -> Vec<Slider> {
        match SliderRepository::list_active(&self.db).await {
            Ok(sliders) if !sliders.is_empty() => sliders,
            Ok(_) => default_sliders(),
            Err(e) => {
                warn!(error = %e, "[SLIDERS] Store read failed, serving defaults");
                default_sliders()
            }
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Slider>, AppError> {
        Ok(SliderRepository::list_all(&self.db).await?)
    }

    pub fn subscribe(&self) -> SliderSubscription {
        self.feed.subscribe()
    }

    #[instrument(skip(self, data), fields(title = %data.title))]
    pub async fn create(&self, data: SliderForCreate) -> Result<Slider, AppError> {
        validate_not_empty(&data.title, "Tiêu đề").map_err(AppError::InvalidInput)?;
        validate_not_empty(&data.image_url, "Ảnh").map_err(AppError::InvalidInput)?;
        validate_non_negative(data.order, "Thứ tự").map_err(AppError::InvalidInput)?;

        let slider = SliderRepository::create(&self.db, data).await?;
        info!(id = slider.id, "[SLIDERS] Created");
        self.publish_current().await;
        Ok(slider)
    }

    #[instrument(skip(self, data))]
    pub async fn update(&self, id: i64, data: SliderForUpdate) -> Result<Slider, AppError> {
        if let Some(title) = &data.title {
            validate_not_empty(title, "Tiêu đề").map_err(AppError::InvalidInput)?;
        }
        if let Some(image_url) = &data.image_url {
            validate_not_empty(image_url, "Ảnh").map_err(AppError::InvalidInput)?;
        }
        if let Some(order) = data.order {
            validate_non_negative(order, "Thứ tự").map_err(AppError::InvalidInput)?;
        }

        let slider = SliderRepository::update(&self.db, id, data)
            .await?
            .ok_or_else(|| slider_not_found(id))?;
        info!(id, "[SLIDERS] Updated");
        self.publish_current().await;
        Ok(slider)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !SliderRepository::delete(&self.db, id).await? {
            return Err(slider_not_found(id));
        }
        info!(id, "[SLIDERS] Deleted");
        self.publish_current().await;
        Ok(())
    }

    async fn publish_current(&self) {
        let sliders = self.active_or_default().await;
        self.feed.publish(sliders);
    }
}

fn slider_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Không tìm thấy slider {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_core::create_memory_pool;

    async fn service() -> SliderService {
        let pool = create_memory_pool().await.unwrap();
        SliderService::new(pool, Arc::new(SliderFeed::new()))
    }

    #[test]
    fn test_default_set_is_ordered_and_active() {
        let defaults = default_sliders();
        assert_eq!(defaults.len(), 3);
        assert!(defaults.iter().all(|s| s.is_active && s.id < 0));
        assert!(defaults.windows(2).all(|w| w[0].order < w[1].order));
    }

    #[tokio::test]
    async fn test_empty_store_falls_back_to_defaults() {
        let service = service().await;
        assert_eq!(service.active_or_default().await, default_sliders());
    }

    #[tokio::test]
    async fn test_unreachable_store_falls_back_to_defaults() {
        let service = service().await;
        service.db.close().await;
        assert_eq!(service.active_or_default().await, default_sliders());
    }

    #[tokio::test]
    async fn test_stored_sliders_replace_defaults() {
        let service = service().await;
        service
            .create(SliderForCreate::new("Khuyến mãi", "https://res.cloudinary.com/demo/km.jpg", 0))
            .await
            .unwrap();

        let active = service.active_or_default().await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Khuyến mãi");
    }

    #[tokio::test]
    async fn test_writes_publish_to_subscribers() {
        let service = service().await;
        let mut sub = service.subscribe();

        let slider = service
            .create(SliderForCreate::new("Mới", "https://img/new.jpg", 1))
            .await
            .unwrap();
        assert_eq!(sub.recv().await.unwrap()[0].id, slider.id);

        service.delete(slider.id).await.unwrap();
        assert_eq!(*sub.recv().await.unwrap(), default_sliders());
    }

    #[tokio::test]
    async fn test_validation() {
        let service = service().await;

        let blank = service.create(SliderForCreate::new(" ", "https://img/a.jpg", 0)).await;
        assert!(matches!(blank, Err(AppError::InvalidInput(_))));

        let negative = service.create(SliderForCreate::new("A", "https://img/a.jpg", -1)).await;
        assert!(matches!(negative, Err(AppError::InvalidInput(_))));

        let missing = service.update(99, SliderForUpdate::default()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
