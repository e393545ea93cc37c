//! # Slider Handlers
//!
//! Public carousel data plus the admin slider CRUD.
//!
//! `GET /api/sliders/events` is a server-sent event stream: one `sliders`
//! event with the current list right away, then one per admin change. The
//! stream ends when the client disconnects, which drops the subscription.

use crate::services::{SliderFeed, SliderService, SliderSubscription};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream};
use lib_core::dto::{SliderForCreate, SliderForUpdate};
use lib_core::model::store::models::Slider;
use lib_core::{AppError, DbPool};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub const SLIDERS_EVENT: &str = "sliders";

fn service(db: DbPool, feed: Arc<SliderFeed>) -> SliderService {
    SliderService::new(db, feed)
}

/// Active sliders in display order; the default set when none are stored.
pub async fn list_sliders(
    State(db): State<DbPool>,
    State(feed): State<Arc<SliderFeed>>,
) -> Json<Vec<Slider>> {
    Json(service(db, feed).active_or_default().await)
}

pub async fn slider_events(
    State(db): State<DbPool>,
    State(feed): State<Arc<SliderFeed>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let service = service(db, feed);
    // Subscribe before reading so no change slips in between
    let subscription = service.subscribe();
    let initial = service.active_or_default().await;
    debug!(sliders = initial.len(), "[SLIDERS] Event stream opened");

    let stream = stream::unfold(
        (Some(initial), subscription),
        |(pending, mut subscription): (Option<Vec<Slider>>, SliderSubscription)| async move {
            let sliders = match pending {
                Some(initial) => initial,
                None => subscription.recv().await?.as_ref().clone(),
            };
            let event = Event::default().event(SLIDERS_EVENT).json_data(&sliders);
            Some((event, (None, subscription)))
        },
    );

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Every slider, inactive ones included.
pub async fn list_all_sliders(
    State(db): State<DbPool>,
    State(feed): State<Arc<SliderFeed>>,
) -> Result<Json<Vec<Slider>>, AppError> {
    Ok(Json(service(db, feed).list_all().await?))
}

#[instrument(skip_all)]
pub async fn create_slider(
    State(db): State<DbPool>,
    State(feed): State<Arc<SliderFeed>>,
    Json(data): Json<SliderForCreate>,
) -> Result<(StatusCode, Json<Slider>), AppError> {
    let slider = service(db, feed).create(data).await?;
    Ok((StatusCode::CREATED, Json(slider)))
}

#[instrument(skip(db, feed, data))]
pub async fn update_slider(
    State(db): State<DbPool>,
    State(feed): State<Arc<SliderFeed>>,
    Path(id): Path<i64>,
    Json(data): Json<SliderForUpdate>,
) -> Result<Json<Slider>, AppError> {
    Ok(Json(service(db, feed).update(id, data).await?))
}

#[instrument(skip(db, feed))]
pub async fn delete_slider(
    State(db): State<DbPool>,
    State(feed): State<Arc<SliderFeed>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    service(db, feed).delete(id).await.map_err(|e| {
        warn!("[SLIDERS] Delete failed: {}", e);
        e
    })?;
    Ok(StatusCode::NO_CONTENT)
}
