//! # Slider Feed
//!
//! Publish/subscribe over the public slider list, on a tokio `broadcast`
//! channel. Each publish carries the full active list, so a subscriber that
//! lags simply skips to the next snapshot.

use lib_core::model::store::models::Slider;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

const FEED_CAPACITY: usize = 16;

pub type SliderList = Arc<Vec<Slider>>;

pub struct SliderFeed {
    tx: broadcast::Sender<SliderList>,
}

impl SliderFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> SliderSubscription {
        SliderSubscription {
            rx: Some(self.tx.subscribe()),
        }
    }

    /// Send `sliders` to every live subscription. Returns how many received it.
    pub fn publish(&self, sliders: Vec<Slider>) -> usize {
        let count = sliders.len();
        match self.tx.send(Arc::new(sliders)) {
            Ok(receivers) => {
                debug!(sliders = count, receivers, "[SLIDERS] Change published");
                receivers
            }
            // No subscribers right now
            Err(_) => 0,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SliderFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`SliderFeed::subscribe`].
///
/// After [`unsubscribe`](Self::unsubscribe) (or drop) nothing more is
/// delivered.
pub struct SliderSubscription {
    rx: Option<broadcast::Receiver<SliderList>>,
}

impl SliderSubscription {
    /// Wait for the next slider list. `None` once unsubscribed or the feed is gone.
    pub async fn recv(&mut self) -> Option<SliderList> {
        let rx = self.rx.as_mut()?;
        loop {
            match rx.recv().await {
                Ok(sliders) => return Some(sliders),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "[SLIDERS] Subscriber lagged, skipping to latest");
                }
                Err(RecvError::Closed) => {
                    self.rx = None;
                    return None;
                }
            }
        }
    }

    pub fn unsubscribe(&mut self) {
        self.rx = None;
    }

    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }
}
