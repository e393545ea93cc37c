//! # Slider Rotation
//!
//! State machine behind the home page carousel, plus a tokio driver that
//! advances it on a fixed interval.
//!
//! ## Behaviour
//!
//! - Auto-play advances `index -> (index + 1) mod count` every interval.
//! - Manual navigation (`next`, `prev`, `go_to`) sets the index, suspends
//!   auto-play and schedules it to resume after the cool-down.
//! - The first tick at or after the resume instant re-enables auto-play and
//!   advances on that same tick.
//!
//! ```rust
//! use lib_core::carousel::{RotationTiming, SliderRotation};
//! use tokio::time::Instant;
//!
//! let mut rotation = SliderRotation::new(3, RotationTiming::default());
//! let now = Instant::now();
//! assert_eq!(rotation.tick(now), 1);
//! assert_eq!(rotation.prev(now), 0);
//! assert!(!rotation.is_auto_playing());
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationTiming {
    /// Time between automatic advances.
    pub interval: Duration,
    /// Pause after manual navigation before auto-play resumes.
    pub cooldown: Duration,
}

impl Default for RotationTiming {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SliderRotation {
    index: usize,
    count: usize,
    auto_play: bool,
    resume_at: Option<Instant>,
    timing: RotationTiming,
}

impl SliderRotation {
    pub fn new(count: usize, timing: RotationTiming) -> Self {
        Self {
            index: 0,
            count,
            auto_play: true,
            resume_at: None,
            timing,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn timing(&self) -> RotationTiming {
        self.timing
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play
    }

    /// Instant at which a suspended auto-play resumes.
    pub fn resume_at(&self) -> Option<Instant> {
        self.resume_at
    }

    /// Interval tick. Advances when auto-play is on or its cool-down is over.
    pub fn tick(&mut self, now: Instant) -> usize {
        if !self.auto_play && self.resume_at.is_some_and(|at| now >= at) {
            self.auto_play = true;
            self.resume_at = None;
        }

        if self.auto_play && self.count > 0 {
            self.index = (self.index + 1) % self.count;
        }
        self.index
    }

    pub fn next(&mut self, now: Instant) -> usize {
        if self.count > 0 {
            self.index = (self.index + 1) % self.count;
            self.suspend(now);
        }
        self.index
    }

    pub fn prev(&mut self, now: Instant) -> usize {
        if self.count > 0 {
            self.index = if self.index == 0 { self.count - 1 } else { self.index - 1 };
            self.suspend(now);
        }
        self.index
    }

    /// Jump to `index`. Out-of-range targets are ignored.
    pub fn go_to(&mut self, index: usize, now: Instant) -> usize {
        if index < self.count {
            self.index = index;
            self.suspend(now);
        }
        self.index
    }

    /// Adopt a new slide count (e.g. after a slider feed update).
    pub fn set_slide_count(&mut self, count: usize) -> usize {
        self.count = count;
        if self.index >= count {
            self.index = 0;
        }
        self.index
    }

    fn suspend(&mut self, now: Instant) {
        self.auto_play = false;
        self.resume_at = Some(now + self.timing.cooldown);
    }
}

/// Runs a [`SliderRotation`] on a background task.
///
/// The current index is published on a `watch` channel whenever it changes.
/// Dropping the driver aborts the task.
pub struct CarouselDriver {
    rotation: Arc<Mutex<SliderRotation>>,
    index_tx: Arc<watch::Sender<usize>>,
    task: JoinHandle<()>,
}

impl CarouselDriver {
    /// Must be called from within a tokio runtime.
    pub fn spawn(count: usize, timing: RotationTiming) -> Self {
        let rotation = Arc::new(Mutex::new(SliderRotation::new(count, timing)));
        let (tx, _rx) = watch::channel(0usize);
        let index_tx = Arc::new(tx);

        let task_rotation = rotation.clone();
        let task_tx = index_tx.clone();
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + timing.interval, timing.interval);
            loop {
                ticker.tick().await;
                let index = task_rotation.lock().await.tick(Instant::now());
                publish(&task_tx, index);
            }
        });

        Self { rotation, index_tx, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index_tx.subscribe()
    }

    pub fn current(&self) -> usize {
        *self.index_tx.borrow()
    }

    pub async fn next(&self) -> usize {
        let index = self.rotation.lock().await.next(Instant::now());
        publish(&self.index_tx, index);
        index
    }

    pub async fn prev(&self) -> usize {
        let index = self.rotation.lock().await.prev(Instant::now());
        publish(&self.index_tx, index);
        index
    }

    pub async fn go_to(&self, target: usize) -> usize {
        let index = self.rotation.lock().await.go_to(target, Instant::now());
        publish(&self.index_tx, index);
        index
    }

    pub async fn set_slide_count(&self, count: usize) -> usize {
        let index = self.rotation.lock().await.set_slide_count(count);
        publish(&self.index_tx, index);
        index
    }
}

impl Drop for CarouselDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn publish(tx: &watch::Sender<usize>, index: usize) {
    tx.send_if_modified(|current| {
        if *current == index {
            return false;
        }
        *current = index;
        true
    });
}
