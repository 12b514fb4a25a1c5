//! Featured-item rotation for the home page hero banner.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::trace;

/// Rotation period of the hero banner
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(6);

/// Entry of the hero banner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedAnime {
    pub id: u32,
    pub title: String,
    pub image: String,
    pub description: String,
    pub rating: f32,
    pub year: u16,
    pub status: String,
}

/// The fixed lineup shown on the home page
pub fn featured_lineup() -> Vec<FeaturedAnime> {
    [
        (
            "Attack on Titan Final Season",
            "https://i0.wp.com/samehadaku.email/wp-content/uploads/2023/03/Attack-on-Titan-Final-Season-Part-3.jpg",
            "Pertempuran terakhir melawan para titan dimulai...",
            9.8,
        ),
        (
            "Demon Slayer: Kimetsu no Yaiba",
            "https://i0.wp.com/samehadaku.email/wp-content/uploads/2023/04/Kimetsu-no-Yaiba-Katanakaji-no-Sato-hen.jpg",
            "Tanjiro melanjutkan perjalanannya untuk menyelamatkan adiknya...",
            9.5,
        ),
        (
            "Jujutsu Kaisen Season 2",
            "https://i0.wp.com/samehadaku.email/wp-content/uploads/2023/07/Jujutsu-Kaisen-2nd-Season.jpg",
            "Petualangan baru Yuji dan teman-temannya dimulai...",
            9.3,
        ),
    ]
    .into_iter()
    .zip(1..)
    .map(|((title, image, description, rating), id)| FeaturedAnime {
        id,
        title: title.to_string(),
        image: image.to_string(),
        description: description.to_string(),
        rating,
        year: 2023,
        status: "Ongoing".to_string(),
    })
    .collect()
}

/// Cursor over a fixed, non-empty list of items
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
}

impl<T> Carousel<T> {
    /// Returns `None` for an empty list
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items, index: 0 })
        }
    }

    /// Advance to the next item, wrapping around; returns the new index
    pub fn tick(&mut self) -> usize {
        self.index = (self.index + 1) % self.items.len();
        self.index
    }

    /// Jump straight to `index`. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &T {
        &self.items[self.index]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Carousel advanced by a background timer
///
/// The timer task is aborted when the value is dropped.
pub struct AutoCarousel<T> {
    state: Arc<Mutex<Carousel<T>>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> AutoCarousel<T> {
    /// Start ticking every `period`; the first tick happens after one period
    pub fn start(carousel: Carousel<T>, period: Duration) -> Self {
        let state = Arc::new(Mutex::new(carousel));
        let ticker = Arc::clone(&state);

        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let index = lock(&ticker).tick();
                trace!(index, "Carousel advanced");
            }
        });

        Self { state, task }
    }
}

impl<T> AutoCarousel<T> {
    pub fn select(&self, index: usize) -> bool {
        lock(&self.state).select(index)
    }

    pub fn index(&self) -> usize {
        lock(&self.state).index()
    }

    /// Run `f` against the item currently shown
    pub fn with_current<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(lock(&self.state).current())
    }
}

impl<T> Drop for AutoCarousel<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A panicking ticker leaves the index intact, so poisoning is ignored
fn lock<T>(state: &Mutex<Carousel<T>>) -> MutexGuard<'_, Carousel<T>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
