// Minimum-interval request pacing for rate-limited upstreams.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Spaces calls at least `interval` apart.
///
/// The first call proceeds immediately; each later call sleeps until
/// `interval` has elapsed since the previous one was released. Calls are
/// serialized by `&mut self`, so a pacer can never release two requests at
/// once.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last_release: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_release: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long a call made now would wait.
    pub fn delay_remaining(&self) -> Duration {
        match self.last_release {
            Some(last) => (last + self.interval).saturating_duration_since(Instant::now()),
            None => Duration::ZERO,
        }
    }

    /// Wait for the next slot, then record the release time.
    pub async fn wait(&mut self) {
        let delay = self.delay_remaining();
        if !delay.is_zero() {
            debug!(delay_ms = delay.as_millis() as u64, "pacing upstream request");
            tokio::time::sleep(delay).await;
        }
        self.last_release = Some(Instant::now());
    }
}
