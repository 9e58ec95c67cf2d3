// Age-bounded single-value cache.

use std::time::Duration;

use tokio::time::Instant;

/// Holds one value together with the instant it was stored.
///
/// Freshness is purely a function of wall-clock age against `ttl`; nothing
/// pushes invalidations. Uses `tokio::time::Instant` so tests can advance a
/// paused clock instead of sleeping.
#[derive(Debug)]
pub struct TimedCache<T> {
    ttl: Duration,
    entry: Option<(T, Instant)>,
}

impl<T> TimedCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value, if any, and whether it is still within its TTL.
    pub fn get(&self) -> Option<(&T, bool)> {
        self.entry
            .as_ref()
            .map(|(value, stored_at)| (value, stored_at.elapsed() < self.ttl))
    }

    /// The cached value only when it is still fresh.
    pub fn fresh(&self) -> Option<&T> {
        match self.get() {
            Some((value, true)) => Some(value),
            _ => None,
        }
    }

    pub fn store(&mut self, value: T) {
        self.entry = Some((value, Instant::now()));
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn empty_cache_returns_none() {
        let cache: TimedCache<u32> = TimedCache::new(Duration::from_secs(60));
        assert!(cache.get().is_none());
        assert!(cache.fresh().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn value_expires_after_ttl() {
        let mut cache = TimedCache::new(Duration::from_secs(3600));
        cache.store(7u32);
        assert_eq!(cache.get(), Some((&7, true)));

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert_eq!(cache.fresh(), Some(&7));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get(), Some((&7, false)));
        assert!(cache.fresh().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn store_resets_age() {
        let mut cache = TimedCache::new(Duration::from_secs(10));
        cache.store(1u32);
        tokio::time::advance(Duration::from_secs(20)).await;
        cache.store(2);
        assert_eq!(cache.get(), Some((&2, true)));
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_clears_entry() {
        let mut cache = TimedCache::new(Duration::from_secs(10));
        cache.store("x");
        cache.invalidate();
        assert!(cache.get().is_none());
    }
}
