// Player directory backed by the league feed with a one-value TTL cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info};
use waiverwire_core::cache::TimedCache;
use waiverwire_core::player::{Player, PlayerMap};

use crate::error::FetchError;
use crate::feed::LeagueFeed;

/// Caches the full player catalog and refetches it wholesale once stale.
///
/// The lock is held across the fetch, so concurrent callers share one
/// download instead of racing.
pub struct RemotePlayerDirectory {
    cache: Mutex<TimedCache<Arc<PlayerMap>>>,
}

impl RemotePlayerDirectory {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Mutex::new(TimedCache::new(ttl)),
        }
    }

    /// The directory, from cache when fresh, otherwise fetched from `feed`.
    pub async fn players<F: LeagueFeed + ?Sized>(&self, feed: &F) -> Result<Arc<PlayerMap>, FetchError> {
        let mut cache = self.cache.lock().await;
        match cache.get() {
            Some((players, true)) => {
                debug!(players = players.len(), "player directory cache hit");
                return Ok(Arc::clone(players));
            }
            Some((_, false)) => info!("player directory stale, refetching"),
            None => debug!("player directory not cached"),
        }

        let players = Arc::new(feed.all_players().await?);
        cache.store(Arc::clone(&players));
        Ok(players)
    }

    /// Look a player up in whatever is cached, fresh or not.
    pub async fn lookup(&self, player_id: &str) -> Option<Player> {
        let cache = self.cache.lock().await;
        cache
            .get()
            .and_then(|(players, _)| players.get(player_id).cloned())
    }

    pub async fn is_fresh(&self) -> bool {
        self.cache.lock().await.fresh().is_some()
    }

    pub async fn invalidate(&self) {
        self.cache.lock().await.invalidate();
    }
}
