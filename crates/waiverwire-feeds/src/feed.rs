// Seams between the analysis and its upstream data sources.
//
// The HTTP clients implement these; tests substitute in-memory fakes.

use async_trait::async_trait;
use waiverwire_core::player::{PlayerMap, TrendKind, TrendingSignal};
use waiverwire_core::roster::Roster;

use crate::error::FetchError;
use crate::reddit::{Comment, Post};
use crate::sleeper::{League, LeagueUser, Matchup, SleeperUser, Transaction};

/// Read-only league host data.
#[async_trait]
pub trait LeagueFeed: Send + Sync {
    async fn user(&self, username_or_id: &str) -> Result<SleeperUser, FetchError>;

    async fn user_leagues(&self, user_id: &str, season: &str) -> Result<Vec<League>, FetchError>;

    async fn league(&self, league_id: &str) -> Result<League, FetchError>;

    async fn league_rosters(&self, league_id: &str) -> Result<Vec<Roster>, FetchError>;

    async fn league_users(&self, league_id: &str) -> Result<Vec<LeagueUser>, FetchError>;

    async fn matchups(&self, league_id: &str, week: u32) -> Result<Vec<Matchup>, FetchError>;

    async fn transactions(&self, league_id: &str, week: u32) -> Result<Vec<Transaction>, FetchError>;

    async fn trending(
        &self,
        kind: TrendKind,
        lookback_hours: u32,
        limit: u32,
    ) -> Result<Vec<TrendingSignal>, FetchError>;

    /// The full player directory, keyed by player ID.
    async fn all_players(&self) -> Result<PlayerMap, FetchError>;
}

/// Forum posts and comments for sentiment.
#[async_trait]
pub trait DiscussionFeed: Send + Sync {
    async fn search_posts(&self, query: &str, limit: u32) -> Result<Vec<Post>, FetchError>;

    async fn post_comments(&self, post_id: &str, limit: u32) -> Result<Vec<Comment>, FetchError>;

    async fn hot_posts(&self, limit: u32) -> Result<Vec<Post>, FetchError>;
}
