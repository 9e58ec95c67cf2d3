// Sleeper public REST client.
//
// Unauthenticated, read-only JSON endpoints. One request per call; no retry.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, info};
use waiverwire_core::config::HttpConfig;
use waiverwire_core::player::{PlayerMap, TrendKind, TrendingSignal};
use waiverwire_core::roster::Roster;

use crate::error::FetchError;
use crate::feed::LeagueFeed;
use crate::http::{build_client, get_json};
use crate::sleeper::types::{
    into_player_map, League, LeagueUser, Matchup, RawPlayer, RawRoster, SleeperUser, Transaction,
};

/// Sleeper API client.
pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
}

impl SleeperClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, FetchError> {
        let http = build_client(&config.user_agent, config.timeout())?;
        Ok(Self::new(http, config.sleeper_base_url.clone()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LeagueFeed for SleeperClient {
    async fn user(&self, username_or_id: &str) -> Result<SleeperUser, FetchError> {
        // Unknown users come back as 200 with a literal `null` body.
        let user: Option<SleeperUser> = get_json(
            &self.http,
            "user",
            &self.url(&format!("/user/{username_or_id}")),
            &[],
        )
        .await?;
        user.ok_or_else(|| FetchError::UserNotFound {
            user: username_or_id.to_string(),
        })
    }

    async fn user_leagues(&self, user_id: &str, season: &str) -> Result<Vec<League>, FetchError> {
        let leagues: Option<Vec<League>> = get_json(
            &self.http,
            "user leagues",
            &self.url(&format!("/user/{user_id}/leagues/nfl/{season}")),
            &[],
        )
        .await?;
        Ok(leagues.unwrap_or_default())
    }

    async fn league(&self, league_id: &str) -> Result<League, FetchError> {
        get_json(
            &self.http,
            "league",
            &self.url(&format!("/league/{league_id}")),
            &[],
        )
        .await
    }

    async fn league_rosters(&self, league_id: &str) -> Result<Vec<Roster>, FetchError> {
        let raw: Vec<RawRoster> = get_json(
            &self.http,
            "league rosters",
            &self.url(&format!("/league/{league_id}/rosters")),
            &[],
        )
        .await?;
        debug!(league_id, rosters = raw.len(), "fetched league rosters");
        Ok(raw.into_iter().map(Roster::from).collect())
    }

    async fn league_users(&self, league_id: &str) -> Result<Vec<LeagueUser>, FetchError> {
        get_json(
            &self.http,
            "league users",
            &self.url(&format!("/league/{league_id}/users")),
            &[],
        )
        .await
    }

    async fn matchups(&self, league_id: &str, week: u32) -> Result<Vec<Matchup>, FetchError> {
        get_json(
            &self.http,
            "matchups",
            &self.url(&format!("/league/{league_id}/matchups/{week}")),
            &[],
        )
        .await
    }

    async fn transactions(&self, league_id: &str, week: u32) -> Result<Vec<Transaction>, FetchError> {
        get_json(
            &self.http,
            "transactions",
            &self.url(&format!("/league/{league_id}/transactions/{week}")),
            &[],
        )
        .await
    }

    async fn trending(
        &self,
        kind: TrendKind,
        lookback_hours: u32,
        limit: u32,
    ) -> Result<Vec<TrendingSignal>, FetchError> {
        get_json(
            &self.http,
            "trending players",
            &self.url(&format!("/players/nfl/trending/{}", kind.as_str())),
            &[
                ("lookback_hours", lookback_hours.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn all_players(&self) -> Result<PlayerMap, FetchError> {
        let raw: HashMap<String, RawPlayer> =
            get_json(&self.http, "player directory", &self.url("/players/nfl"), &[]).await?;
        info!(players = raw.len(), "fetched player directory");
        Ok(into_player_map(raw))
    }
}
