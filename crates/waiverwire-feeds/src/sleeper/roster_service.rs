// Roster lookups composed from the raw league feed.

use std::collections::HashSet;

use tracing::debug;
use waiverwire_core::player::{Player, PlayerMap};
use waiverwire_core::roster::Roster;

use crate::error::FetchError;
use crate::feed::LeagueFeed;

/// Sleeper user IDs are long numeric strings; usernames never are.
pub fn looks_like_user_id(key: &str) -> bool {
    key.len() >= 10 && key.chars().all(|c| c.is_ascii_digit())
}

/// Turn a configured owner key (username or user ID) into a user ID.
pub async fn resolve_user_id<F: LeagueFeed + ?Sized>(feed: &F, key: &str) -> Result<String, FetchError> {
    if looks_like_user_id(key) {
        return Ok(key.to_string());
    }
    let user = feed.user(key).await?;
    debug!(username = key, user_id = %user.user_id, "resolved username");
    Ok(user.user_id)
}

/// Pick the roster owned by `owner_id` out of a league's rosters.
pub fn find_owner_roster(rosters: &[Roster], league_id: &str, owner_id: &str) -> Result<Roster, FetchError> {
    rosters
        .iter()
        .find(|r| r.is_owned_by(owner_id))
        .cloned()
        .ok_or_else(|| FetchError::RosterNotFound {
            owner_id: owner_id.to_string(),
            league_id: league_id.to_string(),
        })
}

pub async fn fetch_user_roster<F: LeagueFeed + ?Sized>(
    feed: &F,
    league_id: &str,
    owner_id: &str,
) -> Result<Roster, FetchError> {
    let rosters = feed.league_rosters(league_id).await?;
    find_owner_roster(&rosters, league_id, owner_id)
}

/// Active directory entries not rostered by any team in the league.
pub fn available_players<'a>(rosters: &[Roster], directory: &'a PlayerMap) -> Vec<&'a Player> {
    let rostered: HashSet<&str> = rosters
        .iter()
        .flat_map(|r| r.players.iter().chain(r.taxi.iter()).chain(r.reserve.iter()))
        .map(String::as_str)
        .collect();
    directory
        .iter()
        .filter(|(id, player)| player.active && !rostered.contains(id.as_str()))
        .map(|(_, player)| player)
        .collect()
}

pub async fn fetch_available_players<'a, F: LeagueFeed + ?Sized>(
    feed: &F,
    league_id: &str,
    directory: &'a PlayerMap,
) -> Result<Vec<&'a Player>, FetchError> {
    let rosters = feed.league_rosters(league_id).await?;
    Ok(available_players(&rosters, directory))
}
