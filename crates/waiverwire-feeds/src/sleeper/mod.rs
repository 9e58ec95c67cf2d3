pub mod client;
pub mod roster_service;
pub mod types;

pub use client::SleeperClient;
pub use roster_service::{
    available_players, fetch_available_players, fetch_user_roster, find_owner_roster,
    looks_like_user_id, resolve_user_id,
};
pub use types::{League, LeagueUser, LeagueUserMetadata, Matchup, SleeperUser, Transaction};
