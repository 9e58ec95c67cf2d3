// Sleeper wire shapes and their conversion into domain types.
//
// Sleeper omits fields freely (free agents have no team, empty rosters have
// null player lists), so nearly everything here is optional on the wire.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use waiverwire_core::player::{InjuryStatus, Player, PlayerId, PlayerMap, Position};
use waiverwire_core::roster::Roster;

/// Placeholder Sleeper puts in `starters` for an unfilled lineup slot.
const EMPTY_SLOT: &str = "0";

// ---------------------------------------------------------------------------
// Users and leagues
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleeperUser {
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub league_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_rosters: Option<u32>,
    #[serde(default)]
    pub roster_positions: Vec<String>,
    #[serde(default)]
    pub scoring_settings: HashMap<String, f64>,
}

impl League {
    /// Points per reception: 0 standard, 0.5 half-PPR, 1 PPR.
    pub fn reception_points(&self) -> f64 {
        self.scoring_settings.get("rec").copied().unwrap_or(0.0)
    }

    pub fn scoring_label(&self) -> &'static str {
        let rec = self.reception_points();
        if rec >= 1.0 {
            "PPR"
        } else if rec > 0.0 {
            "Half PPR"
        } else {
            "Standard"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueUser {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub metadata: Option<LeagueUserMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueUserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

impl LeagueUser {
    /// Team name if set, else the display name, else the raw user ID.
    pub fn team_label(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.team_name.as_deref())
            .filter(|s| !s.is_empty())
            .or(self.display_name.as_deref())
            .unwrap_or(&self.user_id)
    }
}

// ---------------------------------------------------------------------------
// Weekly data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub roster_id: u32,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub starters: Option<Vec<PlayerId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub roster_ids: Vec<u32>,
    #[serde(default)]
    pub adds: Option<HashMap<PlayerId, u32>>,
    #[serde(default)]
    pub drops: Option<HashMap<PlayerId, u32>>,
    #[serde(default)]
    pub created: Option<i64>,
}

impl Transaction {
    pub fn is_complete(&self) -> bool {
        self.status == "complete"
    }

    pub fn added_ids(&self) -> Vec<&PlayerId> {
        self.adds.iter().flat_map(|m| m.keys()).collect()
    }

    pub fn dropped_ids(&self) -> Vec<&PlayerId> {
        self.drops.iter().flat_map(|m| m.keys()).collect()
    }
}

// ---------------------------------------------------------------------------
// Players and rosters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawPlayer {
    #[serde(default)]
    player_id: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    injury_status: Option<String>,
    #[serde(default)]
    active: Option<bool>,
}

impl RawPlayer {
    /// Convert to a domain `Player`, falling back to the directory key when
    /// the record carries no `player_id` of its own.
    pub(crate) fn into_player(self, key: &str) -> Player {
        Player {
            player_id: self.player_id.unwrap_or_else(|| key.to_string()),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            position: self.position.as_deref().and_then(Position::from_str_pos),
            team: self.team.filter(|t| !t.is_empty()),
            injury_status: InjuryStatus::from_label(self.injury_status.as_deref()),
            active: self.active.unwrap_or(false),
        }
    }
}

pub(crate) fn into_player_map(raw: HashMap<String, RawPlayer>) -> PlayerMap {
    raw.into_iter()
        .map(|(key, player)| {
            let player = player.into_player(&key);
            (key, player)
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRoster {
    roster_id: u32,
    #[serde(default)]
    owner_id: Option<String>,
    #[serde(default)]
    starters: Option<Vec<String>>,
    #[serde(default)]
    players: Option<Vec<String>>,
    #[serde(default)]
    taxi: Option<Vec<String>>,
    #[serde(default)]
    reserve: Option<Vec<String>>,
}

fn filled(ids: Option<Vec<String>>) -> Vec<PlayerId> {
    ids.unwrap_or_default()
        .into_iter()
        .filter(|id| id != EMPTY_SLOT)
        .collect()
}

impl From<RawRoster> for Roster {
    fn from(raw: RawRoster) -> Self {
        let starters = filled(raw.starters);
        let mut players = filled(raw.players);
        for id in &starters {
            if !players.contains(id) {
                players.push(id.clone());
            }
        }
        Roster {
            roster_id: raw.roster_id,
            owner_id: raw.owner_id,
            starters,
            players,
            taxi: filled(raw.taxi),
            reserve: filled(raw.reserve),
        }
    }
}
