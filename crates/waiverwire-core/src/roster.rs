// A fantasy team's roster as reported by the league host.

use serde::{Deserialize, Serialize};

use crate::player::{PlayerId, PlayerMap};

/// One team's roster within a league.
///
/// `players` is the full set of rostered IDs in upstream order and always
/// contains every starter. The pipeline never mutates a roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub roster_id: u32,
    pub owner_id: Option<String>,
    pub starters: Vec<PlayerId>,
    pub players: Vec<PlayerId>,
    #[serde(default)]
    pub taxi: Vec<PlayerId>,
    #[serde(default)]
    pub reserve: Vec<PlayerId>,
}

impl Roster {
    /// Whether the player is on this roster (starters and bench alike).
    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|id| id == player_id)
    }

    pub fn is_starter(&self, player_id: &str) -> bool {
        self.starters.iter().any(|id| id == player_id)
    }

    /// Rostered players that are not starting, in roster order.
    pub fn bench(&self) -> Vec<&PlayerId> {
        self.players
            .iter()
            .filter(|id| !self.is_starter(id))
            .collect()
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id.as_deref() == Some(owner_id)
    }
}

/// Render a list of IDs with the directory's display labels. Unknown IDs are
/// shown as-is.
pub fn label_players(ids: &[PlayerId], directory: &PlayerMap) -> Vec<String> {
    ids.iter()
        .map(|id| match directory.get(id) {
            Some(player) => player.roster_label(),
            None => id.clone(),
        })
        .collect()
}
