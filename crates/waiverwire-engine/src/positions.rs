// Roster depth by position.
//
// Groups a roster's players into the six fantasy positions and flags the
// positions that sit below their target depth. Players the directory does not
// know, or whose position falls outside the six, are left out entirely.

use serde::Serialize;
use waiverwire_core::config::PositionTargets;
use waiverwire_core::player::{InjuryStatus, PlayerId, PlayerMap, Position};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A rostered player as listed under its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosteredPlayer {
    pub id: PlayerId,
    pub name: String,
    pub team: Option<String>,
    pub status: InjuryStatus,
}

/// Depth at a single position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionNeed {
    pub position: Position,
    pub count: usize,
    pub target: usize,
    pub players: Vec<RosteredPlayer>,
    /// True iff `count < target`.
    pub need: bool,
}

/// Depth at every position, in `Position::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PositionAnalysis {
    entries: Vec<PositionNeed>,
}

impl PositionAnalysis {
    pub fn entries(&self) -> &[PositionNeed] {
        &self.entries
    }

    pub fn get(&self, position: Position) -> Option<&PositionNeed> {
        self.entries.iter().find(|e| e.position == position)
    }

    /// Whether `position` is below target. Unmapped positions are never a need.
    pub fn needs(&self, position: Option<Position>) -> bool {
        position
            .and_then(|p| self.get(p))
            .is_some_and(|e| e.need)
    }

    pub fn needed_positions(&self) -> Vec<Position> {
        self.entries
            .iter()
            .filter(|e| e.need)
            .map(|e| e.position)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Bucket `player_ids` by position and compare each bucket to its target.
pub fn analyze_positions(
    player_ids: &[PlayerId],
    directory: &PlayerMap,
    targets: &PositionTargets,
) -> PositionAnalysis {
    let entries = Position::ALL
        .iter()
        .map(|&position| {
            let players: Vec<RosteredPlayer> = player_ids
                .iter()
                .filter_map(|id| directory.get(id))
                .filter(|p| p.position == Some(position))
                .map(|p| RosteredPlayer {
                    id: p.player_id.clone(),
                    name: p.full_name(),
                    team: p.team.clone(),
                    status: p.injury_status.clone(),
                })
                .collect();
            let target = targets.target(position);
            PositionNeed {
                position,
                count: players.len(),
                target,
                need: players.len() < target,
                players,
            }
        })
        .collect();

    PositionAnalysis { entries }
}
