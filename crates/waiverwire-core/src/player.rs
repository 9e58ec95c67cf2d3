// Player identity, fantasy positions and injury designations.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Upstream player identifier. Team defenses use the team abbreviation.
pub type PlayerId = String;

/// The full player catalog keyed by player ID.
pub type PlayerMap = HashMap<PlayerId, Player>;

/// Fantasy positions tracked for roster analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
}

impl Position {
    /// Every tracked position, in display order.
    pub const ALL: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DEF,
    ];

    /// Parse an upstream position string.
    ///
    /// Returns `None` for positions outside the six tracked buckets (IDP
    /// positions, offensive linemen, etc).
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" => Some(Position::K),
            "DEF" | "DST" => Some(Position::DEF),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Injury status
// ---------------------------------------------------------------------------

/// Injury designation attached to a player.
///
/// Unrecognised upstream labels (PUP, Sus, NA, ...) are preserved verbatim in
/// `Other` so they still count as "not active".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InjuryStatus {
    #[default]
    Active,
    Questionable,
    Doubtful,
    Out,
    IR,
    Other(String),
}

impl InjuryStatus {
    /// Map an optional upstream label to a status. Missing or empty labels
    /// mean the player is active.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(raw) = label.map(str::trim).filter(|s| !s.is_empty()) else {
            return InjuryStatus::Active;
        };
        match raw.to_ascii_lowercase().as_str() {
            "active" => InjuryStatus::Active,
            "questionable" => InjuryStatus::Questionable,
            "doubtful" => InjuryStatus::Doubtful,
            "out" => InjuryStatus::Out,
            "ir" => InjuryStatus::IR,
            _ => InjuryStatus::Other(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            InjuryStatus::Active => "active",
            InjuryStatus::Questionable => "Questionable",
            InjuryStatus::Doubtful => "Doubtful",
            InjuryStatus::Out => "Out",
            InjuryStatus::IR => "IR",
            InjuryStatus::Other(label) => label,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, InjuryStatus::Active)
    }

    /// Out or on injured reserve: unavailable for the foreseeable future.
    pub fn is_sidelined(&self) -> bool {
        matches!(self, InjuryStatus::Out | InjuryStatus::IR)
    }
}

impl fmt::Display for InjuryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for InjuryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for InjuryStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(InjuryStatus::from_label(raw.as_deref()))
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player record from the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    /// `None` when the upstream position is not one of the tracked six.
    pub position: Option<Position>,
    pub team: Option<String>,
    #[serde(default)]
    pub injury_status: InjuryStatus,
    pub active: bool,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Team abbreviation, or `FA` for free agents.
    pub fn team_or_fa(&self) -> &str {
        self.team.as_deref().unwrap_or("FA")
    }

    pub fn position_str(&self) -> &'static str {
        self.position.map(|p| p.display_str()).unwrap_or("N/A")
    }

    /// `First Last (POS - TEAM)`, the roster display form.
    pub fn roster_label(&self) -> String {
        format!(
            "{} ({} - {})",
            self.full_name(),
            self.position_str(),
            self.team_or_fa()
        )
    }
}

// ---------------------------------------------------------------------------
// Trending signals
// ---------------------------------------------------------------------------

/// Which roster transaction a trending list counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendKind {
    Add,
    Drop,
}

impl TrendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendKind::Add => "add",
            TrendKind::Drop => "drop",
        }
    }
}

/// How many leagues added or dropped a player inside the lookback window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingSignal {
    pub player_id: PlayerId,
    pub count: u64,
}

impl TrendingSignal {
    pub fn new(player_id: impl Into<PlayerId>, count: u64) -> Self {
        Self {
            player_id: player_id.into(),
            count,
        }
    }
}
