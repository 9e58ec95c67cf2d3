// Recommendation pipeline: waiver pickups, drop candidates, sit/start alerts.
//
// Pure over its inputs. The roster's position depth is computed once when the
// pipeline is built and is not updated as pickups are hypothetically made.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;
use waiverwire_core::config::ScoringConfig;
use waiverwire_core::player::{InjuryStatus, Player, PlayerId, PlayerMap, Position, TrendingSignal};
use waiverwire_core::roster::Roster;
use waiverwire_core::sentiment::{SentimentResult, SentimentVerdict};

use crate::positions::{analyze_positions, PositionAnalysis};
use crate::scoring::{drop_reason, pickup_priority};

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Option<Position>,
    pub team: Option<String>,
    pub trending_count: u64,
    pub position_need: bool,
    pub sentiment: Option<SentimentVerdict>,
    pub discussion_count: usize,
    pub priority_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropCandidate {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Option<Position>,
    pub team: Option<String>,
    pub injury_status: InjuryStatus,
    pub reason: String,
    pub trending_drop_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Sit,
}

impl AlertKind {
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::Sit => "SIT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub player_id: PlayerId,
    pub name: String,
    pub team: Option<String>,
    pub status: InjuryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitStartAlert {
    pub kind: AlertKind,
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: Position,
    pub reason: String,
    pub alternatives: Vec<Alternative>,
}

/// A trending add that survived eligibility filtering, before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct WaiverCandidate {
    pub player: Player,
    pub trending_count: u64,
    pub position_need: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub waiver_recommendations: Vec<Recommendation>,
    pub drop_candidates: Vec<DropCandidate>,
    pub sit_start_alerts: Vec<SitStartAlert>,
}

// ---------------------------------------------------------------------------
// Sentiment lookup
// ---------------------------------------------------------------------------

/// Source of precomputed sentiment, keyed by player ID.
pub trait SentimentLookup {
    fn sentiment_for(&self, player_id: &str) -> Option<&SentimentResult>;
}

impl SentimentLookup for HashMap<PlayerId, SentimentResult> {
    fn sentiment_for(&self, player_id: &str) -> Option<&SentimentResult> {
        self.get(player_id)
    }
}

/// Lookup that never has sentiment.
pub struct NoSentiment;

impl SentimentLookup for NoSentiment {
    fn sentiment_for(&self, _player_id: &str) -> Option<&SentimentResult> {
        None
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

pub struct ScoringPipeline<'a> {
    roster: &'a Roster,
    directory: &'a PlayerMap,
    config: &'a ScoringConfig,
    positions: PositionAnalysis,
}

impl<'a> ScoringPipeline<'a> {
    pub fn new(roster: &'a Roster, directory: &'a PlayerMap, config: &'a ScoringConfig) -> Self {
        let positions = analyze_positions(&roster.players, directory, &config.targets);
        Self {
            roster,
            directory,
            config,
            positions,
        }
    }

    pub fn positions(&self) -> &PositionAnalysis {
        &self.positions
    }

    /// Trending adds that are not on the roster and whose directory entry is
    /// present, active and not Out/IR. Input order is preserved.
    pub fn waiver_candidates(&self, trending_adds: &[TrendingSignal]) -> Vec<WaiverCandidate> {
        trending_adds
            .iter()
            .filter(|signal| !self.roster.contains(&signal.player_id))
            .filter_map(|signal| {
                let player = self.directory.get(&signal.player_id)?;
                if !player.active || player.injury_status.is_sidelined() {
                    return None;
                }
                Some(WaiverCandidate {
                    player: player.clone(),
                    trending_count: signal.count,
                    position_need: self.positions.needs(player.position),
                })
            })
            .collect()
    }

    /// Score every eligible trending add, highest priority first, ties in
    /// input order, truncated to `top_n`.
    pub fn recommend_waivers(
        &self,
        trending_adds: &[TrendingSignal],
        sentiment: &dyn SentimentLookup,
        top_n: usize,
    ) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = self
            .waiver_candidates(trending_adds)
            .into_iter()
            .map(|candidate| {
                let found = sentiment.sentiment_for(&candidate.player.player_id);
                Recommendation {
                    priority_score: pickup_priority(
                        candidate.trending_count,
                        candidate.position_need,
                        found.map(|s| s.score()),
                        &self.config.weights,
                    ),
                    player_id: candidate.player.player_id.clone(),
                    name: candidate.player.full_name(),
                    position: candidate.player.position,
                    team: candidate.player.team.clone(),
                    trending_count: candidate.trending_count,
                    position_need: candidate.position_need,
                    sentiment: found.map(|s| s.verdict.clone()),
                    discussion_count: found.map_or(0, |s| s.posts_found),
                }
            })
            .collect();

        // `sort_by` is stable, so equal scores keep trending order.
        recommendations.sort_by(|a, b| {
            b.priority_score
                .partial_cmp(&a.priority_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        recommendations.truncate(top_n);
        recommendations
    }

    /// Rostered players flagged by trending drops, then rostered players who
    /// are Out or on IR. Each player appears once, with the first reason.
    pub fn drop_candidates(&self, trending_drops: &[TrendingSignal]) -> Vec<DropCandidate> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut candidates = Vec::new();

        for signal in trending_drops {
            if !self.roster.contains(&signal.player_id) {
                continue;
            }
            let Some(player) = self.directory.get(&signal.player_id) else {
                continue;
            };
            if !seen.insert(signal.player_id.as_str()) {
                continue;
            }
            candidates.push(drop_candidate(
                player,
                drop_reason(signal.count, self.config.heavy_drop_threshold),
                signal.count,
            ));
        }

        for id in &self.roster.players {
            let Some(player) = self.directory.get(id) else {
                continue;
            };
            if !player.injury_status.is_sidelined() || !seen.insert(id.as_str()) {
                continue;
            }
            candidates.push(drop_candidate(
                player,
                format!("Injured: {}", player.injury_status),
                0,
            ));
        }

        candidates
    }

    /// One "sit" alert per non-active starter that has at least one active
    /// bench player at the same position.
    pub fn sit_start_alerts(&self) -> Vec<SitStartAlert> {
        let bench = self.roster.bench();
        let mut alerts = Vec::new();

        for starter_id in &self.roster.starters {
            let Some(starter) = self.directory.get(starter_id) else {
                continue;
            };
            let Some(position) = starter.position else {
                continue;
            };
            if starter.injury_status.is_active() {
                continue;
            }

            let alternatives: Vec<Alternative> = bench
                .iter()
                .filter_map(|id| self.directory.get(*id))
                .filter(|p| p.position == Some(position) && p.injury_status.is_active())
                .map(|p| Alternative {
                    player_id: p.player_id.clone(),
                    name: p.full_name(),
                    team: p.team.clone(),
                    status: p.injury_status.clone(),
                })
                .collect();

            if alternatives.is_empty() {
                debug!(player = %starter.full_name(), "injured starter has no healthy backup");
                continue;
            }

            alerts.push(SitStartAlert {
                kind: AlertKind::Sit,
                player_id: starter.player_id.clone(),
                player_name: starter.full_name(),
                position,
                reason: format!("Injury: {}", starter.injury_status),
                alternatives,
            });
        }

        alerts
    }

    pub fn run(
        &self,
        trending_adds: &[TrendingSignal],
        trending_drops: &[TrendingSignal],
        sentiment: &dyn SentimentLookup,
        top_n: usize,
    ) -> PipelineOutput {
        PipelineOutput {
            waiver_recommendations: self.recommend_waivers(trending_adds, sentiment, top_n),
            drop_candidates: self.drop_candidates(trending_drops),
            sit_start_alerts: self.sit_start_alerts(),
        }
    }
}

fn drop_candidate(player: &Player, reason: String, trending_drop_count: u64) -> DropCandidate {
    DropCandidate {
        player_id: player.player_id.clone(),
        name: player.full_name(),
        position: player.position,
        team: player.team.clone(),
        injury_status: player.injury_status.clone(),
        reason,
        trending_drop_count,
    }
}
