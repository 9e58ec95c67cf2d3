// The analysis report handed to formatters, plus the builders that turn raw
// feed data into its display-ready sections.

use chrono::{DateTime, Utc};
use serde::Serialize;
use waiverwire_core::player::{PlayerId, PlayerMap, TrendingSignal};
use waiverwire_core::roster::{label_players, Roster};
use waiverwire_core::sentiment::extract_player_mentions;
use waiverwire_feeds::reddit::Post;
use waiverwire_feeds::sleeper::{League, LeagueUser, Matchup, Transaction};

use crate::pipeline::{DropCandidate, PipelineOutput, Recommendation, SitStartAlert};
use crate::positions::PositionAnalysis;

const HOT_POST_SUMMARY: usize = 10;
const TOP_POST_SUMMARY: usize = 5;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub week: u32,
    pub league: LeagueInfo,
    pub roster: RosterBreakdown,
    pub position_analysis: PositionAnalysis,
    pub waiver_recommendations: Vec<Recommendation>,
    pub drop_candidates: Vec<DropCandidate>,
    pub sit_start_alerts: Vec<SitStartAlert>,
    pub trending_adds: Vec<TrendingPlayer>,
    pub trending_drops: Vec<TrendingPlayer>,
    pub forum_trends: Option<ForumTrends>,
    pub transactions: Option<Vec<TransactionSummary>>,
    pub matchup: Option<MatchupSummary>,
}

impl AnalysisReport {
    pub fn new(
        generated_at: DateTime<Utc>,
        week: u32,
        league: LeagueInfo,
        roster: RosterBreakdown,
        position_analysis: PositionAnalysis,
        output: PipelineOutput,
    ) -> Self {
        Self {
            generated_at,
            week,
            league,
            roster,
            position_analysis,
            waiver_recommendations: output.waiver_recommendations,
            drop_candidates: output.drop_candidates,
            sit_start_alerts: output.sit_start_alerts,
            trending_adds: Vec::new(),
            trending_drops: Vec::new(),
            forum_trends: None,
            transactions: None,
            matchup: None,
        }
    }
}

// ---------------------------------------------------------------------------
// League
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueInfo {
    pub league_id: String,
    pub name: String,
    pub season: String,
    /// Points per reception.
    pub scoring: f64,
    pub scoring_label: String,
    pub roster_positions: Vec<String>,
    pub total_rosters: Option<u32>,
}

impl From<&League> for LeagueInfo {
    fn from(league: &League) -> Self {
        Self {
            league_id: league.league_id.clone(),
            name: league.name.clone(),
            season: league.season.clone(),
            scoring: league.reception_points(),
            scoring_label: league.scoring_label().to_string(),
            roster_positions: league.roster_positions.clone(),
            total_rosters: league.total_rosters,
        }
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterBreakdown {
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub roster_id: u32,
    pub starters: Vec<String>,
    pub bench: Vec<String>,
    pub taxi: Vec<String>,
    pub reserve: Vec<String>,
}

pub fn roster_breakdown(roster: &Roster, directory: &PlayerMap, users: &[LeagueUser]) -> RosterBreakdown {
    let bench: Vec<PlayerId> = roster.bench().into_iter().cloned().collect();
    RosterBreakdown {
        owner_id: roster.owner_id.clone(),
        owner_name: roster
            .owner_id
            .as_deref()
            .and_then(|owner| users.iter().find(|u| u.user_id == owner))
            .map(|u| u.team_label().to_string()),
        roster_id: roster.roster_id,
        starters: label_players(&roster.starters, directory),
        bench: label_players(&bench, directory),
        taxi: label_players(&roster.taxi, directory),
        reserve: label_players(&roster.reserve, directory),
    }
}

// ---------------------------------------------------------------------------
// Trending
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingPlayer {
    pub player_id: PlayerId,
    pub count: u64,
    pub name: String,
    pub position: String,
    pub team: String,
}

/// The first `limit` signals annotated with directory details, in upstream
/// order. Unknown players keep their ID with placeholder details.
pub fn trending_summary(signals: &[TrendingSignal], directory: &PlayerMap, limit: usize) -> Vec<TrendingPlayer> {
    signals
        .iter()
        .take(limit)
        .map(|signal| match directory.get(&signal.player_id) {
            Some(player) => TrendingPlayer {
                player_id: signal.player_id.clone(),
                count: signal.count,
                name: player.full_name(),
                position: player.position_str().to_string(),
                team: player.team_or_fa().to_string(),
            },
            None => TrendingPlayer {
                player_id: signal.player_id.clone(),
                count: signal.count,
                name: "Unknown".to_string(),
                position: "N/A".to_string(),
                team: "FA".to_string(),
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Forum trends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForumTrends {
    pub total_discussions: usize,
    pub hot_posts: Vec<Post>,
    pub top_by_score: Vec<Post>,
    pub top_by_comments: Vec<Post>,
    /// Rostered players named in hot post titles.
    pub roster_mentions: Vec<String>,
}

pub fn forum_trends(posts: &[Post], roster_names: &[String]) -> ForumTrends {
    let mut by_score = posts.to_vec();
    by_score.sort_by(|a, b| b.score.cmp(&a.score));
    by_score.truncate(TOP_POST_SUMMARY);

    let mut by_comments = posts.to_vec();
    by_comments.sort_by(|a, b| b.num_comments.cmp(&a.num_comments));
    by_comments.truncate(TOP_POST_SUMMARY);

    let titles = posts
        .iter()
        .map(|p| p.title.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    ForumTrends {
        total_discussions: posts.len(),
        hot_posts: posts.iter().take(HOT_POST_SUMMARY).cloned().collect(),
        top_by_score: by_score,
        top_by_comments: by_comments,
        roster_mentions: extract_player_mentions(&titles, roster_names),
    }
}

// ---------------------------------------------------------------------------
// Transactions and matchup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub transaction_id: String,
    pub kind: String,
    pub status: String,
    pub adds: Vec<String>,
    pub drops: Vec<String>,
}

fn player_name(id: &str, directory: &PlayerMap) -> String {
    directory
        .get(id)
        .map(|p| p.full_name())
        .unwrap_or_else(|| id.to_string())
}

pub fn summarize_transactions(transactions: &[Transaction], directory: &PlayerMap) -> Vec<TransactionSummary> {
    transactions
        .iter()
        .map(|tx| {
            let mut adds: Vec<String> = tx.added_ids().into_iter().map(|id| player_name(id, directory)).collect();
            let mut drops: Vec<String> = tx.dropped_ids().into_iter().map(|id| player_name(id, directory)).collect();
            adds.sort();
            drops.sort();
            TransactionSummary {
                transaction_id: tx.transaction_id.clone(),
                kind: tx.kind.clone(),
                status: tx.status.clone(),
                adds,
                drops,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupSummary {
    pub week: u32,
    pub roster_id: u32,
    pub points: f64,
    pub opponent_roster_id: Option<u32>,
    pub opponent_name: Option<String>,
    pub opponent_points: Option<f64>,
}

/// The user's side of this week's matchup and, when paired, the opponent.
/// `None` when the roster has no matchup entry (bye or off-season).
pub fn summarize_matchup(
    matchups: &[Matchup],
    roster_id: u32,
    week: u32,
    rosters: &[Roster],
    users: &[LeagueUser],
) -> Option<MatchupSummary> {
    let mine = matchups.iter().find(|m| m.roster_id == roster_id)?;
    let opponent = mine.matchup_id.and_then(|id| {
        matchups
            .iter()
            .find(|m| m.matchup_id == Some(id) && m.roster_id != roster_id)
    });

    let opponent_name = opponent
        .and_then(|o| rosters.iter().find(|r| r.roster_id == o.roster_id))
        .and_then(|r| r.owner_id.as_deref())
        .and_then(|owner| users.iter().find(|u| u.user_id == owner))
        .map(|u| u.team_label().to_string());

    Some(MatchupSummary {
        week,
        roster_id,
        points: mine.points.unwrap_or(0.0),
        opponent_roster_id: opponent.map(|o| o.roster_id),
        opponent_name,
        opponent_points: opponent.map(|o| o.points.unwrap_or(0.0)),
    })
}
