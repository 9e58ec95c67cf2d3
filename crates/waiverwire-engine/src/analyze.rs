// One end-to-end analysis run.
//
// Primary data (league, rosters, users, directory, trending) is fetched
// concurrently and any failure aborts the run. Sentiment lookups then go out
// one at a time through the sentiment source's pacer. Forum trends, the
// week's transactions and the matchup are best-effort extras.

use std::collections::{HashMap, HashSet};

use anyhow::Context;
use tracing::{info, warn};
use waiverwire_core::config::Config;
use waiverwire_core::player::{PlayerId, PlayerMap, TrendKind, TrendingSignal};
use waiverwire_core::roster::Roster;
use waiverwire_core::sentiment::SentimentResult;
use waiverwire_feeds::sleeper::{available_players, find_owner_roster, resolve_user_id, LeagueUser};
use waiverwire_feeds::{DiscussionFeed, LeagueFeed, RemotePlayerDirectory, SentimentSource};

use crate::pipeline::{ScoringPipeline, WaiverCandidate};
use crate::report::{
    forum_trends, roster_breakdown, summarize_matchup, summarize_transactions, trending_summary, AnalysisReport,
    ForumTrends, LeagueInfo, MatchupSummary, TransactionSummary,
};

pub struct Analyzer<L, D> {
    league_feed: L,
    sentiment: Option<SentimentSource<D>>,
    directory: RemotePlayerDirectory,
    config: Config,
}

impl<L: LeagueFeed, D: DiscussionFeed> Analyzer<L, D> {
    /// `sentiment` may be `None` to run without forum lookups.
    pub fn new(league_feed: L, sentiment: Option<SentimentSource<D>>, config: Config) -> Self {
        let directory = RemotePlayerDirectory::new(config.http.directory_ttl());
        Self {
            league_feed,
            sentiment,
            directory,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn run(&mut self) -> anyhow::Result<AnalysisReport> {
        let league_id = self.config.league.league_id.clone();
        let week = self.config.league.current_week;
        let lookback = self.config.analysis.trending_lookback_hours;
        let limit = self.config.analysis.trending_limit;

        let owner_key = self
            .config
            .league
            .owner_key()
            .context("no owner_id or username configured")?
            .to_string();
        let owner_id = resolve_user_id(&self.league_feed, &owner_key)
            .await
            .with_context(|| format!("failed to resolve Sleeper user `{owner_key}`"))?;

        info!(league_id = %league_id, owner_id = %owner_id, week, "starting analysis");

        let feed = &self.league_feed;
        let (league, rosters, users, directory, trending_adds, trending_drops) = tokio::try_join!(
            feed.league(&league_id),
            feed.league_rosters(&league_id),
            feed.league_users(&league_id),
            self.directory.players(feed),
            feed.trending(TrendKind::Add, lookback, limit),
            feed.trending(TrendKind::Drop, lookback, limit),
        )
        .context("failed to fetch league data")?;

        info!(
            league = %league.name,
            rosters = rosters.len(),
            players = directory.len(),
            adds = trending_adds.len(),
            drops = trending_drops.len(),
            "primary data fetched"
        );

        let roster = find_owner_roster(&rosters, &league_id, &owner_id)?;
        let available_adds = restrict_to_available(&trending_adds, &rosters, &directory);

        let pipeline = ScoringPipeline::new(&roster, &directory, &self.config.scoring);
        let candidates = pipeline.waiver_candidates(&available_adds);

        let sentiments = match self.sentiment.as_mut() {
            Some(source) if self.config.analysis.include_sentiment => {
                lookup_sentiment(source, &candidates, self.config.analysis.max_sentiment_lookups).await
            }
            _ => HashMap::new(),
        };

        let output = pipeline.run(
            &available_adds,
            &trending_drops,
            &sentiments,
            self.config.analysis.max_waiver_recommendations,
        );
        info!(
            waivers = output.waiver_recommendations.len(),
            drops = output.drop_candidates.len(),
            alerts = output.sit_start_alerts.len(),
            "recommendations scored"
        );

        let summary_size = self.config.analysis.trending_summary_size;
        let mut report = AnalysisReport::new(
            chrono::Utc::now(),
            week,
            LeagueInfo::from(&league),
            roster_breakdown(&roster, &directory, &users),
            pipeline.positions().clone(),
            output,
        );
        report.trending_adds = trending_summary(&trending_adds, &directory, summary_size);
        report.trending_drops = trending_summary(&trending_drops, &directory, summary_size);

        report.forum_trends = self.fetch_forum_trends(&roster, &directory).await;
        report.transactions = self.fetch_transactions(&league_id, week, &directory).await;
        report.matchup = self
            .fetch_matchup(&league_id, week, &roster, &rosters, &users)
            .await;

        info!("analysis complete");
        Ok(report)
    }

    async fn fetch_forum_trends(&mut self, roster: &Roster, directory: &PlayerMap) -> Option<ForumTrends> {
        if !self.config.analysis.include_sentiment {
            return None;
        }
        let source = self.sentiment.as_mut()?;
        match source.hot_posts(self.config.sentiment.hot_posts_limit).await {
            Ok(posts) => {
                let names: Vec<String> = roster
                    .players
                    .iter()
                    .filter_map(|id| directory.get(id))
                    .map(|p| p.full_name())
                    .collect();
                Some(forum_trends(&posts, &names))
            }
            Err(e) => {
                warn!(error = %e, "forum trends unavailable");
                None
            }
        }
    }

    async fn fetch_transactions(
        &self,
        league_id: &str,
        week: u32,
        directory: &PlayerMap,
    ) -> Option<Vec<TransactionSummary>> {
        match self.league_feed.transactions(league_id, week).await {
            Ok(transactions) => Some(summarize_transactions(&transactions, directory)),
            Err(e) => {
                warn!(error = %e, week, "transactions unavailable");
                None
            }
        }
    }

    async fn fetch_matchup(
        &self,
        league_id: &str,
        week: u32,
        roster: &Roster,
        rosters: &[Roster],
        users: &[LeagueUser],
    ) -> Option<MatchupSummary> {
        match self.league_feed.matchups(league_id, week).await {
            Ok(matchups) => summarize_matchup(&matchups, roster.roster_id, week, rosters, users),
            Err(e) => {
                warn!(error = %e, week, "matchup unavailable");
                None
            }
        }
    }
}

/// Trending adds limited to players no team in the league has rostered.
fn restrict_to_available(
    trending_adds: &[TrendingSignal],
    rosters: &[Roster],
    directory: &PlayerMap,
) -> Vec<TrendingSignal> {
    let available: HashSet<&str> = available_players(rosters, directory)
        .into_iter()
        .map(|p| p.player_id.as_str())
        .collect();
    trending_adds
        .iter()
        .filter(|s| available.contains(s.player_id.as_str()))
        .cloned()
        .collect()
}

/// Look up sentiment for the first `max_lookups` candidates, serially.
/// Failed lookups are logged and left out.
async fn lookup_sentiment<D: DiscussionFeed>(
    source: &mut SentimentSource<D>,
    candidates: &[WaiverCandidate],
    max_lookups: usize,
) -> HashMap<PlayerId, SentimentResult> {
    let mut results = HashMap::new();
    for candidate in candidates.iter().take(max_lookups) {
        let name = candidate.player.full_name();
        match source.analyze(&name).await {
            Ok(result) => {
                results.insert(candidate.player.player_id.clone(), result);
            }
            Err(e) => warn!(player = %name, error = %e, "sentiment lookup failed"),
        }
    }
    info!(looked_up = results.len(), "sentiment lookups finished");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use waiverwire_core::player::{InjuryStatus, Player, Position};

    fn player(id: &str, active: bool) -> Player {
        Player {
            player_id: id.into(),
            first_name: "A".into(),
            last_name: id.into(),
            position: Some(Position::RB),
            team: None,
            injury_status: InjuryStatus::Active,
            active,
        }
    }

    #[test]
    fn restrict_drops_rostered_and_inactive_adds() {
        let directory: PlayerMap = [player("free", true), player("taken", true), player("retired", false)]
            .into_iter()
            .map(|p| (p.player_id.clone(), p))
            .collect();
        let rosters = vec![Roster {
            roster_id: 2,
            owner_id: Some("other".into()),
            players: vec!["taken".into()],
            ..Roster::default()
        }];
        let adds = vec![
            TrendingSignal::new("taken", 400),
            TrendingSignal::new("free", 300),
            TrendingSignal::new("retired", 200),
            TrendingSignal::new("unknown", 100),
        ];

        let kept = restrict_to_available(&adds, &rosters, &directory);
        assert_eq!(kept, vec![TrendingSignal::new("free", 300)]);
    }
}
