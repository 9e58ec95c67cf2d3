// Shared fixtures for engine integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use waiverwire_core::config::{
    AnalysisConfig, Config, HttpConfig, LeagueConfig, ReportConfig, ScoringConfig, SentimentConfig,
};
use waiverwire_core::player::{InjuryStatus, Player, PlayerMap, Position, TrendKind, TrendingSignal};
use waiverwire_core::roster::Roster;
use waiverwire_core::sentiment::Lexicon;
use waiverwire_feeds::reddit::{Comment, Post};
use waiverwire_feeds::sleeper::{League, LeagueUser, Matchup, SleeperUser, Transaction};
use waiverwire_feeds::{DiscussionFeed, FetchError, LeagueFeed};

pub const LEAGUE_ID: &str = "1257118081231097856";
pub const OWNER_ID: &str = "1260492147568689152";

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn player(id: &str, first: &str, last: &str, position: Position, status: InjuryStatus) -> Player {
    Player {
        player_id: id.into(),
        first_name: first.into(),
        last_name: last.into(),
        position: Some(position),
        team: Some("SEA".into()),
        injury_status: status,
        active: true,
    }
}

pub fn directory(players: Vec<Player>) -> PlayerMap {
    players
        .into_iter()
        .map(|p| (p.player_id.clone(), p))
        .collect()
}

pub fn roster(roster_id: u32, owner: &str, starters: &[&str], players: &[&str]) -> Roster {
    Roster {
        roster_id,
        owner_id: Some(owner.into()),
        starters: starters.iter().map(|s| s.to_string()).collect(),
        players: players.iter().map(|s| s.to_string()).collect(),
        taxi: vec![],
        reserve: vec![],
    }
}

pub fn post(id: &str, title: &str, score: i64, num_comments: u64) -> Post {
    Post {
        id: id.into(),
        title: title.into(),
        author: "poster".into(),
        score,
        upvote_ratio: 0.9,
        num_comments,
        created_utc: 0.0,
        url: format!("https://forum.test/{id}"),
        selftext: String::new(),
        flair: None,
    }
}

fn status_error(endpoint: &str, status: u16) -> FetchError {
    FetchError::Status {
        endpoint: endpoint.to_string(),
        status,
        reason: "Service Unavailable".to_string(),
    }
}

pub fn test_config() -> Config {
    let lexicon = Lexicon::default();
    Config {
        league: LeagueConfig {
            league_id: LEAGUE_ID.into(),
            owner_id: Some(OWNER_ID.into()),
            username: None,
            season: "2024".into(),
            current_week: 10,
        },
        analysis: AnalysisConfig {
            max_waiver_recommendations: 10,
            include_sentiment: true,
            max_sentiment_lookups: 10,
            trending_limit: 30,
            trending_lookback_hours: 24,
            trending_summary_size: 10,
        },
        scoring: ScoringConfig::default(),
        sentiment: SentimentConfig {
            subreddit: "fantasyfootball".into(),
            search_limit: 15,
            include_comments: false,
            comment_posts: 5,
            comment_limit: 30,
            min_interval_ms: 2000,
            hot_posts_limit: 50,
            positive: lexicon.positive,
            negative: lexicon.negative,
        },
        http: HttpConfig {
            sleeper_base_url: "http://unused.test".into(),
            reddit_base_url: "http://unused.test".into(),
            user_agent: "waiverwire-tests/1.0".into(),
            timeout_secs: 30,
            directory_ttl_secs: 3600,
        },
        report: ReportConfig {
            output_dir: "reports".into(),
            write_json: true,
        },
    }
}

// ---------------------------------------------------------------------------
// Fake league feed
// ---------------------------------------------------------------------------

pub struct FakeLeague {
    pub league: League,
    pub rosters: Vec<Roster>,
    pub users: Vec<LeagueUser>,
    pub players: PlayerMap,
    pub adds: Vec<TrendingSignal>,
    pub drops: Vec<TrendingSignal>,
    pub matchups: Option<Vec<Matchup>>,
    pub transactions: Option<Vec<Transaction>>,
    pub fail_rosters: bool,
    pub username_lookups: Arc<AtomicUsize>,
}

impl FakeLeague {
    pub fn new(players: PlayerMap, rosters: Vec<Roster>) -> Self {
        let league: League = serde_json::from_value(serde_json::json!({
            "league_id": LEAGUE_ID,
            "name": "Sunday Funday",
            "season": "2024",
            "total_rosters": 10,
            "roster_positions": ["QB", "RB", "RB", "WR", "WR", "TE", "FLEX", "K", "DEF"],
            "scoring_settings": {"rec": 1.0}
        }))
        .unwrap();
        let users: Vec<LeagueUser> = serde_json::from_value(serde_json::json!([
            {"user_id": OWNER_ID, "display_name": "me", "metadata": {"team_name": "Waiver Hawks"}},
            {"user_id": "rival", "display_name": "rival"}
        ]))
        .unwrap();
        Self {
            league,
            rosters,
            users,
            players,
            adds: vec![],
            drops: vec![],
            matchups: None,
            transactions: None,
            fail_rosters: false,
            username_lookups: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl LeagueFeed for FakeLeague {
    async fn user(&self, username_or_id: &str) -> Result<SleeperUser, FetchError> {
        self.username_lookups.fetch_add(1, Ordering::SeqCst);
        if username_or_id == "waiver_hawk" {
            return Ok(SleeperUser {
                user_id: OWNER_ID.into(),
                username: Some(username_or_id.into()),
                display_name: None,
            });
        }
        Err(FetchError::UserNotFound {
            user: username_or_id.into(),
        })
    }

    async fn user_leagues(&self, _user_id: &str, _season: &str) -> Result<Vec<League>, FetchError> {
        Ok(vec![self.league.clone()])
    }

    async fn league(&self, _league_id: &str) -> Result<League, FetchError> {
        Ok(self.league.clone())
    }

    async fn league_rosters(&self, _league_id: &str) -> Result<Vec<Roster>, FetchError> {
        if self.fail_rosters {
            return Err(status_error("league rosters", 503));
        }
        Ok(self.rosters.clone())
    }

    async fn league_users(&self, _league_id: &str) -> Result<Vec<LeagueUser>, FetchError> {
        Ok(self.users.clone())
    }

    async fn matchups(&self, _league_id: &str, _week: u32) -> Result<Vec<Matchup>, FetchError> {
        self.matchups.clone().ok_or_else(|| status_error("matchups", 503))
    }

    async fn transactions(&self, _league_id: &str, _week: u32) -> Result<Vec<Transaction>, FetchError> {
        self.transactions
            .clone()
            .ok_or_else(|| status_error("transactions", 503))
    }

    async fn trending(&self, kind: TrendKind, _lookback: u32, limit: u32) -> Result<Vec<TrendingSignal>, FetchError> {
        let source = match kind {
            TrendKind::Add => &self.adds,
            TrendKind::Drop => &self.drops,
        };
        Ok(source.iter().take(limit as usize).cloned().collect())
    }

    async fn all_players(&self) -> Result<PlayerMap, FetchError> {
        Ok(self.players.clone())
    }
}

// ---------------------------------------------------------------------------
// Fake discussion feed
// ---------------------------------------------------------------------------

/// Returns posts whose title contains the query's last word; queries listed in
/// `failing` error out.
pub struct FakeForum {
    pub posts: Vec<Post>,
    pub failing: Vec<String>,
    pub fail_hot: bool,
    pub searches: Arc<Mutex<Vec<String>>>,
}

impl FakeForum {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            failing: vec![],
            fail_hot: false,
            searches: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl DiscussionFeed for FakeForum {
    async fn search_posts(&self, query: &str, limit: u32) -> Result<Vec<Post>, FetchError> {
        self.searches.lock().unwrap().push(query.to_string());
        if self.failing.iter().any(|q| q == query) {
            return Err(status_error("post search", 429));
        }
        let needle = query.split_whitespace().last().unwrap_or("").to_lowercase();
        Ok(self
            .posts
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn post_comments(&self, _post_id: &str, _limit: u32) -> Result<Vec<Comment>, FetchError> {
        Ok(vec![])
    }

    async fn hot_posts(&self, limit: u32) -> Result<Vec<Post>, FetchError> {
        if self.fail_hot {
            return Err(status_error("hot posts", 503));
        }
        Ok(self.posts.iter().take(limit as usize).cloned().collect())
    }
}
