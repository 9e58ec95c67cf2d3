// Configuration loading and parsing (league.toml, analysis.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::player::Position;
use crate::sentiment::Lexicon;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub analysis: AnalysisConfig,
    pub scoring: ScoringConfig,
    pub sentiment: SentimentConfig,
    pub http: HttpConfig,
    pub report: ReportConfig,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[sleeper]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    sleeper: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub league_id: String,
    /// Owner/user ID. Takes priority over `username` when both are set.
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub season: String,
    pub current_week: u32,
}

impl LeagueConfig {
    /// The identifier used to resolve the owner: the explicit ID when present,
    /// otherwise the username.
    pub fn owner_key(&self) -> Option<&str> {
        self.owner_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.username.as_deref().filter(|s| !s.is_empty()))
    }
}

// ---------------------------------------------------------------------------
// analysis.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire analysis.toml file.
#[derive(Debug, Clone, Deserialize)]
struct AnalysisFile {
    analysis: AnalysisConfig,
    position_targets: PositionTargets,
    scoring: ScoringSection,
    sentiment: SentimentConfig,
    http: HttpConfig,
    report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub max_waiver_recommendations: usize,
    pub include_sentiment: bool,
    pub max_sentiment_lookups: usize,
    pub trending_limit: u32,
    pub trending_lookback_hours: u32,
    pub trending_summary_size: usize,
}

/// Target depth per position. A position is a need when the rostered count
/// is strictly below its target. Field names match the TOML keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[allow(non_snake_case)]
pub struct PositionTargets {
    pub QB: usize,
    pub RB: usize,
    pub WR: usize,
    pub TE: usize,
    pub K: usize,
    pub DEF: usize,
}

impl PositionTargets {
    pub fn target(&self, position: Position) -> usize {
        match position {
            Position::QB => self.QB,
            Position::RB => self.RB,
            Position::WR => self.WR,
            Position::TE => self.TE,
            Position::K => self.K,
            Position::DEF => self.DEF,
        }
    }
}

impl Default for PositionTargets {
    fn default() -> Self {
        Self {
            QB: 2,
            RB: 4,
            WR: 4,
            TE: 2,
            K: 1,
            DEF: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ScoringSection {
    trending_divisor: f64,
    trending_cap: f64,
    position_need_bonus: f64,
    sentiment_scale: f64,
    heavy_drop_threshold: u64,
}

/// Weights for the waiver pickup priority score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityWeights {
    pub trending_divisor: f64,
    pub trending_cap: f64,
    pub position_need_bonus: f64,
    /// Multiplier applied to `(sentiment + 1)`, mapping [-1, 1] onto
    /// [0, 2 * scale].
    pub sentiment_scale: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            trending_divisor: 10.0,
            trending_cap: 50.0,
            position_need_bonus: 30.0,
            sentiment_scale: 10.0,
        }
    }
}

/// Every table the scoring pipeline reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub targets: PositionTargets,
    pub weights: PriorityWeights,
    /// Trending-drop counts above this get the league-wide wording.
    pub heavy_drop_threshold: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            targets: PositionTargets::default(),
            weights: PriorityWeights::default(),
            heavy_drop_threshold: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentConfig {
    pub subreddit: String,
    pub search_limit: u32,
    pub include_comments: bool,
    pub comment_posts: usize,
    pub comment_limit: u32,
    pub min_interval_ms: u64,
    pub hot_posts_limit: u32,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl SentimentConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn lexicon(&self) -> Lexicon {
        Lexicon {
            positive: self.positive.clone(),
            negative: self.negative.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub sleeper_base_url: String,
    pub reddit_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub directory_ttl_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn directory_ttl(&self) -> Duration {
        Duration::from_secs(self.directory_ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub output_dir: String,
    pub write_json: bool,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// `config/analysis.toml`, both relative to `base_dir`.
///
/// This does not copy defaults. Prefer `load_config()` which handles default
/// initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    // --- analysis.toml (required) ---
    let analysis_path = config_dir.join("analysis.toml");
    let analysis_text = read_file(&analysis_path)?;
    let analysis_file: AnalysisFile =
        toml::from_str(&analysis_text).map_err(|e| ConfigError::ParseError {
            path: analysis_path.clone(),
            source: e,
        })?;

    let scoring = ScoringConfig {
        targets: analysis_file.position_targets,
        weights: PriorityWeights {
            trending_divisor: analysis_file.scoring.trending_divisor,
            trending_cap: analysis_file.scoring.trending_cap,
            position_need_bonus: analysis_file.scoring.position_need_bonus,
            sentiment_scale: analysis_file.scoring.sentiment_scale,
        },
        heavy_drop_threshold: analysis_file.scoring.heavy_drop_threshold,
    };

    let config = Config {
        league: league_file.sleeper,
        analysis: analysis_file.analysis,
        scoring,
        sentiment: analysis_file.sentiment,
        http: analysis_file.http,
        report: analysis_file.report,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Pick the directory configuration is loaded from.
///
/// The working directory wins when it has `config/` or `defaults/`;
/// otherwise the per-user config directory is used.
pub fn resolve_base_dir(cwd: &Path) -> PathBuf {
    if cwd.join("config").exists() || cwd.join("defaults").exists() {
        return cwd.to_path_buf();
    }
    directories::ProjectDirs::from("", "", "waiverwire")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| cwd.to_path_buf())
}

/// Convenience wrapper: loads config relative to `base_dir` (or the resolved
/// default location), copying default files first.
pub fn load_config(base_dir: Option<&Path>) -> Result<Config, ConfigError> {
    let base = match base_dir {
        Some(dir) => dir.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
                path: PathBuf::from("."),
            })?;
            resolve_base_dir(&cwd)
        }
    };
    ensure_config_files(&base)?;
    load_config_from(&base)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league = &config.league;
    if league.league_id.trim().is_empty() {
        return Err(invalid("sleeper.league_id", "must not be empty"));
    }
    if league.owner_key().is_none() {
        return Err(invalid(
            "sleeper.owner_id",
            "either owner_id or username must be set",
        ));
    }
    if !(1..=18).contains(&league.current_week) {
        return Err(invalid(
            "sleeper.current_week",
            format!("must be between 1 and 18, got {}", league.current_week),
        ));
    }

    let analysis = &config.analysis;
    let count_fields: &[(&str, usize)] = &[
        (
            "analysis.max_waiver_recommendations",
            analysis.max_waiver_recommendations,
        ),
        ("analysis.trending_limit", analysis.trending_limit as usize),
        (
            "analysis.trending_lookback_hours",
            analysis.trending_lookback_hours as usize,
        ),
        ("analysis.trending_summary_size", analysis.trending_summary_size),
    ];
    for (name, val) in count_fields {
        if *val == 0 {
            return Err(invalid(name, "must be > 0"));
        }
    }

    let w = &config.scoring.weights;
    let weight_fields: &[(&str, f64)] = &[
        ("scoring.trending_divisor", w.trending_divisor),
        ("scoring.trending_cap", w.trending_cap),
        ("scoring.position_need_bonus", w.position_need_bonus),
        ("scoring.sentiment_scale", w.sentiment_scale),
    ];
    for (name, val) in weight_fields {
        if *val <= 0.0 {
            return Err(invalid(name, format!("must be > 0, got {val}")));
        }
    }

    let sentiment = &config.sentiment;
    if sentiment.search_limit == 0 {
        return Err(invalid("sentiment.search_limit", "must be > 0"));
    }
    if sentiment.subreddit.trim().is_empty() {
        return Err(invalid("sentiment.subreddit", "must not be empty"));
    }
    if sentiment.positive.is_empty() {
        return Err(invalid("sentiment.positive", "must list at least one keyword"));
    }
    if sentiment.negative.is_empty() {
        return Err(invalid("sentiment.negative", "must list at least one keyword"));
    }

    let http = &config.http;
    if http.user_agent.trim().is_empty() {
        return Err(invalid(
            "http.user_agent",
            "a descriptive user agent is required by the forum API",
        ));
    }
    if http.timeout_secs == 0 {
        return Err(invalid("http.timeout_secs", "must be > 0"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
