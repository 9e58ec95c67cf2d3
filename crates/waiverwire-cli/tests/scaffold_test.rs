// Integration tests for the shipped default configuration.

use std::path::{Path, PathBuf};

fn defaults_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../defaults")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("waiverwire-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Verify that defaults/league.toml is valid TOML.
#[test]
fn league_toml_is_valid() {
    let content = std::fs::read_to_string(defaults_dir().join("league.toml")).expect("defaults/league.toml should exist");
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(parsed.is_ok(), "defaults/league.toml is not valid TOML: {:?}", parsed.err());
}

/// Verify that defaults/analysis.toml is valid TOML.
#[test]
fn analysis_toml_is_valid() {
    let content =
        std::fs::read_to_string(defaults_dir().join("analysis.toml")).expect("defaults/analysis.toml should exist");
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(parsed.is_ok(), "defaults/analysis.toml is not valid TOML: {:?}", parsed.err());
}

/// A fresh base directory seeded only with defaults/ loads cleanly and gets
/// its config/ populated.
#[test]
fn defaults_load_into_fresh_base_dir() {
    let base = scratch_dir("defaults-load");
    std::fs::create_dir_all(base.join("defaults")).unwrap();
    for name in ["league.toml", "analysis.toml"] {
        std::fs::copy(defaults_dir().join(name), base.join("defaults").join(name)).unwrap();
    }

    let config = waiverwire_core::config::load_config(Some(&base)).expect("defaults should load");
    assert!(base.join("config/league.toml").exists());
    assert!(base.join("config/analysis.toml").exists());

    assert_eq!(config.sentiment.subreddit, "fantasyfootball");
    assert_eq!(config.sentiment.min_interval_ms, 2000);
    assert_eq!(config.scoring.heavy_drop_threshold, 100);
    assert_eq!(config.scoring.targets.RB, 4);
    assert_eq!(config.analysis.trending_limit, 30);
    assert!(config.league.owner_key().is_some());

    let _ = std::fs::remove_dir_all(&base);
}
