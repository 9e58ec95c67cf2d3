// waiverwire entry point.
//
// 1. Parse arguments, initialize tracing (log to file)
// 2. Load config, apply command-line overrides
// 3. Build the Sleeper and forum clients
// 4. Run one analysis
// 5. Write the HTML/JSON report and print a short summary

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use waiverwire_cli::args::Args;
use waiverwire_cli::output::write_report;
use waiverwire_core::config::{self, Config};
use waiverwire_engine::{AnalysisReport, Analyzer};
use waiverwire_feeds::sleeper::resolve_user_id;
use waiverwire_feeds::{LeagueFeed, RedditClient, SentimentSource, SleeperClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing()?;
    info!("waiverwire starting up");

    let mut config = config::load_config(args.base_dir.as_deref()).context("failed to load configuration")?;
    args.apply_overrides(&mut config)?;
    info!(
        league_id = %config.league.league_id,
        season = %config.league.season,
        week = config.league.current_week,
        sentiment = config.analysis.include_sentiment,
        "config loaded"
    );

    let sleeper = SleeperClient::from_config(&config.http).context("failed to build Sleeper client")?;

    if args.list_leagues {
        return list_leagues(&sleeper, &config).await;
    }

    let sentiment = if config.analysis.include_sentiment {
        let reddit =
            RedditClient::from_config(&config.http, &config.sentiment).context("failed to build forum client")?;
        Some(SentimentSource::new(reddit, &config.sentiment))
    } else {
        None
    };

    let output_dir = PathBuf::from(&config.report.output_dir);
    let write_json = config.report.write_json;

    let mut analyzer = Analyzer::new(sleeper, sentiment, config);
    let report = match analyzer.run().await {
        Ok(report) => report,
        Err(e) => {
            error!("analysis failed: {e:#}");
            return Err(e);
        }
    };

    let written = write_report(&report, &output_dir, write_json)?;
    print_summary(&report);
    println!("\nReport: {}", written.html.display());
    if let Some(json) = written.json {
        println!("Data:   {}", json.display());
    }

    info!("waiverwire finished");
    Ok(())
}

async fn list_leagues(sleeper: &SleeperClient, config: &Config) -> anyhow::Result<()> {
    let key = config
        .league
        .owner_key()
        .context("no owner_id or username configured")?;
    let user_id = resolve_user_id(sleeper, key)
        .await
        .with_context(|| format!("failed to resolve Sleeper user `{key}`"))?;
    let leagues = sleeper
        .user_leagues(&user_id, &config.league.season)
        .await
        .context("failed to fetch leagues")?;

    if leagues.is_empty() {
        println!("No leagues found for {key} in {}", config.league.season);
    }
    for league in leagues {
        println!(
            "{}  {}  ({}, {})",
            league.league_id,
            league.name,
            league.scoring_label(),
            league.status
        );
    }
    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    println!("{} - week {}", report.league.name, report.week);

    println!("\nTop waiver pickups:");
    if report.waiver_recommendations.is_empty() {
        println!("  (none)");
    }
    for rec in report.waiver_recommendations.iter().take(5) {
        println!(
            "  {:>5.1}  {} ({} - {})",
            rec.priority_score,
            rec.name,
            rec.position.map_or("N/A", |p| p.display_str()),
            rec.team.as_deref().unwrap_or("FA")
        );
    }

    if !report.drop_candidates.is_empty() {
        println!("\nDrop candidates:");
        for drop in &report.drop_candidates {
            println!("  {}: {}", drop.name, drop.reason);
        }
    }

    if !report.sit_start_alerts.is_empty() {
        println!("\nLineup alerts:");
        for alert in &report.sit_start_alerts {
            let names: Vec<&str> = alert.alternatives.iter().map(|a| a.name.as_str()).collect();
            println!(
                "  {} {} ({}), consider {}",
                alert.kind.label(),
                alert.player_name,
                alert.reason,
                names.join(", ")
            );
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("waiverwire.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("waiverwire=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    Ok(())
}
