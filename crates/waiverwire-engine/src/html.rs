// HTML rendering of an analysis report.
//
// Self-contained document with inline styles, suitable for opening locally
// or pasting into an email body. Every piece of upstream text is escaped.

use std::fmt::Write;

use waiverwire_core::player::Position;

use crate::report::AnalysisReport;
use crate::scoring::PriorityTier;

const WAIVER_ROWS: usize = 5;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; color: #333; max-width: 900px; margin: 0 auto; }
h1 { color: #00a86b; }
h2 { color: #0066ff; border-bottom: 2px solid #0066ff; padding-bottom: 5px; }
.priority-high { background-color: #ffeeee; border-left: 4px solid #ff0000; }
.priority-medium { background-color: #fff8e1; border-left: 4px solid #ffa500; }
.priority-low { background-color: #e8f5e9; border-left: 4px solid #4caf50; }
.alert { padding: 10px; margin: 10px 0; }
table { border-collapse: collapse; width: 100%; margin: 15px 0; }
th, td { padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }
th { background-color: #f5f5f5; font-weight: bold; }
.positive { color: #4caf50; font-weight: bold; }
.negative { color: #ff0000; font-weight: bold; }
.footer { color: #888; font-size: 12px; }
";

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn position_cell(position: Option<Position>) -> &'static str {
    position.map_or("N/A", |p| p.display_str())
}

fn team_cell(team: Option<&str>) -> String {
    escape_html(team.unwrap_or("FA"))
}

/// Render the full report document.
pub fn render_html(report: &AnalysisReport) -> String {
    let mut html = String::new();
    // Writing to a String cannot fail.
    let _ = write_document(&mut html, report);
    html
}

fn write_document(html: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(html, "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">")?;
    writeln!(html, "<title>Waiver Report: {}</title>", escape_html(&report.league.name))?;
    writeln!(html, "<style>\n{STYLE}</style>\n</head>\n<body>")?;

    writeln!(html, "<h1>Fantasy Football Weekly Report</h1>")?;
    writeln!(html, "<p><strong>League:</strong> {}</p>", escape_html(&report.league.name))?;
    writeln!(html, "<p><strong>Scoring:</strong> {} PPR</p>", report.league.scoring)?;
    writeln!(html, "<p><strong>Week:</strong> {}</p>", report.week)?;
    if let Some(owner) = &report.roster.owner_name {
        writeln!(html, "<p><strong>Team:</strong> {}</p>", escape_html(owner))?;
    }
    writeln!(
        html,
        "<p><strong>Generated:</strong> {}</p>",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    )?;

    write_waivers(html, report)?;
    write_drops(html, report)?;
    write_alerts(html, report)?;
    write_positions(html, report)?;
    write_matchup(html, report)?;
    write_forum(html, report)?;
    write_transactions(html, report)?;

    writeln!(
        html,
        "<hr>\n<p class=\"footer\">Generated automatically by waiverwire.</p>\n</body>\n</html>"
    )
}

fn write_waivers(html: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(html, "<h2>Top Waiver Wire Pickups</h2>")?;
    if report.waiver_recommendations.is_empty() {
        return writeln!(html, "<p>No strong waiver recommendations at this time.</p>");
    }

    writeln!(
        html,
        "<table>\n<tr><th>Player</th><th>Position</th><th>Team</th><th>Trending</th><th>Forum Sentiment</th><th>Priority</th></tr>"
    )?;
    for rec in report.waiver_recommendations.iter().take(WAIVER_ROWS) {
        let tier = PriorityTier::from_score(rec.priority_score);
        let sentiment = match &rec.sentiment {
            Some(verdict) => format!(
                "<span class=\"{}\">{}</span> ({} posts)",
                verdict.label.as_str(),
                verdict.label.as_str().to_uppercase(),
                rec.discussion_count
            ),
            None => "N/A".to_string(),
        };
        writeln!(
            html,
            "<tr class=\"{}\"><td><strong>{}</strong></td><td>{}</td><td>{}</td><td>+{} adds</td><td>{}</td><td>{}</td></tr>",
            tier.css_class(),
            escape_html(&rec.name),
            position_cell(rec.position),
            team_cell(rec.team.as_deref()),
            rec.trending_count,
            sentiment,
            tier.label(),
        )?;
    }
    writeln!(html, "</table>")
}

fn write_drops(html: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(html, "<h2>Drop Candidates</h2>")?;
    if report.drop_candidates.is_empty() {
        return writeln!(html, "<p>No obvious drop candidates on your roster.</p>");
    }

    writeln!(
        html,
        "<table>\n<tr><th>Player</th><th>Position</th><th>Status</th><th>Reason</th></tr>"
    )?;
    for drop in &report.drop_candidates {
        writeln!(
            html,
            "<tr><td><strong>{}</strong></td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&drop.name),
            position_cell(drop.position),
            escape_html(drop.injury_status.label()),
            escape_html(&drop.reason),
        )?;
    }
    writeln!(html, "</table>")
}

fn write_alerts(html: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(html, "<h2>Sit/Start Recommendations</h2>")?;
    if report.sit_start_alerts.is_empty() {
        return writeln!(html, "<p>Your current lineup looks good! No major concerns.</p>");
    }

    for alert in &report.sit_start_alerts {
        writeln!(html, "<div class=\"alert priority-high\">")?;
        writeln!(
            html,
            "<p><strong>{}: {}</strong> ({})</p>",
            alert.kind.label(),
            escape_html(&alert.player_name),
            alert.position.display_str()
        )?;
        writeln!(html, "<p>Reason: {}</p>\n<p>Consider starting:</p>\n<ul>", escape_html(&alert.reason))?;
        for alt in &alert.alternatives {
            writeln!(
                html,
                "<li>{} ({}) - {}</li>",
                escape_html(&alt.name),
                team_cell(alt.team.as_deref()),
                escape_html(alt.status.label())
            )?;
        }
        writeln!(html, "</ul>\n</div>")?;
    }
    Ok(())
}

fn write_positions(html: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(html, "<h2>Position Summary</h2>\n<ul>")?;
    for entry in report.position_analysis.entries() {
        let marker = if entry.need { "Need depth" } else { "OK" };
        writeln!(
            html,
            "<li>{}: {} / {} {}</li>",
            entry.position.display_str(),
            entry.count,
            entry.target,
            marker
        )?;
    }
    writeln!(html, "</ul>")
}

fn write_matchup(html: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    let Some(matchup) = &report.matchup else {
        return Ok(());
    };
    writeln!(html, "<h2>Week {} Matchup</h2>", matchup.week)?;
    match (matchup.opponent_points, &matchup.opponent_name) {
        (Some(points), name) => writeln!(
            html,
            "<p>You: {:.2} vs {}: {:.2}</p>",
            matchup.points,
            escape_html(name.as_deref().unwrap_or("Opponent")),
            points
        ),
        (None, _) => writeln!(html, "<p>You: {:.2} (no opponent this week)</p>", matchup.points),
    }
}

fn write_forum(html: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    let Some(trends) = &report.forum_trends else {
        return Ok(());
    };
    writeln!(html, "<h2>Forum Buzz</h2>")?;
    if !trends.roster_mentions.is_empty() {
        let names: Vec<String> = trends.roster_mentions.iter().map(|n| escape_html(n)).collect();
        writeln!(html, "<p><strong>Your players in hot threads:</strong> {}</p>", names.join(", "))?;
    }
    writeln!(html, "<ul>")?;
    for post in &trends.top_by_score {
        writeln!(
            html,
            "<li><a href=\"{}\">{}</a> ({} points, {} comments)</li>",
            escape_html(&post.url),
            escape_html(&post.title),
            post.score,
            post.num_comments
        )?;
    }
    writeln!(html, "</ul>")
}

fn write_transactions(html: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    let Some(transactions) = &report.transactions else {
        return Ok(());
    };
    if transactions.is_empty() {
        return Ok(());
    }
    writeln!(
        html,
        "<h2>League Transactions</h2>\n<table>\n<tr><th>Type</th><th>Status</th><th>Added</th><th>Dropped</th></tr>"
    )?;
    for tx in transactions {
        writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&tx.kind),
            escape_html(&tx.status),
            escape_html(&tx.adds.join(", ")),
            escape_html(&tx.drops.join(", ")),
        )?;
    }
    writeln!(html, "</table>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use waiverwire_core::player::InjuryStatus;
    use waiverwire_core::sentiment::SentimentVerdict;

    use crate::pipeline::{AlertKind, Alternative, DropCandidate, PipelineOutput, Recommendation, SitStartAlert};
    use crate::positions::analyze_positions;
    use crate::report::{LeagueInfo, RosterBreakdown};

    fn recommendation(name: &str, score: f64) -> Recommendation {
        Recommendation {
            player_id: name.into(),
            name: name.into(),
            position: Some(Position::RB),
            team: None,
            trending_count: 500,
            position_need: true,
            sentiment: None,
            discussion_count: 0,
            priority_score: score,
        }
    }

    fn report(output: PipelineOutput) -> AnalysisReport {
        AnalysisReport::new(
            chrono::Utc.with_ymd_and_hms(2024, 11, 12, 15, 30, 0).unwrap(),
            10,
            LeagueInfo {
                league_id: "L".into(),
                name: "Dynasty <Warriors> & Co".into(),
                season: "2024".into(),
                scoring: 0.5,
                scoring_label: "Half PPR".into(),
                roster_positions: vec![],
                total_rosters: Some(12),
            },
            RosterBreakdown {
                owner_id: Some("u".into()),
                owner_name: None,
                roster_id: 1,
                starters: vec![],
                bench: vec![],
                taxi: vec![],
                reserve: vec![],
            },
            analyze_positions(&[], &Default::default(), &Default::default()),
            output,
        )
    }

    fn empty_output() -> PipelineOutput {
        PipelineOutput {
            waiver_recommendations: vec![],
            drop_candidates: vec![],
            sit_start_alerts: vec![],
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn header_is_escaped_and_shows_scoring() {
        let html = render_html(&report(empty_output()));
        assert!(html.contains("Dynasty &lt;Warriors&gt; &amp; Co"));
        assert!(!html.contains("<Warriors>"));
        assert!(html.contains("0.5 PPR"));
        assert!(html.contains("2024-11-12 15:30 UTC"));
    }

    #[test]
    fn empty_sections_show_placeholders() {
        let html = render_html(&report(empty_output()));
        assert!(html.contains("No strong waiver recommendations"));
        assert!(html.contains("No obvious drop candidates"));
        assert!(html.contains("lineup looks good"));
        assert!(html.contains("QB: 0 / 2 Need depth"));
        assert!(html.contains("DEF: 0 / 1 Need depth"));
        assert!(!html.contains("Forum Buzz"));
    }

    #[test]
    fn waiver_table_shows_top_five_with_tiers() {
        let mut output = empty_output();
        output.waiver_recommendations = vec![
            recommendation("Alpha", 80.0),
            recommendation("Bravo", 55.0),
            recommendation("Charlie", 20.0),
            recommendation("Delta", 10.0),
            recommendation("Echo", 9.0),
            recommendation("Foxtrot", 8.0),
        ];
        output.waiver_recommendations[1].sentiment = Some(SentimentVerdict::from_counts(0, 2));
        output.waiver_recommendations[1].discussion_count = 4;

        let html = render_html(&report(output));
        assert!(html.contains("Alpha"));
        assert!(html.contains("Echo"));
        assert!(!html.contains("Foxtrot"));
        assert!(html.contains("<tr class=\"priority-high\"><td><strong>Alpha"));
        assert!(html.contains("<tr class=\"priority-medium\"><td><strong>Bravo"));
        assert!(html.contains("<tr class=\"priority-low\"><td><strong>Charlie"));
        assert!(html.contains("<span class=\"negative\">NEGATIVE</span> (4 posts)"));
        assert!(html.contains("<td>FA</td>"));
    }

    #[test]
    fn drops_and_alerts_are_listed() {
        let mut output = empty_output();
        output.drop_candidates = vec![DropCandidate {
            player_id: "d".into(),
            name: "Dropped Guy".into(),
            position: Some(Position::WR),
            team: Some("LV".into()),
            injury_status: InjuryStatus::IR,
            reason: "Injured: IR".into(),
            trending_drop_count: 0,
        }];
        output.sit_start_alerts = vec![SitStartAlert {
            kind: AlertKind::Sit,
            player_id: "s".into(),
            player_name: "Hurt Starter".into(),
            position: Position::WR,
            reason: "Injury: Out".into(),
            alternatives: vec![Alternative {
                player_id: "b".into(),
                name: "Bench Guy".into(),
                team: Some("DET".into()),
                status: InjuryStatus::Active,
            }],
        }];

        let html = render_html(&report(output));
        assert!(html.contains("<td><strong>Dropped Guy</strong></td><td>WR</td><td>IR</td><td>Injured: IR</td>"));
        assert!(html.contains("SIT: Hurt Starter</strong> (WR)"));
        assert!(html.contains("<li>Bench Guy (DET) - active</li>"));
    }
}
