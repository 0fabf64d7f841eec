//! Fetch command - retrieve one snapshot and print it.

use pulseboard::fetcher::{HttpSnapshotFetcher, SnapshotFetcher};
use pulseboard::snapshot::MetricsSnapshot;
use tracing::info;

use super::common::ConnectionArgs;
use crate::error::CliError;
use crate::runner::CliRunner;
use crate::ui::dashboard::utils::{format_clock, session_line};

pub fn run(connection: ConnectionArgs, json: bool) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("fetch");
    let config = runner.dashboard_config(&connection)?;

    let fetcher = HttpSnapshotFetcher::new(&config.base_url, config.request_timeout)?;

    let runtime = tokio_runtime()?;
    let snapshot = runtime.block_on(fetcher.fetch())?;
    info!(
        url = fetcher.url(),
        active_users = snapshot.active_users_count,
        "Fetched snapshot"
    );

    if json {
        let body = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| CliError::Config(format!("Failed to encode snapshot: {}", e)))?;
        println!("{}", body);
    } else {
        print!("{}", render_text(&snapshot));
    }

    Ok(())
}

fn tokio_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))
}

/// Plain text rendering of a snapshot.
fn render_text(snapshot: &MetricsSnapshot) -> String {
    use pulseboard::snapshot::{SessionSummary, TopPagesChart};

    let mut out = String::new();
    out.push_str(&format!(
        "Active users:    {}  (last 5 minutes)\n",
        snapshot.active_users_count
    ));

    let sessions = SessionSummary::from_sessions(&snapshot.active_sessions_by_user);
    out.push_str(&format!("Active sessions: {}\n", session_line(&sessions)));
    for user in &sessions.ranking {
        out.push_str(&format!("  {:<24} {:>5}\n", user.user_id, user.sessions));
    }

    let chart = TopPagesChart::from_pages(&snapshot.top_pages);
    out.push_str("Top pages (last 15 minutes):\n");
    if chart.is_empty() {
        out.push_str("  No page views in the last 15 minutes\n");
    }
    for (label, value) in chart.labels.iter().zip(&chart.values) {
        out.push_str(&format!("  {:<40} {:>7}\n", label, value));
    }

    out.push_str(&format!("Data timestamp:  {}\n", format_clock(snapshot.timestamp)));
    out
}
