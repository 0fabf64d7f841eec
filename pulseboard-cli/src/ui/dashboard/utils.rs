//! Formatting helpers and non-TUI output.
//!
//! Shared by the dashboard widgets, headless mode and the `fetch` command.

use chrono::{DateTime, Local, Utc};
use pulseboard::snapshot::{pluralize, SessionSummary};
use pulseboard::sync::Projection;
use pulseboard::telemetry::EngineTelemetry;

/// Wall-clock time in the local zone, `HH:MM:SS`.
pub fn format_clock(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Compact age such as `12s`, `3m05s` or `2h10m`.
pub fn format_age(seconds: i64) -> String {
    let secs = seconds.max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h{:02}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// `3 sessions across 2 users`, or the empty-window message.
pub fn session_line(summary: &SessionSummary) -> String {
    if summary.is_empty() {
        return "No active sessions in the last 5 minutes".to_string();
    }
    format!(
        "{} across {}",
        pluralize(summary.total_sessions, "session", "sessions"),
        pluralize(summary.user_count as u64, "user", "users")
    )
}

/// One status line for headless mode.
pub fn status_line(projection: &Projection) -> String {
    let mut line = match projection.last_updated {
        Some(at) => format!("[{}]", format_clock(at)),
        None => "[--:--:--]".to_string(),
    };

    match projection.active_users_count() {
        Some(users) => {
            line.push_str(&format!(
                " Active users: {} | Sessions: {} | Top pages: {}",
                users,
                session_line(&projection.session_summary()),
                projection.top_pages_chart().labels.len()
            ));
        }
        None if projection.is_loading => line.push_str(" Loading metrics..."),
        None => line.push_str(" No data yet"),
    }

    if let Some(error) = &projection.error_message {
        line.push_str(&format!(" | Error loading metrics: {}", error));
    }

    line
}

/// Simple non-TUI fallback for non-interactive terminals.
pub fn print_simple_status(projection: &Projection) {
    println!("{}", status_line(projection));
}

/// Print final session summary.
pub fn print_session_summary(telemetry: &EngineTelemetry) {
    println!();
    println!("Session Summary");
    println!("───────────────");
    println!(
        "  Refreshes: {} succeeded, {} failed ({:.0}% success)",
        telemetry.fetches_succeeded,
        telemetry.fetches_failed,
        telemetry.success_rate() * 100.0
    );
    println!(
        "  Ticks: {} admitted, {} skipped while busy",
        telemetry.ticks_admitted, telemetry.ticks_dropped
    );
    println!("  Uptime: {}", telemetry.uptime_human());
}
