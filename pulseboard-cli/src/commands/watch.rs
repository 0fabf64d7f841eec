//! Watch command - live dashboard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pulseboard::app::DashboardApp;
use tracing::info;

use super::common::ConnectionArgs;
use crate::error::CliError;
use crate::runner::CliRunner;
use crate::tui_app::{run_headless, run_tui};
use crate::ui::dashboard::utils::print_session_summary;

pub fn run(connection: ConnectionArgs, headless: bool) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("watch");
    let config = runner.dashboard_config(&connection)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let interactive = !headless && atty::is(atty::Stream::Stdout) && atty::is(atty::Stream::Stdin);
    if !interactive {
        if let Some(log_file) = runner.log_file() {
            println!("Logging to {}", log_file.display());
        }
    }

    let app = DashboardApp::start_sync(config)?;
    info!(interactive, "Dashboard running");

    let result = if interactive {
        run_tui(&app, Arc::clone(&shutdown))
    } else {
        run_headless(&app, Arc::clone(&shutdown))
    };

    app.shutdown();
    let telemetry = app.telemetry();
    info!(
        succeeded = telemetry.fetches_succeeded,
        failed = telemetry.fetches_failed,
        dropped_ticks = telemetry.ticks_dropped,
        "Dashboard stopped"
    );

    result?;
    print_session_summary(&telemetry);
    Ok(())
}
