//! Dashboard presentation loops.
//!
//! # Architecture
//!
//! - `run_tui()` - interactive dashboard with keyboard control
//! - `run_headless()` - plain status lines for non-TTY environments
//!
//! Both loops only read from the [`DashboardApp`]; refreshing happens on the
//! app's own runtime. The `watch` command resolves configuration, starts the
//! app and delegates here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pulseboard::app::DashboardApp;
use pulseboard::sync::TickOutcome;
use tracing::{debug, info};

use crate::error::CliError;
use crate::ui::dashboard::utils::print_simple_status;
use crate::ui::{Dashboard, DashboardEvent};

/// How often the dashboard is redrawn without input.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the interactive dashboard until the user quits or `shutdown` is set.
pub fn run_tui(app: &DashboardApp, shutdown: Arc<AtomicBool>) -> Result<(), CliError> {
    let config = app.config();
    let mut dashboard = Dashboard::new(config.metrics_url(), config.refresh_interval)?;
    let mut updates = app.subscribe();

    let mut last_draw = Instant::now();
    let initial = updates.borrow_and_update().clone();
    dashboard.draw(&initial, &app.telemetry())?;

    while !shutdown.load(Ordering::SeqCst) {
        match dashboard.poll_event(Duration::from_millis(50))? {
            Some(DashboardEvent::Quit) => {
                info!("Quit requested from dashboard");
                break;
            }
            Some(DashboardEvent::Refresh) => match app.refresh() {
                TickOutcome::Admitted { generation } => {
                    debug!(generation, "Manual refresh started")
                }
                outcome => debug!(?outcome, "Manual refresh ignored"),
            },
            None => {}
        }

        let changed = updates.has_changed().unwrap_or(false);
        if changed || last_draw.elapsed() >= TICK_RATE {
            let projection = updates.borrow_and_update().clone();
            dashboard.draw(&projection, &app.telemetry())?;
            last_draw = Instant::now();
        }
    }

    Ok(())
}

/// Print a status line after every applied refresh until `shutdown` is set.
pub fn run_headless(app: &DashboardApp, shutdown: Arc<AtomicBool>) -> Result<(), CliError> {
    println!("Watching {}", app.config().metrics_url());
    println!("Press Ctrl+C to stop.");
    println!();

    let mut updates = app.subscribe();
    let mut printed_attempts = 0;

    while !shutdown.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(100));

        if !updates.has_changed().unwrap_or(false) {
            continue;
        }
        let projection = updates.borrow_and_update().clone();

        // One line per completed attempt, success or failure
        let completed = app.telemetry().fetches_completed();
        if completed > printed_attempts {
            print_simple_status(&projection);
            printed_attempts = completed;
        }
    }

    Ok(())
}
