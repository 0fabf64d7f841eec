//! Full-screen dashboard.
//!
//! Owns the terminal while alive: raw mode and the alternate screen are
//! entered on construction and restored on drop, including when the event
//! loop exits with an error.
//!
//! # Submodules
//!
//! - `render` - layout and panel rendering
//! - `utils` - formatting helpers shared with headless output

mod render;
pub mod utils;

use std::io::{self, Stdout};
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use pulseboard::sync::Projection;
use pulseboard::telemetry::EngineTelemetry;

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// User intent decoded from terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    Quit,
    Refresh,
}

impl DashboardEvent {
    /// Map a key press to an event. `q`, `Esc` and `Ctrl+C` quit, `r` refreshes.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(DashboardEvent::Quit)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(DashboardEvent::Quit),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(DashboardEvent::Refresh),
            _ => None,
        }
    }
}

/// Interactive terminal dashboard.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    source: String,
    refresh_interval: Duration,
    frame_count: usize,
}

impl Dashboard {
    /// Take over the terminal.
    pub fn new(source: impl Into<String>, refresh_interval: Duration) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(e);
            }
        };

        Ok(Self {
            terminal,
            source: source.into(),
            refresh_interval,
            frame_count: 0,
        })
    }

    /// Wait up to `timeout` for input.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<DashboardEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(DashboardEvent::from_key(key)),
            _ => Ok(None),
        }
    }

    /// Redraw every panel from the current projection.
    pub fn draw(&mut self, projection: &Projection, telemetry: &EngineTelemetry) -> io::Result<()> {
        self.frame_count = self.frame_count.wrapping_add(1);
        let view = render::DashboardView {
            projection,
            telemetry,
            source: &self.source,
            refresh_interval: self.refresh_interval,
            now: Utc::now(),
            spinner: SPINNER[self.frame_count % SPINNER.len()],
        };

        self.terminal
            .draw(|frame| render::render_dashboard(frame, &view))?;
        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
