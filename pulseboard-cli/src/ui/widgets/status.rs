//! Refresh status widget.
//!
//! Shows whether a refresh is running, the last error if any, and when the
//! displayed data was obtained.

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use pulseboard::sync::{Projection, SyncStatus};

use crate::ui::dashboard::utils::{format_age, format_clock};

/// Status bar contents.
pub struct StatusWidget<'a> {
    projection: &'a Projection,
    now: DateTime<Utc>,
    spinner: char,
}

impl<'a> StatusWidget<'a> {
    pub fn new(projection: &'a Projection, now: DateTime<Utc>) -> Self {
        Self {
            projection,
            now,
            spinner: '⟳',
        }
    }

    pub fn with_spinner(mut self, spinner: char) -> Self {
        self.spinner = spinner;
        self
    }

    fn state_span(&self) -> Span<'static> {
        match (self.projection.status, &self.projection.error_message) {
            (SyncStatus::Fetching, _) => Span::styled(
                format!("{} Refreshing", self.spinner),
                Style::default().fg(Color::Cyan),
            ),
            (SyncStatus::Idle, Some(_)) => Span::styled(
                "✖ Stale",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            (SyncStatus::Idle, None) if self.projection.has_data() => {
                Span::styled("● Live", Style::default().fg(Color::Green))
            }
            (SyncStatus::Idle, None) => {
                Span::styled("○ Waiting", Style::default().fg(Color::DarkGray))
            }
        }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = Style::default().fg(Color::DarkGray);

        let mut timing = vec![self.state_span(), Span::raw("  │  ")];
        match self.projection.last_updated {
            Some(at) => {
                let age = (self.now - at).num_seconds();
                timing.push(Span::styled("Last updated ", label));
                timing.push(Span::styled(format_clock(at), Style::default().fg(Color::White)));
                timing.push(Span::styled(format!(" ({} ago)", format_age(age)), label));
            }
            None => timing.push(Span::styled("Never updated", label)),
        }
        if let Some(data_at) = self.projection.data_timestamp() {
            timing.push(Span::raw("  │  "));
            timing.push(Span::styled("Data timestamp ", label));
            timing.push(Span::styled(
                format_clock(data_at),
                Style::default().fg(Color::White),
            ));
        }

        let mut lines = vec![Line::from(timing)];
        if let Some(error) = &self.projection.error_message {
            lines.push(Line::from(Span::styled(
                format!("Error loading metrics: {}", error),
                Style::default().fg(Color::Red),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
