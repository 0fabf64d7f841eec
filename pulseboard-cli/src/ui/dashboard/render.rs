//! Dashboard layout and rendering.
//!
//! ```text
//! ┌ Pulseboard 0.3.0 ─────────────────────────────────────────┐
//! │ http://localhost:8080/api/metrics · every 30s              │
//! └────────────────────────────────────────────────────────────┘
//! ┌ Active Users ──┐┌ Active Sessions ─────────────────────────┐
//! │       42       ││ 3 sessions across 2 users                │
//! │ Last 5 minutes ││ alice                                 2  │
//! └────────────────┘└──────────────────────────────────────────┘
//! ┌ Top Pages · Last 15 minutes ───────────────────────────────┐
//! │ /home     ████████████████████████████████             10  │
//! └────────────────────────────────────────────────────────────┘
//! ┌ Status ────────────────────────────────────────────────────┐
//! │ ● Live  │  Last updated 12:00:00 (4s ago)                  │
//! └────────────────────────────────────────────────────────────┘
//!  q quit  r refresh                        12 ok · 1 failed
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use pulseboard::sync::Projection;
use pulseboard::telemetry::EngineTelemetry;

use crate::ui::widgets::{ActiveSessionsWidget, ActiveUsersWidget, StatusWidget, TopPagesWidget};

/// Everything one frame needs.
pub struct DashboardView<'a> {
    pub projection: &'a Projection,
    pub telemetry: &'a EngineTelemetry,
    pub source: &'a str,
    pub refresh_interval: Duration,
    pub now: DateTime<Utc>,
    pub spinner: char,
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
}

pub fn render_dashboard(frame: &mut Frame, view: &DashboardView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Min(4),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, rows[0], view);

    if view.projection.is_loading {
        let body = Rect {
            height: rows[1].height + rows[2].height,
            ..rows[1]
        };
        render_loading(frame, body, view.spinner);
    } else {
        render_panels(frame, rows[1], rows[2], view.projection);
    }

    let status_block = panel("Status");
    let status_area = status_block.inner(rows[3]);
    frame.render_widget(status_block, rows[3]);
    frame.render_widget(
        StatusWidget::new(view.projection, view.now).with_spinner(view.spinner),
        status_area,
    );

    render_footer(frame, rows[4], view.telemetry);
}

fn render_header(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" Pulseboard {} ", pulseboard::VERSION),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let line = Line::from(vec![
        Span::styled(view.source, Style::default().fg(Color::White)),
        Span::styled(
            format!(" · every {}s", view.refresh_interval.as_secs()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_loading(frame: &mut Frame, area: Rect, spinner: char) {
    let box_width = 30u16.min(area.width);
    let box_height = 3u16.min(area.height);
    let centered = Rect {
        x: area.x + area.width.saturating_sub(box_width) / 2,
        y: area.y + area.height.saturating_sub(box_height) / 2,
        width: box_width,
        height: box_height,
    };

    let text = Line::from(vec![
        Span::styled(format!("{} ", spinner), Style::default().fg(Color::Cyan)),
        Span::styled("Loading metrics...", Style::default().fg(Color::White)),
    ]);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(paragraph, centered);
}

fn render_panels(frame: &mut Frame, top: Rect, bottom: Rect, projection: &Projection) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(20)])
        .split(top);

    let users_block = panel("Active Users");
    let users_area = users_block.inner(columns[0]);
    frame.render_widget(users_block, columns[0]);
    frame.render_widget(
        ActiveUsersWidget::new(projection.active_users_count()),
        users_area,
    );

    let summary = projection.session_summary();
    let sessions_block = panel("Active Sessions");
    let sessions_area = sessions_block.inner(columns[1]);
    frame.render_widget(sessions_block, columns[1]);
    frame.render_widget(ActiveSessionsWidget::new(&summary), sessions_area);

    let chart = projection.top_pages_chart();
    let pages_block = panel("Top Pages · Last 15 minutes");
    let pages_area = pages_block.inner(bottom);
    frame.render_widget(pages_block, bottom);
    frame.render_widget(TopPagesWidget::new(&chart), pages_area);
}

fn render_footer(frame: &mut Frame, area: Rect, telemetry: &EngineTelemetry) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let keys = Line::from(vec![
        Span::styled(" q", Style::default().fg(Color::Yellow)),
        Span::styled(" quit  ", Style::default().fg(Color::DarkGray)),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::styled(" refresh", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(keys), halves[0]);

    let counters = Line::from(Span::styled(
        format!(
            "{} ok · {} failed · up {} ",
            telemetry.fetches_succeeded,
            telemetry.fetches_failed,
            telemetry.uptime_human()
        ),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(
        Paragraph::new(counters).alignment(Alignment::Right),
        halves[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::buffer_text;
    use chrono::TimeZone;
    use pulseboard::snapshot::MetricsSnapshot;
    use pulseboard::sync::SyncStatus;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    fn draw(projection: &Projection) -> String {
        let telemetry = EngineTelemetry::default();
        let view = DashboardView {
            projection,
            telemetry: &telemetry,
            source: "http://localhost:8080/api/metrics",
            refresh_interval: Duration::from_secs(30),
            now: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 5).unwrap(),
            spinner: '◐',
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| render_dashboard(frame, &view))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_first_load_shows_loading() {
        let projection = Projection {
            is_loading: true,
            status: SyncStatus::Fetching,
            ..Default::default()
        };
        let screen = draw(&projection);

        assert!(screen.contains("Loading metrics..."));
        assert!(!screen.contains("Active Users"));
    }

    #[test]
    fn test_panels_with_data() {
        let snapshot = MetricsSnapshot::from_json(
            br#"{
                "activeUsersCount": 42,
                "topPages": [{"url": "/home", "viewCount": 10}],
                "activeSessionsByUser": {"alice": 2},
                "timestamp": "2024-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();
        let projection = Projection {
            snapshot: Some(Arc::new(snapshot)),
            last_updated: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 1).unwrap()),
            ..Default::default()
        };
        let screen = draw(&projection);

        assert!(screen.contains("Pulseboard"));
        assert!(screen.contains("Active Users"));
        assert!(screen.contains("42"));
        assert!(screen.contains("2 sessions across 1 user"));
        assert!(screen.contains("/home"));
        assert!(screen.contains("(4s ago)"));
        assert!(!screen.contains("Loading metrics..."));
    }
}
