//! Active sessions widget.
//!
//! ```text
//! 5 sessions across 2 users
//! bob                 3
//! alice               2
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use pulseboard::snapshot::SessionSummary;

use crate::ui::dashboard::utils::session_line;

/// Session total and per-user ranking.
pub struct ActiveSessionsWidget<'a> {
    summary: &'a SessionSummary,
}

impl<'a> ActiveSessionsWidget<'a> {
    pub fn new(summary: &'a SessionSummary) -> Self {
        Self { summary }
    }
}

impl Widget for ActiveSessionsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.summary.is_empty() {
            let placeholder = Line::from(Span::styled(
                session_line(self.summary),
                Style::default().fg(Color::DarkGray),
            ));
            Paragraph::new(placeholder).render(area, buf);
            return;
        }

        let name_width = (area.width as usize).saturating_sub(8).max(4);
        let mut lines = vec![Line::from(Span::styled(
            session_line(self.summary),
            Style::default().fg(Color::White),
        ))];

        // Header line takes the first row
        let rows = (area.height as usize).saturating_sub(1);
        for user in self.summary.ranking.iter().take(rows) {
            let mut name = user.user_id.clone();
            if name.chars().count() > name_width {
                name = name.chars().take(name_width.saturating_sub(1)).collect();
                name.push('…');
            }
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<width$}", name, width = name_width),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:>6}", user.sessions),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }

        Paragraph::new(lines).render(area, buf);
    }
}
