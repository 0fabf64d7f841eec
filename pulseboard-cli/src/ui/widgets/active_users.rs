//! Active users headline widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Big number showing distinct users in the trailing window.
pub struct ActiveUsersWidget {
    count: Option<u64>,
}

impl ActiveUsersWidget {
    pub fn new(count: Option<u64>) -> Self {
        Self { count }
    }
}

impl Widget for ActiveUsersWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let value = match self.count {
            Some(count) => Span::styled(
                count.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("--", Style::default().fg(Color::DarkGray)),
        };

        let text = vec![
            Line::raw(""),
            Line::from(value),
            Line::from(Span::styled(
                "Last 5 minutes",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::buffer_text;

    #[test]
    fn test_renders_count() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ActiveUsersWidget::new(Some(42)).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("42"));
        assert!(text.contains("Last 5 minutes"));
    }

    #[test]
    fn test_renders_placeholder_without_data() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ActiveUsersWidget::new(None).render(area, &mut buf);

        assert!(buffer_text(&buf).contains("--"));
    }
}
