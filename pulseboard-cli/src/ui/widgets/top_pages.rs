//! Top pages bar chart widget.
//!
//! ```text
//! /home            ████████████████████    10
//! /pricing         ████████                 4
//! ```
//!
//! Bars are scaled against the largest value and keep the order the
//! service delivered.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use pulseboard::snapshot::TopPagesChart;

const BAR_FULL: char = '█';

/// Room reserved for the count column.
const VALUE_WIDTH: usize = 7;

/// Widget displaying per-page view counts as horizontal bars.
pub struct TopPagesWidget<'a> {
    chart: &'a TopPagesChart,
}

impl<'a> TopPagesWidget<'a> {
    pub fn new(chart: &'a TopPagesChart) -> Self {
        Self { chart }
    }

    /// Bar length for `value` when `max` fills `width` cells.
    fn bar_len(value: u64, max: u64, width: usize) -> usize {
        if max == 0 || width == 0 {
            return 0;
        }
        let len = (value as u128 * width as u128 / max as u128) as usize;
        // Non-zero values always get at least one cell
        if value > 0 {
            len.max(1)
        } else {
            0
        }
    }

    fn truncate(label: &str, width: usize) -> String {
        if label.chars().count() <= width {
            return label.to_string();
        }
        let mut out: String = label.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

impl Widget for TopPagesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.chart.is_empty() {
            let placeholder = Line::from(Span::styled(
                "No page views in the last 15 minutes",
                Style::default().fg(Color::DarkGray),
            ));
            Paragraph::new(placeholder).render(area, buf);
            return;
        }

        let width = area.width as usize;
        let longest = self
            .chart
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let label_width = longest.min(width / 2).max(1);
        let bar_width = width.saturating_sub(label_width + VALUE_WIDTH + 2);
        let max = self.chart.max_value();

        let rows = self
            .chart
            .labels
            .iter()
            .zip(&self.chart.values)
            .take(area.height as usize);

        for (i, (label, &value)) in rows.enumerate() {
            let row_area = Rect {
                x: area.x,
                y: area.y + i as u16,
                width: area.width,
                height: 1,
            };

            let bar = BAR_FULL.to_string().repeat(Self::bar_len(value, max, bar_width));
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<width$} ", Self::truncate(label, label_width), width = label_width),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<width$}", bar, width = bar_width),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!(" {:>width$}", value, width = VALUE_WIDTH),
                    Style::default().fg(Color::Yellow),
                ),
            ]);

            Paragraph::new(line).render(row_area, buf);
        }
    }
}
