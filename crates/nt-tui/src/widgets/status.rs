//! Status area under the map

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::theme::Theme;

pub struct StatusWidget<'a> {
    lines: &'a [String],
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(lines: &'a [String], theme: &'a Theme) -> Self {
        Self { lines, theme }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(self.theme.text_dim));
        let text: Vec<Line> = self
            .lines
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect();
        Paragraph::new(text)
            .style(Style::default().fg(self.theme.status_text))
            .block(block)
            .render(area, buf);
    }
}
