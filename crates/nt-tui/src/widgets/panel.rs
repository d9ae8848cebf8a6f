//! Overlay panel widget

use nt_client::{OverlayKind, Panel};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Widget};

use crate::theme::Theme;

/// A popup: cleared background, bordered block, one list row per line.
pub struct PanelWidget<'a> {
    panel: &'a Panel,
    theme: &'a Theme,
}

impl<'a> PanelWidget<'a> {
    pub fn new(panel: &'a Panel, theme: &'a Theme) -> Self {
        Self { panel, theme }
    }
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let mut block = Block::default()
            .title(format!(" {} ", self.panel.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.panel_border(self.panel.kind)));
        if !self.panel.footer.is_empty() {
            block = block.title_bottom(
                Line::from(format!(" {} ", self.panel.footer)).style(Style::default().fg(theme.text_dim)),
            );
        }

        let items: Vec<ListItem> = self
            .panel
            .lines
            .iter()
            .map(|line| {
                let mut spans = Vec::with_capacity(2);
                if let Some(key) = line.key {
                    spans.push(Span::styled(format!("{key}) "), Style::default().fg(theme.key)));
                }
                let style = if line.highlight {
                    theme.highlight_style()
                } else {
                    Style::default().fg(theme.text)
                };
                spans.push(Span::styled(line.text.as_str(), style));
                ListItem::new(Line::from(spans))
            })
            .collect();

        Clear.render(area, buf);
        Widget::render(List::new(items).block(block), area, buf);
    }
}

/// Where a panel goes inside the map area.
///
/// Descriptions sit along the top edge and the view list along the right,
/// so both stay readable next to a centered menu.
pub fn panel_area(panel: &Panel, area: Rect) -> Rect {
    let content_width = panel
        .lines
        .iter()
        .map(|l| l.text.chars().count() + if l.key.is_some() { 3 } else { 0 })
        .chain([panel.title.chars().count() + 2, panel.footer.chars().count() + 2])
        .max()
        .unwrap_or(0) as u16;
    let width = content_width.saturating_add(2).min(area.width);
    let height = (panel.lines.len() as u16).saturating_add(2).min(area.height);

    match panel.kind {
        OverlayKind::Description => Rect::new(area.x, area.y, area.width, height),
        OverlayKind::ViewList => Rect::new(area.right().saturating_sub(width), area.y, width, height),
        OverlayKind::LogHistory => centered_rect(80, 80, area),
        _ => sized_rect(width, height, area),
    }
}

/// Rectangle of the given size centered in `r`.
fn sized_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

/// Rectangle covering the given percentages of `r`, centered.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
