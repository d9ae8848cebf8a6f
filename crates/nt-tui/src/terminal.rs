//! The terminal as a client viewport
//!
//! Glyphs, panels and status lines are collected between `clear` and
//! `flush`, then drawn in one ratatui frame. The map fills the terminal
//! apart from the status area at the bottom.

use std::rc::Rc;

use nt_client::camera::ScreenPos;
use nt_client::{Glyph, Key, Panel, Viewport, ViewportError};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::{Rect, Size};
use ratatui::style::Style;
use ratatui::widgets::Paragraph;
use tracing::debug;

use crate::input::InputState;
use crate::theme::Theme;
use crate::widgets::{MapWidget, PanelWidget, StatusWidget, panel_area};

/// Smallest terminal the game starts in.
pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 8;

pub struct TerminalViewport<B: Backend> {
    terminal: Terminal<B>,
    theme: Theme,
    input: Rc<InputState>,
    /// Status area rows: border, area description and messages.
    status_rows: u16,
    /// Map size the current frame was started with.
    frame_size: (u16, u16),
    cells: Vec<Option<Glyph>>,
    panels: Vec<Panel>,
    status: Vec<String>,
}

impl<B: Backend> TerminalViewport<B> {
    /// Wrap `terminal`, with room for `status_lines` messages under the map.
    pub fn new(
        terminal: Terminal<B>,
        theme: Theme,
        input: Rc<InputState>,
        status_lines: usize,
    ) -> Result<Self, ViewportError> {
        let size = terminal.size()?;
        if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
            return Err(ViewportError::TooSmall {
                width: size.width,
                height: size.height,
            });
        }
        let status_rows = (status_lines.min(u16::MAX as usize - 2) as u16) + 2;
        let viewport = Self {
            terminal,
            theme,
            input,
            status_rows,
            frame_size: (0, 0),
            cells: Vec::new(),
            panels: Vec::new(),
            status: Vec::new(),
        };
        let (width, height) = viewport.map_size(size);
        viewport.input.set_map_size(width, height);
        Ok(viewport)
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn into_terminal(self) -> Terminal<B> {
        self.terminal
    }

    fn map_size(&self, size: Size) -> (u16, u16) {
        (size.width, size.height.saturating_sub(self.status_rows))
    }
}

impl<B: Backend> Viewport for TerminalViewport<B> {
    fn dimensions(&self) -> (u16, u16) {
        match self.terminal.size() {
            Ok(size) => {
                let (width, height) = self.map_size(size);
                self.input.set_map_size(width, height);
                (width, height)
            }
            Err(_) => self.input.map_size(),
        }
    }

    fn clear(&mut self) {
        self.frame_size = self.dimensions();
        let (width, height) = self.frame_size;
        self.cells.clear();
        self.cells.resize(width as usize * height as usize, None);
        self.panels.clear();
        self.status.clear();
    }

    fn put(&mut self, pos: ScreenPos, glyph: Glyph) {
        let (width, height) = self.frame_size;
        if pos.x < 0 || pos.y < 0 || pos.x >= width as i32 || pos.y >= height as i32 {
            return;
        }
        let index = pos.y as usize * width as usize + pos.x as usize;
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Some(glyph);
        }
    }

    fn panel(&mut self, panel: &Panel) {
        self.panels.push(panel.clone());
    }

    fn status(&mut self, lines: &[String]) {
        self.status = lines.to_vec();
    }

    fn flush(&mut self) -> Result<(), ViewportError> {
        let theme = &self.theme;
        let status_rows = self.status_rows;
        let map_width = self.frame_size.0;
        let cells = self.cells.as_slice();
        let panels = self.panels.as_slice();
        let status = self.status.as_slice();

        self.terminal.draw(|frame| {
            let area = frame.area();
            if area.height <= status_rows || area.width == 0 {
                frame.render_widget(
                    Paragraph::new("Terminal too small").style(Style::default().fg(theme.text)),
                    area,
                );
                return;
            }
            let map_area = Rect::new(area.x, area.y, area.width, area.height - status_rows);
            let status_area = Rect::new(area.x, map_area.bottom(), area.width, status_rows);

            frame.render_widget(MapWidget::new(cells, map_width, theme), map_area);
            frame.render_widget(StatusWidget::new(status, theme), status_area);
            for panel in panels {
                let rect = panel_area(panel, map_area);
                frame.render_widget(PanelWidget::new(panel, theme), rect);
            }
        })?;
        debug!(panels = self.panels.len(), "frame drawn");
        Ok(())
    }

    fn is_held(&self, key: Key) -> bool {
        key == Key::Shift && self.input.shift()
    }
}
