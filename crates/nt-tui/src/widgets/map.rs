//! Map display widget

use nt_client::Glyph;
use ratatui::prelude::*;
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Draws a row-major grid of glyphs. `None` cells are left blank.
pub struct MapWidget<'a> {
    cells: &'a [Option<Glyph>],
    width: u16,
    theme: &'a Theme,
}

impl<'a> MapWidget<'a> {
    pub fn new(cells: &'a [Option<Glyph>], width: u16, theme: &'a Theme) -> Self {
        Self { cells, width, theme }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.width == 0 {
            return;
        }
        for (index, cell) in self.cells.iter().enumerate() {
            let Some(glyph) = cell else { continue };
            let x = (index % self.width as usize) as u16;
            let y = (index / self.width as usize) as u16;
            if x >= area.width || y >= area.height {
                continue;
            }
            if let Some(target) = buf.cell_mut(Position::new(area.x + x, area.y + y)) {
                target.set_char(glyph.ch).set_style(self.theme.glyph_style(*glyph));
            }
        }
    }
}
