//! One frame, from simulation state to viewport
//!
//! Draw order: map tiles, entities in buffer order, the cursor highlight,
//! the player at the center, overlay panels, status lines. The frame is
//! flushed once at the end.

use crate::camera::{Camera, ScreenPos};
use crate::controller::ClientControllerState;
use crate::error::ClientError;
use crate::glyph::{Glyph, Rgb};
use crate::sim::Simulation;
use crate::tile::render_tile;
use crate::viewport::Viewport;

/// Background of the cell under the pointer.
pub const CURSOR_BG: Rgb = Rgb(60, 60, 160);

/// What ended up on each screen cell before the highlight and the player.
struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Glyph>,
}

impl Grid {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![Glyph::NULL; width as usize * height as usize],
        }
    }

    fn index(&self, pos: ScreenPos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some((pos.y * self.width + pos.x) as usize)
    }

    fn set(&mut self, pos: ScreenPos, glyph: Glyph) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = glyph;
        }
    }

    fn get(&self, pos: ScreenPos) -> Option<Glyph> {
        self.index(pos).map(|idx| self.cells[idx])
    }
}

pub(crate) fn render_frame<S, V>(
    state: &mut ClientControllerState,
    sim: &S,
    viewport: &mut V,
) -> Result<(), ClientError>
where
    S: Simulation + ?Sized,
    V: Viewport + ?Sized,
{
    let (width, height) = viewport.dimensions();
    let camera = Camera::centered(sim.player(), width, height);

    // a bad buffer fails the frame before anything is drawn
    let draws = state
        .decoder
        .decode_draws(&sim.entity_buffer(), &camera, |pos| sim.faction_at(pos))?;

    viewport.clear();
    let mut grid = Grid::new(width, height);

    for y in 0..grid.height {
        for x in 0..grid.width {
            let screen = ScreenPos::new(x, y);
            let glyph = render_tile(&state.map, sim, camera.to_world(screen));
            if !glyph.is_null() {
                grid.set(screen, glyph);
                viewport.put(screen, glyph);
            }
        }
    }

    for draw in &draws {
        grid.set(draw.screen, draw.glyph);
        viewport.put(draw.screen, draw.glyph);
    }

    if let Some(pointer) = state.pointer {
        if let Some(under) = grid.get(pointer) {
            viewport.put(pointer, Glyph { bg: Some(CURSOR_BG), ..under });
        }
    }

    viewport.put(camera.center, Glyph::PLAYER);

    for kind in state.overlays.visible() {
        viewport.panel(&state.contents.panel(kind, &state.messages));
    }
    viewport.status(&state.status_lines());

    viewport.flush()?;
    Ok(())
}
