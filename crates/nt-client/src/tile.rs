//! Map cells to glyphs, through the fog of war

use crate::camera::WorldPos;
use crate::error::ProtocolError;
use crate::glyph::{CellKind, Glyph};
use crate::sim::Simulation;

/// How much of a cell the player knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityTier {
    #[default]
    Hidden,
    /// Seen before, not in view now.
    Seen,
    Visible,
}

impl VisibilityTier {
    pub fn classify(visible: bool, seen: bool) -> Self {
        if visible {
            VisibilityTier::Visible
        } else if seen {
            VisibilityTier::Seen
        } else {
            VisibilityTier::Hidden
        }
    }
}

/// The map's cell codes. Fetched once and again after a load; the client
/// never writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapBuffer {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl MapBuffer {
    pub fn new(width: u32, height: u32, cells: Vec<u8>) -> Result<Self, ProtocolError> {
        if cells.len() != width as usize * height as usize {
            return Err(ProtocolError::MapBufferLength {
                len: cells.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn fetch<S: Simulation + ?Sized>(sim: &S) -> Result<Self, ProtocolError> {
        Self::new(sim.width(), sim.height(), sim.map_cells())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, pos: WorldPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Cell kind at `pos`; `None` off the map or for an unknown code.
    pub fn cell_kind(&self, pos: WorldPos) -> Option<CellKind> {
        if !self.contains(pos) {
            return None;
        }
        let idx = pos.to_index(self.width)?;
        self.cells.get(idx).copied().and_then(CellKind::from_code)
    }

    /// Glyph for `pos` at a known visibility tier.
    pub fn glyph_at(&self, pos: WorldPos, tier: VisibilityTier) -> Glyph {
        let base = match self.cell_kind(pos) {
            Some(kind) => kind.glyph(),
            None => Glyph::NULL,
        };
        match tier {
            VisibilityTier::Visible => base,
            VisibilityTier::Seen => base.dimmed(),
            VisibilityTier::Hidden => Glyph::NULL,
        }
    }
}

/// Visibility tier of a cell according to the simulation.
pub fn tier_at<S: Simulation + ?Sized>(sim: &S, pos: WorldPos) -> VisibilityTier {
    VisibilityTier::classify(sim.is_visible(pos.x, pos.y), sim.is_seen(pos.x, pos.y))
}

/// Glyph to draw for map cell `pos`. Never fails: anything unknown is the
/// null glyph.
pub fn render_tile<S: Simulation + ?Sized>(map: &MapBuffer, sim: &S, pos: WorldPos) -> Glyph {
    if !map.contains(pos) {
        return Glyph::NULL;
    }
    map.glyph_at(pos, tier_at(sim, pos))
}
