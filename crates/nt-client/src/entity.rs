//! Entity draw buffer decoding
//!
//! The simulation hands over a flat buffer where every 3 slots are one
//! `(x, y, glyph)` record. Records are turned into screen-space glyphs, with
//! actors tinted by faction.

use tracing::warn;

use crate::camera::{Camera, ScreenPos, WorldPos};
use crate::error::ProtocolError;
use crate::glyph::{DEFAULT_ENTITY_GLYPH, EntityGlyph, Glyph, faction_tint};

/// One record of the entity buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDrawRecord {
    pub world: WorldPos,
    pub glyph_code: i32,
}

/// A decoded entity ready to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDraw {
    pub world: WorldPos,
    pub screen: ScreenPos,
    pub glyph: Glyph,
}

/// Split the buffer into records. A length that is not a multiple of 3 is
/// rejected before anything is emitted.
pub fn decode(buffer: &[i32]) -> Result<Vec<EntityDrawRecord>, ProtocolError> {
    if buffer.len() % 3 != 0 {
        return Err(ProtocolError::EntityBufferLength { len: buffer.len() });
    }
    Ok(buffer
        .chunks_exact(3)
        .map(|rec| EntityDrawRecord {
            world: WorldPos::new(rec[0], rec[1]),
            glyph_code: rec[2],
        })
        .collect())
}

/// Resolves records to glyphs and keeps count of palette misses.
#[derive(Debug, Default)]
pub struct EntityDecoder {
    unknown_glyphs: u64,
}

impl EntityDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records seen so far whose glyph code is not in the palette.
    pub fn unknown_glyphs(&self) -> u64 {
        self.unknown_glyphs
    }

    /// Base glyph for a code. Unknown codes fall back to the default glyph.
    pub fn glyph_for(&mut self, code: i32) -> (Option<EntityGlyph>, Glyph) {
        match EntityGlyph::from_code(code) {
            Some(kind) => (Some(kind), kind.glyph()),
            None => {
                self.unknown_glyphs += 1;
                warn!(code, total = self.unknown_glyphs, "unknown entity glyph code");
                (None, DEFAULT_ENTITY_GLYPH)
            }
        }
    }

    /// Decode a whole buffer into screen-space draws, in buffer order.
    pub fn decode_draws<F>(
        &mut self,
        buffer: &[i32],
        camera: &Camera,
        faction_at: F,
    ) -> Result<Vec<EntityDraw>, ProtocolError>
    where
        F: Fn(WorldPos) -> u8,
    {
        let records = decode(buffer)?;
        Ok(records
            .into_iter()
            .map(|rec| {
                let (kind, mut glyph) = self.glyph_for(rec.glyph_code);
                if kind.is_some_and(EntityGlyph::is_faction_capable) {
                    if let Some(tint) = faction_tint(faction_at(rec.world)) {
                        glyph.bg = Some(tint);
                    }
                }
                EntityDraw {
                    world: rec.world,
                    screen: camera.to_screen(rec.world),
                    glyph,
                }
            })
            .collect())
    }
}
