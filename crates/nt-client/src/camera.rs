//! World/screen coordinate mapping
//!
//! The player is pinned to the viewport center; everything else is placed
//! relative to it.

use std::ops::{Add, Sub};

/// A cell in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WorldPos {
    pub x: i32,
    pub y: i32,
}

/// A cell in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

impl WorldPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Row-major index into a map of the given width.
    pub fn to_index(self, width: u32) -> Option<usize> {
        if self.x < 0 || self.y < 0 || self.x >= width as i32 {
            return None;
        }
        Some(self.y as usize * width as usize + self.x as usize)
    }

    pub fn from_index(index: usize, width: u32) -> Self {
        let width = width.max(1) as usize;
        Self::new((index % width) as i32, (index / width) as i32)
    }
}

impl ScreenPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add<(i32, i32)> for WorldPos {
    type Output = WorldPos;

    fn add(self, (dx, dy): (i32, i32)) -> WorldPos {
        WorldPos::new(self.x + dx, self.y + dy)
    }
}

impl Sub for WorldPos {
    type Output = (i32, i32);

    fn sub(self, other: WorldPos) -> (i32, i32) {
        (self.x - other.x, self.y - other.y)
    }
}

/// Camera for one frame: where the player is and where the center is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub player: WorldPos,
    pub center: ScreenPos,
}

impl Camera {
    pub fn new(player: WorldPos, center: ScreenPos) -> Self {
        Self { player, center }
    }

    /// Center a camera in a viewport of `width`x`height` cells.
    pub fn centered(player: WorldPos, width: u16, height: u16) -> Self {
        Self::new(player, ScreenPos::new(width as i32 / 2, height as i32 / 2))
    }

    pub fn to_screen(&self, world: WorldPos) -> ScreenPos {
        ScreenPos::new(
            world.x - self.player.x + self.center.x,
            world.y - self.player.y + self.center.y,
        )
    }

    pub fn to_world(&self, screen: ScreenPos) -> WorldPos {
        WorldPos::new(
            screen.x + self.player.x - self.center.x,
            screen.y + self.player.y - self.center.y,
        )
    }

    /// Offset subtracted from world coordinates to get screen coordinates
    /// (the world position of the top-left screen cell).
    pub fn offset(&self) -> (i32, i32) {
        (self.player.x - self.center.x, self.player.y - self.center.y)
    }
}
