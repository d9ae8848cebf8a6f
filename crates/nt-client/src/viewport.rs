//! Drawing surface and input source interfaces
//!
//! Implemented by a frontend (the terminal UI in `nt-tui`, a recording fake
//! in tests).

use std::time::Duration;

use crate::camera::ScreenPos;
use crate::error::ViewportError;
use crate::glyph::Glyph;
use crate::panel::Panel;

/// A physical key, independent of the frontend's key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
    Backspace,
    /// Shift-like modifier. Only ever asked about through
    /// [`Viewport::is_held`].
    Shift,
    /// A printable key, always lowercase for letters.
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Raw input, as delivered to the controller's single entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    PointerDown { pos: ScreenPos, button: PointerButton },
    PointerMove { pos: ScreenPos },
    PointerUp { pos: ScreenPos },
    /// Viewport changed size; the next frame picks it up.
    Resize,
}

/// Character-grid drawing surface.
pub trait Viewport {
    /// Map area in cells (width, height).
    fn dimensions(&self) -> (u16, u16);

    /// Start a new frame.
    fn clear(&mut self);

    /// Place a glyph on a map cell. Cells outside the map area are ignored.
    fn put(&mut self, pos: ScreenPos, glyph: Glyph);

    /// Draw a modal panel on top of the map.
    fn panel(&mut self, panel: &Panel);

    /// Lines shown below the map (latest messages, hints).
    fn status(&mut self, lines: &[String]);

    /// Present the frame.
    fn flush(&mut self) -> Result<(), ViewportError>;

    /// Is `key` held right now? Used for modifier checks.
    fn is_held(&self, key: Key) -> bool;
}

/// Source of raw input events.
pub trait EventSource {
    /// Wait up to `timeout` for the next event.
    fn poll(&mut self, timeout: Duration) -> Result<Option<InputEvent>, ViewportError>;
}
