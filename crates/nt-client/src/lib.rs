//! nt-client: client controller for Neon Twilight
//!
//! Keeps a character-grid viewport in sync with an external turn-based
//! simulation. The simulation, the terminal and persistent storage are all
//! reached through traits, so this crate does no I/O of its own.

pub mod automove;
pub mod camera;
pub mod chargen;
pub mod command;
pub mod config;
pub mod controller;
pub mod driver;
pub mod entity;
pub mod error;
pub mod glyph;
pub mod messages;
pub mod overlay;
pub mod panel;
pub mod render;
pub mod sim;
pub mod storage;
pub mod tile;
pub mod viewport;

#[cfg(test)]
mod testing;

pub use camera::{Camera, ScreenPos, WorldPos};
pub use command::{Command, Direction, SimCommand, UiAction, WaitType};
pub use config::ClientConfig;
pub use controller::{ClientControllerState, Controller};
pub use driver::FrameDriver;
pub use entity::{EntityDecoder, EntityDraw, EntityDrawRecord};
pub use error::{ClientError, ProtocolError, StorageError, ViewportError};
pub use glyph::{Glyph, Rgb};
pub use overlay::{OverlayKind, OverlayStack};
pub use panel::{Panel, PanelLine};
pub use sim::{SimEvent, Simulation};
pub use storage::{MemoryStorage, Storage, StorageOp};
pub use tile::{MapBuffer, VisibilityTier, render_tile};
pub use viewport::{EventSource, InputEvent, Key, PointerButton, Viewport};
