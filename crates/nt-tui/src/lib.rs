//! nt-tui: terminal frontend for Neon Twilight
//!
//! Implements the client's viewport, event source and storage on top of
//! ratatui, crossterm and the filesystem.

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod storage;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use config::TuiConfig;
pub use error::TuiError;
pub use input::{CrosstermEvents, InputState};
pub use storage::{FileStorage, default_save_dir};
pub use terminal::TerminalViewport;
pub use theme::Theme;
