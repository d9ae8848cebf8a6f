//! ratatui widgets for the map, overlay panels and the status area

pub mod map;
pub mod panel;
pub mod status;

pub use map::MapWidget;
pub use panel::{PanelWidget, panel_area};
pub use status::StatusWidget;
