//! Input handling - convert keys to commands
//!
//! Two disjoint kinds come out of the dispatcher: [`SimCommand`]s go to the
//! simulation, [`UiAction`]s never leave the client.

use strum::{Display, EnumIter};

use crate::viewport::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// How long to wait from the rest menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum WaitType {
    #[strum(to_string = "5 minutes")]
    Minutes5,
    #[strum(to_string = "30 minutes")]
    Minutes30,
    #[strum(to_string = "1 hour")]
    Hour1,
    #[strum(to_string = "2 hours")]
    Hour2,
    #[strum(to_string = "Till dusk")]
    TillDusk,
}

/// Commands forwarded to the simulation's per-turn channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimCommand {
    Move(Direction),
    GetItem,
    Rest,
    Wait(WaitType),
}

impl SimCommand {
    pub fn is_movement(&self) -> bool {
        matches!(self, SimCommand::Move(_))
    }
}

/// Actions handled entirely by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiAction {
    ToggleInventory,
    ToggleViewList,
    /// Open-only; closed with escape.
    OpenLogHistory,
    OpenRestMenu,
    OpenConsole,
    CloseOverlay,
    /// Out-of-band save through persistent storage.
    SaveGame,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Sim(SimCommand),
    Ui(UiAction),
}

/// Convert a key to a command.
///
/// `modifier` tells whether a shift-like key is held at the same time; it
/// turns `l` (move right) into "open log history" and `r` (wait menu) into
/// "rest".
pub fn dispatch(key: Key, modifier: bool) -> Option<Command> {
    use Command::{Sim, Ui};

    match key {
        // Arrow keys
        Key::Left => Some(Sim(SimCommand::Move(Direction::Left))),
        Key::Right => Some(Sim(SimCommand::Move(Direction::Right))),
        Key::Up => Some(Sim(SimCommand::Move(Direction::Up))),
        Key::Down => Some(Sim(SimCommand::Move(Direction::Down))),

        Key::Escape => Some(Ui(UiAction::CloseOverlay)),

        // Vi keys, with the two modifier-dependent bindings
        Key::Char('h') => Some(Sim(SimCommand::Move(Direction::Left))),
        Key::Char('j') => Some(Sim(SimCommand::Move(Direction::Down))),
        Key::Char('k') => Some(Sim(SimCommand::Move(Direction::Up))),
        Key::Char('l') if modifier => Some(Ui(UiAction::OpenLogHistory)),
        Key::Char('l') => Some(Sim(SimCommand::Move(Direction::Right))),

        Key::Char('r') if modifier => Some(Sim(SimCommand::Rest)),
        Key::Char('r') => Some(Ui(UiAction::OpenRestMenu)),

        Key::Char('g') => Some(Sim(SimCommand::GetItem)),                // g : get item
        Key::Char('i') => Some(Ui(UiAction::ToggleInventory)),           // i : inventory
        Key::Char('v') => Some(Ui(UiAction::ToggleViewList)),            // v : what's in view
        Key::Char('s') => Some(Ui(UiAction::SaveGame)),                  // s : save
        Key::Char('`') => Some(Ui(UiAction::OpenConsole)),               // ` : debug console
        Key::Char('q') if modifier => Some(Ui(UiAction::Quit)),          // Q : quit

        _ => None,
    }
}
