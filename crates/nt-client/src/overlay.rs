//! Modal overlays and input gating
//!
//! Each overlay is either open or closed. Whether a simulation command may
//! go through is decided from this state alone.

use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::command::{SimCommand, UiAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum OverlayKind {
    Inventory,
    Vendor,
    ViewList,
    Description,
    LogHistory,
    Rest,
    CharacterCreation,
    Conversation,
    Console,
}

impl OverlayKind {
    /// While open, movement and action commands are discarded.
    pub const fn is_blocking(self) -> bool {
        matches!(
            self,
            OverlayKind::CharacterCreation
                | OverlayKind::Vendor
                | OverlayKind::LogHistory
                | OverlayKind::Conversation
                | OverlayKind::Inventory
                | OverlayKind::Console
        )
    }

    /// Overlays that take over the keyboard entirely.
    pub const fn captures_keys(self) -> bool {
        matches!(self, OverlayKind::CharacterCreation | OverlayKind::Console)
    }
}

/// Escape closes the first of these that is open.
const ESCAPE_PRIORITY: [OverlayKind; 3] = [
    OverlayKind::Vendor,
    OverlayKind::LogHistory,
    OverlayKind::Conversation,
];

/// Closed by escape only when none of [`ESCAPE_PRIORITY`] is open.
const ESCAPE_FALLBACK: [OverlayKind; 4] = [
    OverlayKind::Console,
    OverlayKind::Rest,
    OverlayKind::Description,
    OverlayKind::ViewList,
];

/// What a UI action did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened(OverlayKind),
    Closed(OverlayKind),
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayStack {
    open: [bool; OverlayKind::COUNT],
}

impl OverlayStack {
    /// Startup state: only character creation is open.
    pub fn new() -> Self {
        let mut stack = Self::all_closed();
        stack.open(OverlayKind::CharacterCreation);
        stack
    }

    pub fn all_closed() -> Self {
        Self {
            open: [false; OverlayKind::COUNT],
        }
    }

    pub fn is_open(&self, kind: OverlayKind) -> bool {
        self.open[kind as usize]
    }

    pub fn open(&mut self, kind: OverlayKind) {
        self.open[kind as usize] = true;
    }

    pub fn close(&mut self, kind: OverlayKind) {
        self.open[kind as usize] = false;
    }

    fn toggle(&mut self, kind: OverlayKind) -> Transition {
        if self.is_open(kind) {
            self.close(kind);
            Transition::Closed(kind)
        } else {
            self.open(kind);
            Transition::Opened(kind)
        }
    }

    /// Open overlays, in declaration order.
    pub fn visible(&self) -> impl Iterator<Item = OverlayKind> + '_ {
        OverlayKind::iter().filter(|k| self.is_open(*k))
    }

    /// First open overlay that suppresses commands.
    pub fn blocking(&self) -> Option<OverlayKind> {
        self.visible().find(|k| k.is_blocking())
    }

    /// Open overlay that owns the keyboard, if any.
    pub fn key_capture(&self) -> Option<OverlayKind> {
        // character creation outranks the console
        [OverlayKind::CharacterCreation, OverlayKind::Console]
            .into_iter()
            .find(|k| self.is_open(*k))
    }

    /// May `command` reach the simulation?
    pub fn allows(&self, command: &SimCommand) -> bool {
        match self.blocking() {
            Some(kind) => {
                debug!(?command, overlay = %kind, "command gated");
                false
            }
            None => true,
        }
    }

    /// Apply an overlay toggle. Actions that are not about overlays leave
    /// the stack alone.
    pub fn apply(&mut self, action: UiAction) -> Transition {
        if self.key_capture().is_some() {
            return Transition::Unchanged;
        }
        match action {
            UiAction::ToggleInventory => {
                if self.is_open(OverlayKind::Vendor) {
                    Transition::Unchanged
                } else {
                    self.toggle(OverlayKind::Inventory)
                }
            }
            UiAction::ToggleViewList => self.toggle(OverlayKind::ViewList),
            UiAction::OpenLogHistory => self.open_if_closed(OverlayKind::LogHistory),
            // both lead to commands, so neither opens over a blocking overlay
            UiAction::OpenRestMenu | UiAction::OpenConsole if self.blocking().is_some() => {
                Transition::Unchanged
            }
            UiAction::OpenRestMenu => self.open_if_closed(OverlayKind::Rest),
            UiAction::OpenConsole => self.open_if_closed(OverlayKind::Console),
            UiAction::CloseOverlay => self.close_on_escape(),
            UiAction::SaveGame | UiAction::Quit => Transition::Unchanged,
        }
    }

    fn open_if_closed(&mut self, kind: OverlayKind) -> Transition {
        if self.is_open(kind) {
            Transition::Unchanged
        } else {
            self.open(kind);
            Transition::Opened(kind)
        }
    }

    /// Escape never closes the inventory or character creation.
    pub fn close_on_escape(&mut self) -> Transition {
        let target = ESCAPE_PRIORITY
            .into_iter()
            .find(|k| self.is_open(*k))
            .or_else(|| ESCAPE_FALLBACK.into_iter().find(|k| self.is_open(*k)));
        match target {
            Some(kind) => {
                self.close(kind);
                Transition::Closed(kind)
            }
            None => Transition::Unchanged,
        }
    }
}

impl Default for OverlayStack {
    fn default() -> Self {
        Self::new()
    }
}
