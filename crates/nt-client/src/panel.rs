//! Overlay contents and their panel rendering
//!
//! Lists are queried from the simulation when an overlay opens and kept
//! until it opens again. Panels are plain data; the frontend decides how a
//! panel looks.

use strum::IntoEnumIterator;

use crate::chargen::CharacterCreation;
use crate::command::WaitType;
use crate::messages::MessageLog;
use crate::overlay::OverlayKind;
use crate::sim::{ItemId, Simulation};

/// Digit labels for menu entries, in order.
pub const MENU_KEYS: [char; 10] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

/// Menu slot selected by a digit key.
pub fn menu_slot(key: char) -> Option<usize> {
    MENU_KEYS.iter().position(|&k| k == key)
}

/// What the vendor sells, and for how much.
pub const VENDOR_STOCK: [(&str, f32); 2] = [("Protein shake", 5.0), ("Medkit", 15.0)];

/// One row of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLine {
    /// Key that selects this row, if any.
    pub key: Option<char>,
    pub text: String,
    /// Cursor row or otherwise emphasized.
    pub highlight: bool,
}

impl PanelLine {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            key: None,
            text: text.into(),
            highlight: false,
        }
    }

    pub fn entry(key: char, text: impl Into<String>) -> Self {
        Self {
            key: Some(key),
            text: text.into(),
            highlight: false,
        }
    }

    pub fn highlighted(mut self, on: bool) -> Self {
        self.highlight = on;
        self
    }
}

/// A modal panel as handed to the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub kind: OverlayKind,
    pub title: String,
    pub lines: Vec<PanelLine>,
    pub footer: String,
}

/// What picking an inventory entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventoryMode {
    #[default]
    Use,
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub id: ItemId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversation {
    pub text: String,
    pub answers: Vec<String>,
}

/// Everything the overlays display.
#[derive(Debug, Clone, Default)]
pub struct OverlayContents {
    pub inventory: Vec<InventoryEntry>,
    pub inventory_mode: InventoryMode,
    pub view_list: Vec<String>,
    pub description: String,
    pub area_description: String,
    pub conversation: Conversation,
    pub console_input: String,
    pub character: CharacterCreation,
}

impl OverlayContents {
    /// Re-query the inventory list.
    pub fn refresh_inventory<S: Simulation + ?Sized>(&mut self, sim: &S) {
        self.inventory = sim
            .inventory_items()
            .into_iter()
            .map(|id| InventoryEntry {
                id,
                name: sim.inventory_name(id),
            })
            .collect();
    }

    /// Re-query what is in view.
    pub fn refresh_view_list<S: Simulation + ?Sized>(&mut self, sim: &S) {
        self.view_list = sim
            .view_list()
            .into_iter()
            .map(|id| sim.view_string(id))
            .collect();
    }

    pub fn panel(&self, kind: OverlayKind, log: &MessageLog) -> Panel {
        match kind {
            OverlayKind::Inventory => self.inventory_panel(),
            OverlayKind::Vendor => vendor_panel(),
            OverlayKind::ViewList => self.view_list_panel(),
            OverlayKind::Description => Panel {
                kind,
                title: "Description".into(),
                lines: self.description.lines().map(PanelLine::text).collect(),
                footer: "Release to close".into(),
            },
            OverlayKind::LogHistory => Panel {
                kind,
                title: "Message log".into(),
                lines: log.iter().map(|m| PanelLine::text(m.as_str())).collect(),
                footer: "ESC to close".into(),
            },
            OverlayKind::Rest => rest_panel(),
            OverlayKind::CharacterCreation => self.character_panel(),
            OverlayKind::Conversation => self.conversation_panel(),
            OverlayKind::Console => Panel {
                kind,
                title: "Console".into(),
                lines: vec![PanelLine::text(format!("> {}_", self.console_input))],
                footer: "ENTER to run, ESC to cancel".into(),
            },
        }
    }

    fn inventory_panel(&self) -> Panel {
        let verb = match self.inventory_mode {
            InventoryMode::Use => "use",
            InventoryMode::Drop => "drop",
        };
        let (lines, footer) = if self.inventory.is_empty() {
            (
                vec![PanelLine::text("Your inventory is empty.")],
                "Press I again to cancel.".to_string(),
            )
        } else {
            let mut lines: Vec<PanelLine> = self
                .inventory
                .iter()
                .zip(MENU_KEYS)
                .map(|(item, key)| PanelLine::entry(key, item.name.as_str()))
                .collect();
            if self.inventory.len() > MENU_KEYS.len() {
                lines.push(PanelLine::text(format!(
                    "...and {} more",
                    self.inventory.len() - MENU_KEYS.len()
                )));
            }
            (
                lines,
                format!("Select an item to {verb} it, X to switch, or I again to cancel."),
            )
        };
        Panel {
            kind: OverlayKind::Inventory,
            title: "Inventory".into(),
            lines,
            footer,
        }
    }

    fn view_list_panel(&self) -> Panel {
        let lines = if self.view_list.is_empty() {
            vec![PanelLine::text("You see nothing of interest.")]
        } else {
            self.view_list.iter().map(|s| PanelLine::text(s.as_str())).collect()
        };
        Panel {
            kind: OverlayKind::ViewList,
            title: "In view".into(),
            lines,
            footer: "V to close".into(),
        }
    }

    fn character_panel(&self) -> Panel {
        let cursor = self.character.cursor();
        let lines = self
            .character
            .lines()
            .into_iter()
            .enumerate()
            .map(|(line, (attr, value))| {
                let value = value.map_or_else(|| "--".to_string(), |v| v.to_string());
                PanelLine::text(format!("{attr:<13} {value:>2}")).highlighted(line == cursor)
            })
            .collect();
        let footer = if self.character.is_complete() {
            "ENTER to begin"
        } else {
            "UP/DOWN select, LEFT/RIGHT assign 15 14 13 12 10 8"
        };
        Panel {
            kind: OverlayKind::CharacterCreation,
            title: "Create your character".into(),
            lines,
            footer: footer.into(),
        }
    }

    fn conversation_panel(&self) -> Panel {
        let mut lines = vec![PanelLine::text(self.conversation.text.as_str())];
        lines.extend(
            self.conversation
                .answers
                .iter()
                .zip(MENU_KEYS)
                .map(|(answer, key)| PanelLine::entry(key, answer.as_str())),
        );
        Panel {
            kind: OverlayKind::Conversation,
            title: "Conversation".into(),
            lines,
            footer: "Pick an answer, ESC to leave".into(),
        }
    }
}

fn vendor_panel() -> Panel {
    Panel {
        kind: OverlayKind::Vendor,
        title: "Vendor".into(),
        lines: VENDOR_STOCK
            .iter()
            .zip(MENU_KEYS)
            .map(|((name, price), key)| PanelLine::entry(key, format!("{name} - ${price:.2}")))
            .collect(),
        footer: "Pick something to buy, ESC to leave".into(),
    }
}

/// Durations offered by the rest menu, in menu order.
pub fn wait_options() -> Vec<WaitType> {
    WaitType::iter().collect()
}

fn rest_panel() -> Panel {
    Panel {
        kind: OverlayKind::Rest,
        title: "Wait".into(),
        lines: wait_options()
            .into_iter()
            .zip(MENU_KEYS)
            .map(|(wait, key)| PanelLine::entry(key, wait.to_string()))
            .collect(),
        footer: "Pick how long to wait, ESC to cancel".into(),
    }
}
