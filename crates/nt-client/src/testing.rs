//! Recording fakes shared by the unit tests

use std::collections::{HashMap, HashSet};

use crate::camera::{ScreenPos, WorldPos};
use crate::command::SimCommand;
use crate::error::ViewportError;
use crate::glyph::Glyph;
use crate::panel::Panel;
use crate::sim::{EntityId, ItemId, NO_FACTION, SimEvent, Simulation};
use crate::viewport::{Key, Viewport};

/// A mutation the fake simulation received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Process(SimCommand),
    MoveBy(i32, i32),
    RequestPath(WorldPos),
    AdvanceAutomove,
    UseItem(ItemId),
    DropItem(ItemId),
    GiveItem(String),
    ChangeMoney(f32),
    SetStats(Vec<i32>),
    Console(String),
    Load(String),
}

/// Open field, everything visible unless listed otherwise.
#[derive(Debug, Clone)]
pub struct FakeSim {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<u8>,
    pub player: WorldPos,
    pub hidden: HashSet<(i32, i32)>,
    pub seen_only: HashSet<(i32, i32)>,
    pub entities: Vec<i32>,
    pub factions: HashMap<(i32, i32), u8>,
    pub inventory: Vec<(ItemId, String)>,
    pub in_view: Vec<(EntityId, String)>,
    pub path: Vec<usize>,
    pub events: Vec<SimEvent>,
    pub blob: String,
    pub calls: Vec<Call>,
}

impl FakeSim {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![0; (width * height) as usize],
            player: WorldPos::new(0, 0),
            hidden: HashSet::new(),
            seen_only: HashSet::new(),
            entities: Vec::new(),
            factions: HashMap::new(),
            inventory: Vec::new(),
            in_view: Vec::new(),
            path: Vec::new(),
            events: Vec::new(),
            blob: "fake-save".to_string(),
            calls: Vec::new(),
        }
    }
}

impl Simulation for FakeSim {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn map_cells(&self) -> Vec<u8> {
        self.cells.clone()
    }

    fn player(&self) -> WorldPos {
        self.player
    }

    fn is_visible(&self, x: i32, y: i32) -> bool {
        !self.hidden.contains(&(x, y)) && !self.seen_only.contains(&(x, y))
    }

    fn is_seen(&self, x: i32, y: i32) -> bool {
        self.seen_only.contains(&(x, y))
    }

    fn entity_buffer(&self) -> Vec<i32> {
        self.entities.clone()
    }

    fn faction_at(&self, pos: WorldPos) -> u8 {
        self.factions.get(&(pos.x, pos.y)).copied().unwrap_or(NO_FACTION)
    }

    fn inventory_items(&self) -> Vec<ItemId> {
        self.inventory.iter().map(|(id, _)| *id).collect()
    }

    fn inventory_name(&self, id: ItemId) -> String {
        self.inventory
            .iter()
            .find(|(item, _)| *item == id)
            .map(|(_, name)| name.clone())
            .unwrap_or_default()
    }

    fn view_list(&self) -> Vec<EntityId> {
        self.in_view.iter().map(|(id, _)| *id).collect()
    }

    fn view_string(&self, id: EntityId) -> String {
        self.in_view
            .iter()
            .find(|(e, _)| *e == id)
            .map(|(_, s)| s.clone())
            .unwrap_or_default()
    }

    fn describe(&self, pos: WorldPos) -> String {
        format!("Cell {},{}", pos.x, pos.y)
    }

    fn automove_path(&self) -> Vec<usize> {
        self.path.clone()
    }

    fn process(&mut self, command: SimCommand) {
        self.calls.push(Call::Process(command));
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        self.calls.push(Call::MoveBy(dx, dy));
        self.player = self.player + (dx, dy);
    }

    fn request_path_to(&mut self, target: WorldPos) {
        self.calls.push(Call::RequestPath(target));
    }

    fn advance_automove(&mut self) {
        self.calls.push(Call::AdvanceAutomove);
        if !self.path.is_empty() {
            self.path.remove(0);
        }
    }

    fn use_item(&mut self, id: ItemId) {
        self.calls.push(Call::UseItem(id));
    }

    fn drop_item(&mut self, id: ItemId) {
        self.calls.push(Call::DropItem(id));
    }

    fn give_item(&mut self, name: &str) {
        self.calls.push(Call::GiveItem(name.to_string()));
    }

    fn change_money(&mut self, amount: f32) {
        self.calls.push(Call::ChangeMoney(amount));
    }

    fn set_player_stats(&mut self, stats: &[i32]) {
        self.calls.push(Call::SetStats(stats.to_vec()));
    }

    fn console_input(&mut self, text: &str) {
        self.calls.push(Call::Console(text.to_string()));
    }

    fn save(&self) -> String {
        self.blob.clone()
    }

    fn load(&mut self, blob: &str) -> Result<(), String> {
        self.calls.push(Call::Load(blob.to_string()));
        if blob.is_empty() {
            return Err("empty save".to_string());
        }
        self.blob = blob.to_string();
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Keeps the last frame in memory.
#[derive(Debug, Clone)]
pub struct RecordingViewport {
    pub width: u16,
    pub height: u16,
    pub cells: HashMap<(i32, i32), Glyph>,
    /// Every `put` in call order.
    pub puts: Vec<(ScreenPos, Glyph)>,
    pub panels: Vec<Panel>,
    pub status: Vec<String>,
    pub flushes: usize,
    pub shift: bool,
}

impl RecordingViewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: HashMap::new(),
            puts: Vec::new(),
            panels: Vec::new(),
            status: Vec::new(),
            flushes: 0,
            shift: false,
        }
    }

    pub fn at(&self, x: i32, y: i32) -> Option<Glyph> {
        self.cells.get(&(x, y)).copied()
    }
}

impl Viewport for RecordingViewport {
    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.puts.clear();
        self.panels.clear();
        self.status.clear();
    }

    fn put(&mut self, pos: ScreenPos, glyph: Glyph) {
        self.puts.push((pos, glyph));
        self.cells.insert((pos.x, pos.y), glyph);
    }

    fn panel(&mut self, panel: &Panel) {
        self.panels.push(panel.clone());
    }

    fn status(&mut self, lines: &[String]) {
        self.status = lines.to_vec();
    }

    fn flush(&mut self) -> Result<(), ViewportError> {
        self.flushes += 1;
        Ok(())
    }

    fn is_held(&self, key: Key) -> bool {
        key == Key::Shift && self.shift
    }
}
