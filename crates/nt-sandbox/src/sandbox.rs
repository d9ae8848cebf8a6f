//! `Simulation` implementation over a [`World`]

use nt_client::camera::WorldPos;
use nt_client::command::{SimCommand, WaitType};
use nt_client::glyph::CellKind;
use nt_client::sim::{EntityId, ItemId, NO_FACTION, SimEvent, Simulation};
use tracing::{debug, warn};

use crate::map::MapError;
use crate::world::{ActorKind, DUSK_MINUTES, World};

/// How far the player sees.
pub const VIEW_RADIUS: i32 = 8;

/// What the sandbox was asked to do, for tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallLog {
    /// Commands received through `process`, in order.
    pub processed: Vec<SimCommand>,
    /// Every mutating call, `process` included.
    pub mutations: usize,
    pub stats: Vec<Vec<i32>>,
    pub console: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Sandbox {
    world: World,
    visible: Vec<bool>,
    path: Vec<usize>,
    events: Vec<SimEvent>,
    log: CallLog,
}

impl Sandbox {
    /// The town, with the welcome messages queued.
    pub fn new() -> Result<Self, MapError> {
        let mut sandbox = Self::from_world(World::town()?);
        sandbox.emit(SimEvent::Message("Welcome to Neon Twilight.".into()));
        Ok(sandbox)
    }

    pub fn from_world(world: World) -> Self {
        let mut sandbox = Self {
            visible: vec![false; world.cells.len()],
            world,
            path: Vec::new(),
            events: Vec::new(),
            log: CallLog::default(),
        };
        sandbox.update_view();
        sandbox.emit(SimEvent::AreaDescription(sandbox.world.area_name().into()));
        sandbox
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn calls(&self) -> &CallLog {
        &self.log
    }

    fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    fn say(&mut self, text: impl Into<String>) {
        self.emit(SimEvent::Message(text.into()));
    }

    fn update_view(&mut self) {
        let (px, py) = self.world.player;
        self.visible = self.world.grid().field_of_view(px, py, VIEW_RADIUS);
        for (seen, visible) in self.world.seen.iter_mut().zip(&self.visible) {
            *seen |= *visible;
        }
    }

    fn visible_at(&self, x: i32, y: i32) -> bool {
        self.world
            .grid()
            .index(x, y)
            .and_then(|idx| self.visible.get(idx).copied())
            .unwrap_or(false)
    }

    /// Step the player, bumping into whoever stands in the way.
    fn step(&mut self, dx: i32, dy: i32) {
        let (px, py) = self.world.player;
        let target = (px + dx, py + dy);

        if let Some(kind) = self.world.actor_at(target).map(|a| a.kind) {
            match kind {
                ActorKind::Barkeep => {
                    self.say("\"What'll it be?\"");
                    self.emit(SimEvent::OpenVendor);
                }
                ActorKind::Patron => self.emit(SimEvent::OpenConversation {
                    text: "\"You new in town?\"".into(),
                    answers: vec![
                        "Just passing through.".into(),
                        "Who's asking?".into(),
                    ],
                }),
                ActorKind::Thug => self.say("You shove the thug. It glares at you."),
            }
            return;
        }

        if !self.world.grid().is_walkable(target.0, target.1) {
            debug!(x = target.0, y = target.1, "bumped into terrain");
            return;
        }

        let area = self.world.area_name();
        self.world.player = target;
        self.world.minutes += 1;
        self.update_view();
        if self.world.area_name() != area {
            self.emit(SimEvent::AreaDescription(self.world.area_name().into()));
        }
    }

    fn pick_up(&mut self) {
        let here = self.world.player;
        let Some(idx) = self.world.items.iter().position(|i| i.pos == Some(here)) else {
            self.say("There is nothing here to pick up.");
            return;
        };
        self.world.items[idx].pos = None;
        let text = format!("You pick up the {}.", self.world.items[idx].name);
        self.say(text);
    }

    fn wait(&mut self, wait: WaitType) {
        let minutes = match wait {
            WaitType::Minutes5 => 5,
            WaitType::Minutes30 => 30,
            WaitType::Hour1 => 60,
            WaitType::Hour2 => 120,
            WaitType::TillDusk => {
                let now = self.world.minutes % (24 * 60);
                (DUSK_MINUTES + 24 * 60 - now) % (24 * 60)
            }
        };
        self.world.minutes += minutes;
        let text = format!("You wait. It is now {}.", self.world.clock());
        self.say(text);
    }

    fn backpack_position(&self, id: ItemId) -> Option<usize> {
        self.world
            .items
            .iter()
            .position(|i| i.id == id && i.pos.is_none())
    }
}

impl Simulation for Sandbox {
    fn width(&self) -> u32 {
        self.world.width
    }

    fn height(&self) -> u32 {
        self.world.height
    }

    fn map_cells(&self) -> Vec<u8> {
        self.world.cells.clone()
    }

    fn player(&self) -> WorldPos {
        WorldPos::new(self.world.player.0, self.world.player.1)
    }

    fn is_visible(&self, x: i32, y: i32) -> bool {
        self.visible_at(x, y)
    }

    fn is_seen(&self, x: i32, y: i32) -> bool {
        self.world
            .grid()
            .index(x, y)
            .and_then(|idx| self.world.seen.get(idx).copied())
            .unwrap_or(false)
    }

    /// Props, then items, then actors, only those in view.
    fn entity_buffer(&self) -> Vec<i32> {
        let props = self.world.props.iter().map(|p| (p.pos, p.glyph));
        let items = self
            .world
            .items
            .iter()
            .filter_map(|i| i.pos.map(|pos| (pos, i.glyph)));
        let actors = self
            .world
            .actors
            .iter()
            .map(|a| (a.pos, a.kind.glyph() as u8));

        props
            .chain(items)
            .chain(actors)
            .filter(|((x, y), _)| self.visible_at(*x, *y))
            .flat_map(|((x, y), glyph)| [x, y, glyph as i32])
            .collect()
    }

    fn faction_at(&self, pos: WorldPos) -> u8 {
        self.world
            .actor_at((pos.x, pos.y))
            .map_or(NO_FACTION, |a| a.faction)
    }

    fn inventory_items(&self) -> Vec<ItemId> {
        self.world.backpack().map(|i| i.id).collect()
    }

    fn inventory_name(&self, id: ItemId) -> String {
        self.world
            .backpack()
            .find(|i| i.id == id)
            .map(|i| i.name.clone())
            .unwrap_or_default()
    }

    fn view_list(&self) -> Vec<EntityId> {
        self.world
            .actors
            .iter()
            .enumerate()
            .filter(|(_, a)| self.visible_at(a.pos.0, a.pos.1))
            .map(|(idx, _)| idx as EntityId)
            .collect()
    }

    fn view_string(&self, id: EntityId) -> String {
        let Some(actor) = self.world.actors.get(id as usize) else {
            return String::new();
        };
        let (px, py) = self.world.player;
        let dist = (actor.pos.0 - px).abs().max((actor.pos.1 - py).abs());
        format!("{} ({dist} away)", actor.kind.name())
    }

    fn describe(&self, pos: WorldPos) -> String {
        if !self.is_seen(pos.x, pos.y) {
            return "You don't know what's there.".to_string();
        }
        if self.visible_at(pos.x, pos.y) {
            if let Some(actor) = self.world.actor_at((pos.x, pos.y)) {
                return format!("A {}.", actor.kind.name().to_lowercase());
            }
            if let Some(item) = self.world.items.iter().find(|i| i.pos == Some((pos.x, pos.y))) {
                return format!("A {} lies here.", item.name);
            }
        }
        let what = match self.world.grid().kind(pos.x, pos.y) {
            Some(CellKind::Floor) => "The street.",
            Some(CellKind::Wall) => "A wall.",
            Some(CellKind::Grass) => "Some grass.",
            Some(CellKind::Tree) => "A tree.",
            Some(CellKind::FloorIndoor) => "A sticky bar floor.",
            Some(CellKind::Door) => "A door.",
            None => "",
        };
        what.to_string()
    }

    fn automove_path(&self) -> Vec<usize> {
        self.path.clone()
    }

    fn process(&mut self, command: SimCommand) {
        self.log.mutations += 1;
        self.log.processed.push(command);
        match command {
            SimCommand::Move(dir) => {
                let (dx, dy) = dir.delta();
                self.step(dx, dy);
            }
            SimCommand::GetItem => self.pick_up(),
            SimCommand::Rest => {
                self.world.minutes += 8 * 60;
                let text = format!("You rest for 8 hours. It is now {}.", self.world.clock());
                self.say(text);
            }
            SimCommand::Wait(wait) => self.wait(wait),
        }
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        self.log.mutations += 1;
        self.step(dx, dy);
    }

    fn request_path_to(&mut self, target: WorldPos) {
        self.log.mutations += 1;
        self.path = self
            .world
            .grid()
            .find_path(self.world.player, (target.x, target.y));
        if self.path.is_empty() {
            self.say("You can't get there.");
        }
    }

    fn advance_automove(&mut self) {
        self.log.mutations += 1;
        if !self.path.is_empty() {
            self.path.remove(0);
        }
    }

    fn use_item(&mut self, id: ItemId) {
        self.log.mutations += 1;
        let Some(idx) = self.backpack_position(id) else {
            warn!(id, "use of an item not in the backpack");
            return;
        };
        let name = self.world.items[idx].name.clone();
        match name.as_str() {
            "Medkit" | "Protein shake" => {
                self.world.items.remove(idx);
                self.say(format!("You use the {name}. You feel better."));
            }
            _ => self.say(format!("You put on the {name}.")),
        }
    }

    fn drop_item(&mut self, id: ItemId) {
        self.log.mutations += 1;
        let Some(idx) = self.backpack_position(id) else {
            warn!(id, "drop of an item not in the backpack");
            return;
        };
        let here = self.world.player;
        let item = &mut self.world.items[idx];
        item.pos = Some(here);
        let text = format!("You drop the {}.", item.name);
        self.say(text);
    }

    fn give_item(&mut self, name: &str) {
        self.log.mutations += 1;
        self.world.spawn_item(name, None);
    }

    fn change_money(&mut self, amount: f32) {
        self.log.mutations += 1;
        self.world.money -= amount;
    }

    fn set_player_stats(&mut self, stats: &[i32]) {
        self.log.mutations += 1;
        self.log.stats.push(stats.to_vec());
        self.world.stats = stats.to_vec();
    }

    fn console_input(&mut self, text: &str) {
        self.log.mutations += 1;
        self.log.console.push(text.to_string());
        let mut words = text.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("money"), None, _) => {
                let line = format!("You have ${:.2}.", self.world.money);
                self.say(line);
            }
            (Some("time"), None, _) => {
                let line = format!("It is {}.", self.world.clock());
                self.say(line);
            }
            (Some("give"), Some(_), _) => {
                let name = text.trim_start()["give".len()..].trim().to_string();
                self.world.spawn_item(&name, None);
                self.say(format!("Spawned {name}."));
            }
            (Some("tp"), Some(x), Some(y)) => match (x.parse(), y.parse()) {
                (Ok(x), Ok(y)) if self.world.grid().is_walkable(x, y) => {
                    self.world.player = (x, y);
                    self.update_view();
                }
                _ => self.say("Can't teleport there."),
            },
            _ => self.say(format!("Unknown command: {text}")),
        }
    }

    fn save(&self) -> String {
        match serde_json::to_string(&self.world) {
            Ok(blob) => blob,
            Err(err) => {
                warn!(%err, "could not serialize world");
                String::new()
            }
        }
    }

    fn load(&mut self, blob: &str) -> Result<(), String> {
        let world: World = serde_json::from_str(blob).map_err(|e| e.to_string())?;
        let expected = world.width as usize * world.height as usize;
        if world.cells.len() != expected || world.seen.len() != expected {
            return Err(format!("save has {} cells, expected {expected}", world.cells.len()));
        }
        self.log.mutations += 1;
        self.world = world;
        self.path.clear();
        self.update_view();
        self.emit(SimEvent::AreaDescription(self.world.area_name().into()));
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
