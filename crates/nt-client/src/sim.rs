//! Interface to the simulation engine
//!
//! The engine owns the map, entities, inventory and factions. The controller
//! only reads what it needs to draw and forwards what the player asked for.

use crate::camera::WorldPos;
use crate::command::SimCommand;

/// Opaque id of an item in the player's inventory.
pub type ItemId = u64;

/// Opaque id of an entity in view.
pub type EntityId = u64;

/// Faction value the engine reports when there is no faction at a cell.
pub const NO_FACTION: u8 = 99;

/// Something the engine wants the client to show.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A line for the message log.
    Message(String),
    /// New description of the player's surroundings.
    AreaDescription(String),
    /// The player bumped into a vendor.
    OpenVendor,
    /// The player started talking to someone.
    OpenConversation { text: String, answers: Vec<String> },
}

/// Turn-based game engine driven by the client.
pub trait Simulation {
    // Queries

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Cell-kind codes, row-major, `width * height` long.
    fn map_cells(&self) -> Vec<u8>;

    fn player(&self) -> WorldPos;

    fn is_visible(&self, x: i32, y: i32) -> bool;
    fn is_seen(&self, x: i32, y: i32) -> bool;

    fn should_draw(&self, x: i32, y: i32) -> bool {
        self.is_visible(x, y) || self.is_seen(x, y)
    }

    /// Flat `(x, y, glyph)` triples for every drawable entity.
    fn entity_buffer(&self) -> Vec<i32>;

    /// Faction of whatever stands at `pos`, or [`NO_FACTION`].
    fn faction_at(&self, pos: WorldPos) -> u8;

    fn inventory_items(&self) -> Vec<ItemId>;

    fn inventory_size(&self) -> usize {
        self.inventory_items().len()
    }

    fn inventory_name(&self, id: ItemId) -> String;

    fn view_list(&self) -> Vec<EntityId>;
    fn view_string(&self, id: EntityId) -> String;

    fn describe(&self, pos: WorldPos) -> String;

    /// Remaining automove steps as world-cell indices, nearest first.
    fn automove_path(&self) -> Vec<usize>;

    fn has_automove(&self) -> bool {
        !self.automove_path().is_empty()
    }

    // Mutations

    fn process(&mut self, command: SimCommand);
    fn move_by(&mut self, dx: i32, dy: i32);
    fn request_path_to(&mut self, target: WorldPos);
    fn advance_automove(&mut self);
    fn use_item(&mut self, id: ItemId);
    fn drop_item(&mut self, id: ItemId);
    fn give_item(&mut self, name: &str);

    /// Take `amount` out of the player's purse.
    fn change_money(&mut self, amount: f32);
    fn set_player_stats(&mut self, stats: &[i32]);
    fn console_input(&mut self, text: &str);

    /// Serialize the whole game into an opaque blob.
    fn save(&self) -> String;

    /// Replace the game with a blob produced by [`Simulation::save`].
    fn load(&mut self, blob: &str) -> Result<(), String>;

    /// Take everything the engine emitted since the last call.
    fn drain_events(&mut self) -> Vec<SimEvent>;
}
