//! Everything that is saved: the map, the player, actors and items

use nt_client::glyph::EntityGlyph;
use serde::{Deserialize, Serialize};

use crate::map::{Grid, MapError, TOWN, parse_rows};

pub const FACTION_ENEMY: u8 = 0;
pub const FACTION_TOWNSFOLK: u8 = 1;

/// Minutes since midnight the game starts at.
pub const START_MINUTES: u32 = 8 * 60;
/// Dusk, for waiting.
pub const DUSK_MINUTES: u32 = 19 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Thug,
    Barkeep,
    Patron,
}

impl ActorKind {
    pub fn glyph(self) -> EntityGlyph {
        match self {
            ActorKind::Thug => EntityGlyph::Thug,
            ActorKind::Barkeep => EntityGlyph::Barkeep,
            ActorKind::Patron => EntityGlyph::Patron,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActorKind::Thug => "Thug",
            ActorKind::Barkeep => "Barkeep",
            ActorKind::Patron => "Patron",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub pos: (i32, i32),
    pub faction: u8,
}

/// Something lying on the floor or carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub glyph: u8,
    /// `None` while in the player's backpack.
    pub pos: Option<(i32, i32)>,
}

/// Furniture: drawn, never picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prop {
    pub glyph: u8,
    pub pos: (i32, i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<u8>,
    pub seen: Vec<bool>,
    pub player: (i32, i32),
    pub stats: Vec<i32>,
    pub money: f32,
    pub minutes: u32,
    pub actors: Vec<Actor>,
    pub items: Vec<Item>,
    pub props: Vec<Prop>,
    pub next_item_id: u64,
}

/// Glyph code used for an item name.
pub fn item_glyph(name: &str) -> u8 {
    match name {
        "Knife" => EntityGlyph::Knife as u8,
        "Boots" => EntityGlyph::Boots as u8,
        "Jacket" => EntityGlyph::Jacket as u8,
        "Jeans" => EntityGlyph::Jeans as u8,
        _ => EntityGlyph::Medkit as u8,
    }
}

impl World {
    /// The hand-drawn town with its cast.
    pub fn town() -> Result<Self, MapError> {
        let mut world = Self::from_rows(&TOWN, (4, 3))?;
        world.actors = vec![
            Actor { kind: ActorKind::Thug, pos: (20, 11), faction: FACTION_ENEMY },
            Actor { kind: ActorKind::Barkeep, pos: (10, 7), faction: FACTION_TOWNSFOLK },
            Actor { kind: ActorKind::Patron, pos: (18, 8), faction: FACTION_TOWNSFOLK },
        ];
        for (name, pos) in [("Knife", (6, 3)), ("Medkit", (12, 12)), ("Jacket", (21, 6))] {
            world.spawn_item(name, Some(pos));
        }
        world.props = vec![
            Prop { glyph: EntityGlyph::Table as u8, pos: (14, 7) },
            Prop { glyph: EntityGlyph::Chair as u8, pos: (13, 7) },
            Prop { glyph: EntityGlyph::Chair as u8, pos: (15, 7) },
            Prop { glyph: EntityGlyph::Bed as u8, pos: (22, 9) },
        ];
        Ok(world)
    }

    /// An empty world on the given rows, player at `player`.
    pub fn from_rows(rows: &[&str], player: (i32, i32)) -> Result<Self, MapError> {
        let (width, height, cells) = parse_rows(rows)?;
        Ok(Self {
            width,
            height,
            seen: vec![false; cells.len()],
            cells,
            player,
            stats: vec![10; 6],
            money: 100.0,
            minutes: START_MINUTES,
            actors: Vec::new(),
            items: Vec::new(),
            props: Vec::new(),
            next_item_id: 1,
        })
    }

    pub fn grid(&self) -> Grid<'_> {
        Grid {
            width: self.width,
            height: self.height,
            cells: &self.cells,
        }
    }

    pub fn spawn_item(&mut self, name: &str, pos: Option<(i32, i32)>) -> u64 {
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.items.push(Item {
            id,
            name: name.to_string(),
            glyph: item_glyph(name),
            pos,
        });
        id
    }

    pub fn actor_at(&self, pos: (i32, i32)) -> Option<&Actor> {
        self.actors.iter().find(|a| a.pos == pos)
    }

    pub fn backpack(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.pos.is_none())
    }

    pub fn clock(&self) -> String {
        let minutes = self.minutes % (24 * 60);
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    /// Short description of the player's surroundings.
    pub fn area_name(&self) -> &'static str {
        let (x, y) = self.player;
        match self.grid().kind(x, y) {
            Some(nt_client::glyph::CellKind::FloorIndoor) => "The Neon Bar",
            _ => "Main street",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_town_cast_stands_on_floor() {
        let world = World::town().unwrap();
        let grid = world.grid();
        for actor in &world.actors {
            assert!(grid.is_walkable(actor.pos.0, actor.pos.1), "{:?}", actor.kind);
        }
        for item in &world.items {
            let (x, y) = item.pos.unwrap();
            assert!(grid.is_walkable(x, y), "{}", item.name);
        }
        assert!(grid.is_walkable(world.player.0, world.player.1));
    }

    #[test]
    fn test_item_ids_are_unique() {
        let mut world = World::town().unwrap();
        let a = world.spawn_item("Boots", None);
        let b = world.spawn_item("Boots", None);
        assert_ne!(a, b);
        assert_eq!(world.backpack().count(), 2);
    }

    #[test]
    fn test_clock() {
        let mut world = World::from_rows(&["."], (0, 0)).unwrap();
        assert_eq!(world.clock(), "08:00");
        world.minutes += 24 * 60 + 95;
        assert_eq!(world.clock(), "09:35");
    }

    #[test]
    fn test_area_name() {
        let mut world = World::town().unwrap();
        assert_eq!(world.area_name(), "Main street");
        world.player = (10, 8);
        assert_eq!(world.area_name(), "The Neon Bar");
    }
}
