//! Glyphs and the fixed glyph palette
//!
//! A glyph is one character with a foreground and an optional background.
//! Map cells and entities are both drawn from static tables here; the only
//! dynamic part is the faction tint applied to actors.

use strum::{Display, EnumIter, FromRepr};

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Scale every channel by `factor`, rounding to nearest.
    pub fn scaled(self, factor: f32) -> Rgb {
        let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }
}

/// A character plus colors, ready to be placed on a screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Option<Rgb>,
}

impl Glyph {
    /// Nothing to draw. Has no color, so dimming leaves it alone.
    pub const NULL: Glyph = Glyph {
        ch: ' ',
        fg: Rgb::BLACK,
        bg: None,
    };

    pub const PLAYER: Glyph = Glyph::new('@', Rgb::WHITE);

    pub const fn new(ch: char, fg: Rgb) -> Self {
        Self { ch, fg, bg: None }
    }

    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    /// Remembered-but-not-visible rendering: every channel halved.
    pub fn dimmed(self) -> Glyph {
        if self.is_null() {
            return self;
        }
        Glyph {
            ch: self.ch,
            fg: self.fg.scaled(0.5),
            bg: self.bg.map(|bg| bg.scaled(0.5)),
        }
    }
}

/// Map cell codes as they appear in the map buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum CellKind {
    Floor = 0,
    Wall = 1,
    Grass = 2,
    Tree = 3,
    FloorIndoor = 4,
    Door = 5,
}

impl CellKind {
    pub fn from_code(code: u8) -> Option<Self> {
        Self::from_repr(code)
    }

    /// Undimmed glyph for this cell.
    pub const fn glyph(self) -> Glyph {
        match self {
            CellKind::Floor => Glyph::new('.', Rgb(50, 50, 50)),
            CellKind::Wall => Glyph::new('▒', Rgb(100, 100, 100)),
            CellKind::Grass => Glyph::new('"', Rgb(0, 160, 0)),
            CellKind::Tree => Glyph::new('♣', Rgb(0, 110, 30)),
            CellKind::FloorIndoor => Glyph::new('.', Rgb(130, 100, 60)),
            CellKind::Door => Glyph::new('+', Rgb(170, 110, 40)),
        }
    }
}

/// Entity glyph codes as they appear in the entity draw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum EntityGlyph {
    Thug = 0,
    Knife = 1,
    Medkit = 2,
    Barkeep = 3,
    Table = 4,
    Chair = 5,
    Boots = 6,
    Jacket = 7,
    Jeans = 8,
    Patron = 9,
    Bed = 10,
}

/// Drawn for entity codes missing from the palette.
pub const DEFAULT_ENTITY_GLYPH: Glyph = Glyph::new('?', Rgb(255, 0, 255));

impl EntityGlyph {
    pub fn from_code(code: i32) -> Option<Self> {
        u8::try_from(code).ok().and_then(Self::from_repr)
    }

    pub const fn glyph(self) -> Glyph {
        match self {
            EntityGlyph::Thug => Glyph::new('t', Rgb::WHITE),
            EntityGlyph::Knife => Glyph::new('/', Rgb(0, 255, 255)),
            EntityGlyph::Medkit => Glyph::new('!', Rgb(255, 0, 0)),
            EntityGlyph::Barkeep => Glyph::new('B', Rgb::WHITE),
            EntityGlyph::Table => Glyph::new('╦', Rgb(150, 100, 50)),
            EntityGlyph::Chair => Glyph::new('h', Rgb(150, 100, 50)),
            EntityGlyph::Boots => Glyph::new('[', Rgb(120, 70, 20)),
            EntityGlyph::Jacket => Glyph::new('[', Rgb(80, 80, 80)),
            EntityGlyph::Jeans => Glyph::new('[', Rgb(40, 60, 200)),
            EntityGlyph::Patron => Glyph::new('p', Rgb::WHITE),
            EntityGlyph::Bed => Glyph::new('=', Rgb(200, 200, 200)),
        }
    }

    /// Actors whose background shows their faction.
    pub const fn is_faction_capable(self) -> bool {
        matches!(
            self,
            EntityGlyph::Thug | EntityGlyph::Barkeep | EntityGlyph::Patron
        )
    }
}

pub const HOSTILE_TINT: Rgb = Rgb(200, 0, 0);
pub const NEUTRAL_TINT: Rgb = Rgb(200, 200, 0);

/// Background for a faction value reported by the simulation.
pub fn faction_tint(faction: u8) -> Option<Rgb> {
    match faction {
        0 => Some(HOSTILE_TINT),
        1 => Some(NEUTRAL_TINT),
        _ => None,
    }
}
