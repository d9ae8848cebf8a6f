//! Whole-session tests against the sandbox simulation

use std::collections::HashMap;
use std::time::{Duration, Instant};

use nt_client::camera::ScreenPos;
use nt_client::config::ClientConfig;
use nt_client::glyph::{CellKind, EntityGlyph, HOSTILE_TINT, NEUTRAL_TINT};
use nt_client::panel::Panel;
use nt_client::{
    Controller, Glyph, InputEvent, Key, OverlayKind, PointerButton, SimCommand, Simulation,
    Storage, Viewport, ViewportError, WorldPos,
};
use nt_sandbox::{MemoryStorage, Sandbox};

/// Last frame, cell by cell.
#[derive(Default)]
struct Screen {
    cells: HashMap<(i32, i32), Glyph>,
    panels: Vec<OverlayKind>,
    shift: bool,
}

impl Viewport for Screen {
    fn dimensions(&self) -> (u16, u16) {
        (21, 11)
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.panels.clear();
    }

    fn put(&mut self, pos: ScreenPos, glyph: Glyph) {
        self.cells.insert((pos.x, pos.y), glyph);
    }

    fn panel(&mut self, panel: &Panel) {
        self.panels.push(panel.kind);
    }

    fn status(&mut self, _lines: &[String]) {}

    fn flush(&mut self) -> Result<(), ViewportError> {
        Ok(())
    }

    fn is_held(&self, key: Key) -> bool {
        key == Key::Shift && self.shift
    }
}

type Session = Controller<Sandbox, Screen, MemoryStorage>;

fn session(config: ClientConfig) -> Session {
    Controller::new(config, Sandbox::new().unwrap(), Screen::default(), MemoryStorage::new()).unwrap()
}

fn playing() -> Session {
    session(ClientConfig {
        skip_character_creation: true,
        ..ClientConfig::default()
    })
}

fn press(s: &mut Session, key: Key) {
    s.handle_input(InputEvent::Key(key), Instant::now()).unwrap();
}

/// Screen cell of a world cell: the 21x11 screen centers on (10, 5).
fn screen_of(s: &Session, x: i32, y: i32) -> (i32, i32) {
    let p = s.sim().player();
    (x - p.x + 10, y - p.y + 5)
}

#[test]
fn test_player_is_at_center() {
    let mut s = playing();
    s.render().unwrap();
    assert_eq!(s.viewport().cells.get(&(10, 5)), Some(&Glyph::PLAYER));

    press(&mut s, Key::Down);
    assert_eq!(s.sim().player(), WorldPos::new(4, 4));
    assert_eq!(s.viewport().cells.get(&(10, 5)), Some(&Glyph::PLAYER));
}

#[test]
fn test_visible_wall_is_undimmed() {
    let mut s = playing();
    s.render().unwrap();
    // the north wall above the start
    let cell = screen_of(&s, 4, 0);
    assert_eq!(s.viewport().cells.get(&cell), Some(&CellKind::Wall.glyph()));
}

#[test]
fn test_remembered_cells_are_dimmed() {
    let mut s = playing();
    s.sim_mut().console_input("tp 13 3");
    s.render().unwrap();

    // (4,3) was seen from the start but is now out of view
    assert!(!s.sim().is_visible(4, 3));
    let cell = screen_of(&s, 4, 3);
    assert_eq!(s.viewport().cells.get(&cell), Some(&CellKind::Floor.glyph().dimmed()));

    // never seen
    assert!(!s.sim().is_seen(23, 3));
    let unseen = screen_of(&s, 23, 3);
    assert_eq!(s.viewport().cells.get(&unseen), None);
}

#[test]
fn test_inventory_gates_movement() {
    let mut s = playing();
    press(&mut s, Key::Char('i'));
    assert!(s.state().overlays().is_open(OverlayKind::Inventory));
    let before = s.sim().calls().mutations;

    press(&mut s, Key::Left);
    press(&mut s, Key::Char('g'));
    assert_eq!(s.sim().calls().mutations, before);
    assert_eq!(s.sim().player(), WorldPos::new(4, 3));

    press(&mut s, Key::Char('i'));
    press(&mut s, Key::Left);
    assert_eq!(s.sim().player(), WorldPos::new(3, 3));
}

#[test]
fn test_character_creation_flow() {
    let mut s = session(ClientConfig::default());
    press(&mut s, Key::Left);
    assert!(s.sim().calls().processed.is_empty());

    // 15 on every line would only ever keep the last one
    for _ in 0..6 {
        press(&mut s, Key::Char('1'));
        press(&mut s, Key::Down);
    }
    press(&mut s, Key::Enter);
    assert!(s.state().overlays().is_open(OverlayKind::CharacterCreation));
    assert!(s.sim().calls().stats.is_empty());

    for slot in ['1', '2', '3', '4', '5', '6'] {
        press(&mut s, Key::Char(slot));
        press(&mut s, Key::Down);
    }
    press(&mut s, Key::Enter);
    assert!(!s.state().overlays().is_open(OverlayKind::CharacterCreation));
    assert_eq!(s.sim().calls().stats, vec![vec![15, 14, 13, 12, 10, 8]]);
}

#[test]
fn test_faction_tints_on_screen() {
    let mut s = playing();
    // stand in the bar, next to the patron
    s.sim_mut().console_input("tp 17 8");
    s.render().unwrap();

    let barkeep = s.viewport().cells[&screen_of(&s, 10, 7)];
    assert_eq!(barkeep.ch, EntityGlyph::Barkeep.glyph().ch);
    assert_eq!(barkeep.bg, Some(NEUTRAL_TINT));

    let patron = s.viewport().cells[&screen_of(&s, 18, 8)];
    assert_eq!(patron.bg, Some(NEUTRAL_TINT));

    let table = s.viewport().cells[&screen_of(&s, 14, 7)];
    assert_eq!(table.bg, None);

    s.sim_mut().console_input("tp 18 11");
    s.render().unwrap();
    let thug = s.viewport().cells[&screen_of(&s, 20, 11)];
    assert_eq!(thug.bg, Some(HOSTILE_TINT));
}

#[test]
fn test_vendor_from_bump() {
    let mut s = playing();
    s.sim_mut().console_input("tp 11 7");
    press(&mut s, Key::Char('h'));
    assert!(s.state().overlays().is_open(OverlayKind::Vendor));

    // vendor blocks movement and the inventory toggle
    press(&mut s, Key::Char('h'));
    press(&mut s, Key::Char('i'));
    assert!(!s.state().overlays().is_open(OverlayKind::Inventory));

    press(&mut s, Key::Char('1'));
    assert_eq!(s.sim().world().money, 95.0);
    assert_eq!(s.sim().inventory_size(), 1);

    press(&mut s, Key::Escape);
    assert!(s.state().overlays().visible().next().is_none());
}

#[test]
fn test_click_to_move_walks_the_path() {
    let mut s = playing();
    let start = Instant::now();
    // two cells east of the player
    let target = ScreenPos::new(12, 5);
    s.handle_input(
        InputEvent::PointerDown {
            pos: target,
            button: PointerButton::Primary,
        },
        start,
    )
    .unwrap();
    assert_eq!(s.sim().automove_path().len(), 2);

    s.handle_input(InputEvent::PointerMove { pos: target }, start).unwrap();
    // a second move while a step is pending changes nothing
    s.handle_input(InputEvent::PointerMove { pos: target }, start).unwrap();

    s.tick(start + Duration::from_millis(1000)).unwrap();
    assert_eq!(s.sim().player(), WorldPos::new(5, 3));
    assert_eq!(s.sim().automove_path().len(), 1);
    assert!(!s.state().automove().is_running());

    s.handle_input(InputEvent::PointerMove { pos: target }, start).unwrap();
    s.tick(start + Duration::from_millis(2000)).unwrap();
    assert_eq!(s.sim().player(), WorldPos::new(6, 3));
    assert!(s.sim().automove_path().is_empty());
}

#[test]
fn test_save_and_restore_through_storage() {
    let mut s = playing();
    press(&mut s, Key::Down);
    press(&mut s, Key::Char('s'));
    s.tick(Instant::now()).unwrap();
    assert!(s.storage().get("neon_twilight").unwrap().is_some());

    let (_, _, storage) = s.into_parts();
    let config = ClientConfig {
        restore_on_start: true,
        ..ClientConfig::default()
    };
    let mut restored =
        Controller::new(config, Sandbox::new().unwrap(), Screen::default(), storage).unwrap();
    assert_eq!(restored.sim().player(), WorldPos::new(4, 3));
    restored.tick(Instant::now()).unwrap();

    assert_eq!(restored.sim().player(), WorldPos::new(4, 4));
    assert!(!restored.state().overlays().is_open(OverlayKind::CharacterCreation));
    assert_eq!(restored.state().messages().recent(1), vec!["Game restored."]);
}

#[test]
fn test_log_history_and_view_list() {
    let mut s = playing();
    s.viewport_mut().shift = true;
    press(&mut s, Key::Char('l'));
    s.viewport_mut().shift = false;
    assert!(s.state().overlays().is_open(OverlayKind::LogHistory));
    assert!(s.viewport().panels.contains(&OverlayKind::LogHistory));
    assert!(s
        .state()
        .messages()
        .iter()
        .any(|m| m == "Welcome to Neon Twilight."));

    press(&mut s, Key::Escape);
    s.sim_mut().console_input("tp 17 8");
    press(&mut s, Key::Char('v'));
    let seen = &s.state().contents().view_list;
    assert!(seen.iter().any(|line| line.starts_with("Patron")));
}

#[test]
fn test_gated_command_never_reaches_process() {
    let mut s = playing();
    press(&mut s, Key::Char('`'));
    press(&mut s, Key::Char('g'));
    press(&mut s, Key::Escape);
    press(&mut s, Key::Char('g'));
    assert_eq!(s.sim().calls().processed, vec![SimCommand::GetItem]);
}
