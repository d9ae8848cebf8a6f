//! Input handling - convert crossterm events to client input events
//!
//! Terminals report no key-up events, so "is shift held" is answered from
//! the modifiers of the most recent key or mouse event. That state is
//! shared between the event source and the viewport through [`InputState`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use nt_client::camera::ScreenPos;
use nt_client::{EventSource, InputEvent, Key, PointerButton, ViewportError};

/// Modifier and layout state shared by the event source and the viewport.
#[derive(Debug, Default)]
pub struct InputState {
    shift: Cell<bool>,
    /// Map area (width, height) of the last frame, for mouse hit tests.
    map_size: Cell<(u16, u16)>,
}

impl InputState {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn shift(&self) -> bool {
        self.shift.get()
    }

    pub fn set_map_size(&self, width: u16, height: u16) {
        self.map_size.set((width, height));
    }

    pub fn map_size(&self) -> (u16, u16) {
        self.map_size.get()
    }

    fn in_map(&self, column: u16, row: u16) -> bool {
        let (width, height) = self.map_size.get();
        column < width && row < height
    }
}

/// Convert a terminal event. Events the client has no use for give `None`.
pub fn translate(event: &Event, state: &InputState) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key, state).map(InputEvent::Key),
        Event::Mouse(mouse) => translate_mouse(mouse, state),
        Event::Resize(_, _) => Some(InputEvent::Resize),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent, state: &InputState) -> Option<Key> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let mut shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let translated = match key.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => {
            // crossterm reports shifted letters as uppercase, often without
            // the SHIFT modifier
            if c.is_ascii_uppercase() {
                shift = true;
            }
            Key::Char(c.to_ascii_lowercase())
        }
        _ => return None,
    };
    state.shift.set(shift);
    Some(translated)
}

fn translate_mouse(mouse: &MouseEvent, state: &InputState) -> Option<InputEvent> {
    state.shift.set(mouse.modifiers.contains(KeyModifiers::SHIFT));
    let pos = ScreenPos::new(mouse.column as i32, mouse.row as i32);
    let in_map = state.in_map(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(button) if in_map => {
            let button = match button {
                MouseButton::Left => PointerButton::Primary,
                MouseButton::Right => PointerButton::Secondary,
                MouseButton::Middle => return None,
            };
            Some(InputEvent::PointerDown { pos, button })
        }
        MouseEventKind::Moved | MouseEventKind::Drag(_) if in_map => {
            Some(InputEvent::PointerMove { pos })
        }
        // a release always goes through so a description never gets stuck open
        MouseEventKind::Up(_) => Some(InputEvent::PointerUp { pos }),
        _ => None,
    }
}

/// Reads input from the real terminal.
pub struct CrosstermEvents {
    state: Rc<InputState>,
}

impl CrosstermEvents {
    pub fn new(state: Rc<InputState>) -> Self {
        Self { state }
    }
}

impl EventSource for CrosstermEvents {
    fn poll(&mut self, timeout: Duration) -> Result<Option<InputEvent>, ViewportError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let raw = event::read()?;
        Ok(translate(&raw, &self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn state() -> InputState {
        let state = InputState::default();
        state.set_map_size(20, 10);
        state
    }

    #[test]
    fn test_arrows_and_specials() {
        let s = state();
        for (code, expected) in [
            (KeyCode::Left, Key::Left),
            (KeyCode::Right, Key::Right),
            (KeyCode::Up, Key::Up),
            (KeyCode::Down, Key::Down),
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Esc, Key::Escape),
            (KeyCode::Backspace, Key::Backspace),
        ] {
            assert_eq!(
                translate(&key(code, KeyModifiers::NONE), &s),
                Some(InputEvent::Key(expected))
            );
        }
    }

    #[test]
    fn test_uppercase_sets_shift() {
        let s = state();
        let event = translate(&key(KeyCode::Char('L'), KeyModifiers::NONE), &s);
        assert_eq!(event, Some(InputEvent::Key(Key::Char('l'))));
        assert!(s.shift());

        translate(&key(KeyCode::Char('l'), KeyModifiers::NONE), &s);
        assert!(!s.shift());

        translate(&key(KeyCode::Char('1'), KeyModifiers::SHIFT), &s);
        assert!(s.shift());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let s = state();
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('h'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate(&release, &s), None);
    }

    #[test]
    fn test_unmapped_keys() {
        let s = state();
        assert_eq!(translate(&key(KeyCode::F(1), KeyModifiers::NONE), &s), None);
        assert_eq!(translate(&key(KeyCode::Tab, KeyModifiers::NONE), &s), None);
    }

    #[test]
    fn test_mouse_buttons() {
        let s = state();
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 4), &s),
            Some(InputEvent::PointerDown {
                pos: ScreenPos::new(3, 4),
                button: PointerButton::Primary
            })
        );
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Right), 3, 4), &s),
            Some(InputEvent::PointerDown {
                pos: ScreenPos::new(3, 4),
                button: PointerButton::Secondary
            })
        );
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Middle), 3, 4), &s),
            None
        );
    }

    #[test]
    fn test_mouse_outside_map_area() {
        let s = state();
        // status area, below the map
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 10), &s),
            None
        );
        assert_eq!(translate(&mouse(MouseEventKind::Moved, 25, 1), &s), None);
        assert_eq!(
            translate(&mouse(MouseEventKind::Up(MouseButton::Right), 25, 12), &s),
            Some(InputEvent::PointerUp {
                pos: ScreenPos::new(25, 12)
            })
        );
    }

    #[test]
    fn test_mouse_move_and_drag() {
        let s = state();
        let expected = Some(InputEvent::PointerMove {
            pos: ScreenPos::new(5, 5),
        });
        assert_eq!(translate(&mouse(MouseEventKind::Moved, 5, 5), &s), expected);
        assert_eq!(
            translate(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 5), &s),
            expected
        );
    }

    #[test]
    fn test_resize() {
        let s = state();
        assert_eq!(translate(&Event::Resize(80, 24), &s), Some(InputEvent::Resize));
        assert_eq!(translate(&Event::FocusGained, &s), None);
    }
}
