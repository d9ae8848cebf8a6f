//! The client controller
//!
//! Owns the simulation, the viewport and the storage for the lifetime of a
//! session, plus all client-side state. Every raw input goes through
//! [`Controller::handle_input`]; deferred work and the per-frame render go
//! through [`Controller::tick`].

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info};

use crate::automove::AutomoveRunner;
use crate::camera::{Camera, ScreenPos, WorldPos};
use crate::chargen::STANDARD_ARRAY;
use crate::command::{Command, SimCommand, UiAction, dispatch};
use crate::config::ClientConfig;
use crate::entity::EntityDecoder;
use crate::error::ClientError;
use crate::messages::MessageLog;
use crate::overlay::{OverlayKind, OverlayStack, Transition};
use crate::panel::{Conversation, InventoryMode, OverlayContents, VENDOR_STOCK, menu_slot, wait_options};
use crate::render::render_frame;
use crate::sim::{SimEvent, Simulation};
use crate::storage::{Storage, StorageOp};
use crate::tile::MapBuffer;
use crate::viewport::{InputEvent, Key, PointerButton, Viewport};

/// Menus that take digit keys, in the order they get them.
const MENU_OVERLAYS: [OverlayKind; 4] = [
    OverlayKind::Vendor,
    OverlayKind::Conversation,
    OverlayKind::Inventory,
    OverlayKind::Rest,
];

/// Everything the client keeps between events.
#[derive(Debug)]
pub struct ClientControllerState {
    pub(crate) config: ClientConfig,
    pub(crate) overlays: OverlayStack,
    pub(crate) contents: OverlayContents,
    pub(crate) messages: MessageLog,
    pub(crate) map: MapBuffer,
    pub(crate) decoder: EntityDecoder,
    pub(crate) automove: AutomoveRunner,
    /// Last pointer cell, in screen space.
    pub(crate) pointer: Option<ScreenPos>,
    pub(crate) pending_storage: VecDeque<StorageOp>,
    pub(crate) manual_move_this_tick: bool,
    pub(crate) quit: bool,
}

impl ClientControllerState {
    pub fn new(config: ClientConfig, map: MapBuffer) -> Self {
        let overlays = if config.skip_character_creation {
            OverlayStack::all_closed()
        } else {
            OverlayStack::new()
        };
        let mut pending_storage = VecDeque::new();
        if config.restore_on_start {
            pending_storage.push_back(StorageOp::Restore);
        }
        Self {
            messages: MessageLog::new(config.message_capacity),
            automove: AutomoveRunner::new(config.automove_delay()),
            overlays,
            contents: OverlayContents::default(),
            map,
            decoder: EntityDecoder::new(),
            pointer: None,
            pending_storage,
            manual_move_this_tick: false,
            quit: false,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    pub fn contents(&self) -> &OverlayContents {
        &self.contents
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn map(&self) -> &MapBuffer {
        &self.map
    }

    pub fn automove(&self) -> &AutomoveRunner {
        &self.automove
    }

    pub fn pointer(&self) -> Option<ScreenPos> {
        self.pointer
    }

    pub fn pending_storage(&self) -> impl Iterator<Item = &StorageOp> {
        self.pending_storage.iter()
    }

    pub fn unknown_glyphs(&self) -> u64 {
        self.decoder.unknown_glyphs()
    }

    /// Lines under the map: where we are, then the latest messages.
    pub fn status_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.contents.area_description.is_empty() {
            lines.push(self.contents.area_description.clone());
        }
        lines.extend(self.messages.recent(self.config.status_lines));
        lines
    }

    fn absorb_events(&mut self, events: Vec<SimEvent>) {
        for event in events {
            match event {
                SimEvent::Message(text) => self.messages.push(text),
                SimEvent::AreaDescription(text) => self.contents.area_description = text,
                SimEvent::OpenVendor => self.overlays.open(OverlayKind::Vendor),
                SimEvent::OpenConversation { text, answers } => {
                    self.contents.conversation = Conversation { text, answers };
                    self.overlays.open(OverlayKind::Conversation);
                }
            }
        }
    }
}

pub struct Controller<S, V, T> {
    state: ClientControllerState,
    sim: S,
    viewport: V,
    storage: T,
}

impl<S, V, T> Controller<S, V, T>
where
    S: Simulation,
    V: Viewport,
    T: Storage,
{
    /// Fetch the map and set up the startup overlays.
    pub fn new(config: ClientConfig, sim: S, viewport: V, storage: T) -> Result<Self, ClientError> {
        let map = MapBuffer::fetch(&sim)?;
        info!(width = map.width(), height = map.height(), "map fetched");
        let mut controller = Self {
            state: ClientControllerState::new(config, map),
            sim,
            viewport,
            storage,
        };
        controller.pull_events();
        Ok(controller)
    }

    pub fn state(&self) -> &ClientControllerState {
        &self.state
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn storage(&self) -> &T {
        &self.storage
    }

    pub fn into_parts(self) -> (S, V, T) {
        (self.sim, self.viewport, self.storage)
    }

    pub fn should_quit(&self) -> bool {
        self.state.quit
    }

    fn camera(&self) -> Camera {
        let (width, height) = self.viewport.dimensions();
        Camera::centered(self.sim.player(), width, height)
    }

    fn pull_events(&mut self) {
        let events = self.sim.drain_events();
        self.state.absorb_events(events);
    }

    /// Draw one frame.
    pub fn render(&mut self) -> Result<(), ClientError> {
        render_frame(&mut self.state, &self.sim, &mut self.viewport)
    }

    /// Process one raw input event to completion.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Result<(), ClientError> {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::PointerDown { pos, button } => {
                self.state.pointer = Some(pos);
                let world = self.camera().to_world(pos);
                match button {
                    PointerButton::Primary => self.request_path(world),
                    PointerButton::Secondary => self.open_description(world),
                }
            }
            InputEvent::PointerMove { pos } => {
                self.state.pointer = Some(pos);
                if self.state.overlays.blocking().is_none() {
                    let pending = self.sim.has_automove();
                    self.state.automove.schedule(now, pending);
                }
                self.render()
            }
            InputEvent::PointerUp { pos } => {
                self.state.pointer = Some(pos);
                self.state.overlays.close(OverlayKind::Description);
                self.render()
            }
            InputEvent::Resize => self.render(),
        }
    }

    fn request_path(&mut self, target: WorldPos) -> Result<(), ClientError> {
        if let Some(kind) = self.state.overlays.blocking() {
            debug!(overlay = %kind, "path request gated");
            return Ok(());
        }
        debug!(x = target.x, y = target.y, "path requested");
        self.sim.request_path_to(target);
        self.pull_events();
        self.render()
    }

    fn open_description(&mut self, target: WorldPos) -> Result<(), ClientError> {
        self.state.contents.description = self.sim.describe(target);
        self.state.overlays.open(OverlayKind::Description);
        self.render()
    }

    fn handle_key(&mut self, key: Key) -> Result<(), ClientError> {
        let modifier = self.viewport.is_held(Key::Shift);

        match self.state.overlays.key_capture() {
            Some(OverlayKind::CharacterCreation) => {
                self.handle_character_creation_key(key);
                return self.render();
            }
            Some(_) => {
                self.handle_console_key(key, modifier);
                return self.render();
            }
            None => {}
        }

        if let Key::Char(c) = key {
            if self.handle_menu_key(c) {
                return self.render();
            }
        }

        let Some(command) = dispatch(key, modifier) else {
            debug!(?key, "unbound key");
            return Ok(());
        };

        match command {
            Command::Ui(action) => {
                self.handle_ui_action(action);
                self.render()
            }
            Command::Sim(command) => {
                if !self.state.overlays.allows(&command) {
                    return Ok(());
                }
                self.send(command);
                self.render()
            }
        }
    }

    /// Forward a command that passed the gate.
    fn send(&mut self, command: SimCommand) {
        if command.is_movement() {
            self.state.manual_move_this_tick = true;
            if self.state.config.automove.cancel_on_manual_input {
                self.state.automove.cancel();
            }
        }
        debug!(?command, "command sent");
        self.sim.process(command);
        self.pull_events();
    }

    fn handle_ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::SaveGame => {
                debug!("save queued");
                self.state.pending_storage.push_back(StorageOp::Save);
            }
            UiAction::Quit => {
                info!("quit requested");
                self.state.quit = true;
            }
            _ => match self.state.overlays.apply(action) {
                Transition::Opened(OverlayKind::Inventory) => {
                    self.state.contents.inventory_mode = InventoryMode::Use;
                    self.state.contents.refresh_inventory(&self.sim);
                }
                Transition::Opened(OverlayKind::ViewList) => {
                    self.state.contents.refresh_view_list(&self.sim);
                }
                transition => debug!(?action, ?transition, "overlay action"),
            },
        }
    }

    /// Digit and mode keys of whichever menu is on top. Returns whether the
    /// key was consumed.
    fn handle_menu_key(&mut self, c: char) -> bool {
        let Some(menu) = MENU_OVERLAYS
            .into_iter()
            .find(|k| self.state.overlays.is_open(*k))
        else {
            return false;
        };

        if menu == OverlayKind::Inventory && c == 'x' {
            let contents = &mut self.state.contents;
            contents.inventory_mode = match contents.inventory_mode {
                InventoryMode::Use => InventoryMode::Drop,
                InventoryMode::Drop => InventoryMode::Use,
            };
            return true;
        }

        let Some(slot) = menu_slot(c) else {
            return false;
        };

        match menu {
            OverlayKind::Vendor => {
                let Some(&(name, price)) = VENDOR_STOCK.get(slot) else {
                    return true;
                };
                self.sim.change_money(price);
                self.sim.give_item(name);
                self.state.messages.push(format!("You buy a {name}."));
            }
            OverlayKind::Conversation => {
                let Some(answer) = self.state.contents.conversation.answers.get(slot).cloned() else {
                    return true;
                };
                self.state.overlays.close(OverlayKind::Conversation);
                self.state.messages.push(answer);
            }
            OverlayKind::Inventory => {
                let Some(item) = self.state.contents.inventory.get(slot) else {
                    return true;
                };
                let id = item.id;
                match self.state.contents.inventory_mode {
                    InventoryMode::Use => self.sim.use_item(id),
                    InventoryMode::Drop => self.sim.drop_item(id),
                }
                self.state.overlays.close(OverlayKind::Inventory);
            }
            OverlayKind::Rest => {
                let Some(&wait) = wait_options().get(slot) else {
                    return true;
                };
                self.state.overlays.close(OverlayKind::Rest);
                let command = SimCommand::Wait(wait);
                if self.state.overlays.allows(&command) {
                    self.send(command);
                }
                return true;
            }
            _ => return false,
        }
        self.pull_events();
        true
    }

    fn handle_character_creation_key(&mut self, key: Key) {
        let character = &mut self.state.contents.character;
        match key {
            Key::Up | Key::Char('k') => character.cursor_up(),
            Key::Down | Key::Char('j') => character.cursor_down(),
            Key::Right | Key::Char('l') => {
                character.cycle(true);
            }
            Key::Left | Key::Char('h') => {
                character.cycle(false);
            }
            Key::Backspace => {
                let line = character.cursor();
                character.choose(line, None);
            }
            Key::Char(c) => {
                if let Some(slot) = menu_slot(c).filter(|s| *s < STANDARD_ARRAY.len()) {
                    let line = character.cursor();
                    character.choose(line, Some(slot));
                }
            }
            Key::Enter => {
                // refused silently until every line holds a distinct value
                if let Some(stats) = character.confirmed_stats() {
                    self.sim.set_player_stats(&stats);
                    self.state.overlays.close(OverlayKind::CharacterCreation);
                    info!(?stats, "character created");
                    self.pull_events();
                }
            }
            _ => {}
        }
    }

    fn handle_console_key(&mut self, key: Key, modifier: bool) {
        let input = &mut self.state.contents.console_input;
        match key {
            Key::Escape => {
                input.clear();
                self.state.overlays.close(OverlayKind::Console);
            }
            Key::Enter => {
                let text = std::mem::take(input);
                self.state.overlays.close(OverlayKind::Console);
                if !text.is_empty() {
                    self.state.messages.push(format!("> {text}"));
                    self.sim.console_input(&text);
                    self.pull_events();
                }
            }
            Key::Backspace => {
                input.pop();
            }
            Key::Char(c) if modifier => input.push(c.to_ascii_uppercase()),
            Key::Char(c) => input.push(c),
            _ => {}
        }
    }

    /// Run deferred work, then draw the frame.
    pub fn tick(&mut self, now: Instant) -> Result<(), ClientError> {
        self.run_storage_ops()?;

        if self.state.automove.is_due(now) {
            if let Some(kind) = self.state.overlays.blocking() {
                debug!(overlay = %kind, "automove step dropped");
                self.state.automove.cancel();
            } else if self.state.manual_move_this_tick {
                debug!("automove step deferred by manual movement");
            } else {
                let outcome = self.state.automove.fire(&mut self.sim);
                debug!(?outcome, "automove step");
            }
        }
        self.state.manual_move_this_tick = false;

        self.pull_events();
        self.render()
    }

    fn run_storage_ops(&mut self) -> Result<(), ClientError> {
        while let Some(op) = self.state.pending_storage.pop_front() {
            let key = self.state.config.save_key.clone();
            let result = op.run(&mut self.sim, &mut self.storage, &key);
            let line = op.report(&result);
            self.state.messages.push(line);

            if op == StorageOp::Restore && result.is_ok() {
                self.state.map = MapBuffer::fetch(&self.sim)?;
                self.state.overlays.close(OverlayKind::CharacterCreation);
                self.pull_events();
            }
        }
        Ok(())
    }
}
