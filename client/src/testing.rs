//! In-memory emulator for tests

use std::collections::HashMap;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kanto_battle::Button;
use kanto_structure::{RawStructureBuilder, STRUCTURE_LEN, TrailingLayout};

use crate::address::AddressMap;
use crate::bus::MemoryBus;
use crate::error::TransportError;

/// Sparse byte memory; unwritten bytes read as zero
#[derive(Debug, Default)]
pub(crate) struct FakeMemory {
    bytes: HashMap<u32, u8>,
}

impl FakeMemory {
    pub fn read_bytes(&self, address: u32, length: usize) -> Vec<u8> {
        (0..length as u32)
            .map(|i| self.bytes.get(&(address + i)).copied().unwrap_or(0))
            .collect()
    }

    pub fn write_bytes(&mut self, address: u32, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.bytes.insert(address + i as u32, *byte);
        }
    }

    pub fn read_u8(&self, address: u32) -> u8 {
        self.read_bytes(address, 1)[0]
    }

    pub fn read_u16(&self, address: u32) -> u16 {
        let b = self.read_bytes(address, 2);
        u16::from_le_bytes([b[0], b[1]])
    }

    pub fn write_u8(&mut self, address: u32, value: u8) {
        self.write_bytes(address, &[value]);
    }

    pub fn write_u16(&mut self, address: u32, value: u16) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    pub fn write_u32(&mut self, address: u32, value: u32) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    /// Current HP of the structure at `base`
    pub fn hp(&self, base: u32) -> u16 {
        self.read_u16(base + TrailingLayout::default().current_hp as u32)
    }

    pub fn set_hp(&mut self, base: u32, hp: u16) {
        self.write_u16(base + TrailingLayout::default().current_hp as u32, hp);
    }
}

type PressHook = Box<dyn FnMut(Button, &mut FakeMemory) + Send>;

/// A [`MemoryBus`] backed by [`FakeMemory`].
///
/// Every press is logged; an optional hook reacts to presses by editing
/// memory the way the game would.
#[derive(Default)]
pub(crate) struct FakeEmulator {
    memory: Mutex<FakeMemory>,
    presses: Mutex<Vec<Button>>,
    failing: Mutex<Vec<Range<u32>>>,
    presses_fail: AtomicBool,
    hook: Mutex<Option<PressHook>>,
}

impl FakeEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emulator sitting in a wild battle at the top-level menu, party slot 1 out
    pub fn in_battle(map: &AddressMap, party: &[[u8; 100]], opponents: &[[u8; 100]]) -> Self {
        let emu = Self::new();
        emu.with_memory(|mem| {
            for (i, raw) in party.iter().enumerate() {
                mem.write_bytes(map.party_slot(i as u8 + 1), raw);
            }
            for (i, raw) in opponents.iter().enumerate() {
                mem.write_bytes(map.opponent_slot(i as u8 + 1), raw);
            }
            mem.write_u8(map.battle.flags.get(), 0x02);
            mem.write_u32(map.battle.type_word.get(), 0x04);
            mem.write_u16(map.battle.active_party_index.get(), 0);
        });
        emu
    }

    pub fn with_memory<T>(&self, f: impl FnOnce(&mut FakeMemory) -> T) -> T {
        let mut memory = self.memory.lock().unwrap();
        f(&mut memory)
    }

    pub fn write_bytes(&self, address: u32, data: &[u8]) {
        self.with_memory(|mem| mem.write_bytes(address, data));
    }

    pub fn write_u8(&self, address: u32, value: u8) {
        self.with_memory(|mem| mem.write_u8(address, value));
    }

    pub fn write_u16(&self, address: u32, value: u16) {
        self.with_memory(|mem| mem.write_u16(address, value));
    }

    pub fn write_u32(&self, address: u32, value: u32) {
        self.with_memory(|mem| mem.write_u32(address, value));
    }

    /// Make reads touching `address..address + length` fail
    pub fn fail_reads(&self, address: u32, length: u32) {
        self.failing.lock().unwrap().push(address..address + length);
    }

    pub fn fail_presses(&self) {
        self.presses_fail.store(true, Ordering::SeqCst);
    }

    pub fn on_press(&self, hook: impl FnMut(Button, &mut FakeMemory) + Send + 'static) {
        *self.hook.lock().unwrap() = Some(Box::new(hook));
    }

    /// Let an [`Arena`] play the game; returns its log of committed actions
    pub fn install(&self, mut arena: Arena) -> Arc<Mutex<Vec<Committed>>> {
        let log = arena.log.clone();
        self.on_press(move |button, mem| arena.react(button, mem));
        log
    }

    pub fn presses(&self) -> Vec<Button> {
        self.presses.lock().unwrap().clone()
    }
}

#[async_trait]
impl MemoryBus for FakeEmulator {
    async fn read_bytes(&self, address: u32, length: usize) -> Result<Vec<u8>, TransportError> {
        let end = address + length as u32;
        let broken = self
            .failing
            .lock()
            .unwrap()
            .iter()
            .any(|range| range.start < end && address < range.end);
        if broken {
            return Err(TransportError::Disconnected);
        }
        Ok(self.with_memory(|mem| mem.read_bytes(address, length)))
    }

    async fn press(&self, button: Button) -> Result<(), TransportError> {
        if self.presses_fail.load(Ordering::SeqCst) {
            return Err(TransportError::Disconnected);
        }
        self.presses.lock().unwrap().push(button);

        let mut hook = self.hook.lock().unwrap();
        if let Some(hook) = hook.as_mut() {
            let mut memory = self.memory.lock().unwrap();
            hook(button, &mut memory);
        }
        Ok(())
    }
}

/// A 100-byte creature structure for fixtures
pub(crate) fn creature(identity: u32, species: u16, level: u8, hp: u16, max_hp: u16) -> [u8; 100] {
    RawStructureBuilder::new(identity, identity.rotate_left(7) ^ 0x5A5A_A5A5)
        .species(species)
        .level(level)
        .hp(hp, max_hp)
        .move_slot(1, 33, 35)
        .move_slot(2, 45, 40)
        .build()
}

/// Action the game accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Committed {
    /// 1-based move position
    Move(u8),
    /// Party slot sent in, in slot order
    Switch(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    BattleMenu,
    MoveMenu,
    PartyMenu,
    SwitchPrompt(u8),
}

/// Minimal model of the battle UI.
///
/// Tracks which menu is open, moves the cursor bytes in response to
/// directional presses and applies damage when an action is committed.
pub(crate) struct Arena {
    map: AddressMap,
    screen: Screen,
    log: Arc<Mutex<Vec<Committed>>>,
    /// Dealt to the opponent when a move is committed
    pub opponent_damage: u16,
    /// Dealt to the player's active creature after any committed action
    pub player_damage: u16,
    /// When false, committing changes nothing in memory
    pub resolves: bool,
    /// Party menu directional presses swallowed before the cursor moves
    pub dropped_party_presses: u32,
    /// Party slot shown on each menu row while the menu is open
    pub menu_order: Option<Vec<u8>>,
    saved_party: Vec<Vec<u8>>,
}

impl Arena {
    pub fn new(map: &AddressMap) -> Self {
        Self {
            map: map.clone(),
            screen: Screen::BattleMenu,
            log: Arc::new(Mutex::new(Vec::new())),
            opponent_damage: 0,
            player_damage: 0,
            resolves: true,
            dropped_party_presses: 0,
            menu_order: None,
            saved_party: Vec::new(),
        }
    }

    fn react(&mut self, button: Button, mem: &mut FakeMemory) {
        match self.screen {
            Screen::BattleMenu => {
                let cursor = self.map.battle.battle_menu_cursor.get();
                if button.is_direction() {
                    move_grid(mem, cursor, button);
                } else if button == Button::A {
                    match mem.read_u8(cursor) {
                        0 => self.screen = Screen::MoveMenu,
                        2 => self.open_party_menu(mem),
                        _ => {}
                    }
                }
            }
            Screen::MoveMenu => {
                let cursor = self.map.battle.move_menu_cursor.get();
                if button.is_direction() {
                    move_grid(mem, cursor, button);
                } else if button == Button::A {
                    let position = mem.read_u8(cursor) + 1;
                    self.commit(Committed::Move(position), mem);
                } else if button == Button::B {
                    self.screen = Screen::BattleMenu;
                }
            }
            Screen::PartyMenu => {
                let cursor = self.map.battle.party_menu_cursor.get();
                match button {
                    Button::Up | Button::Down if self.dropped_party_presses > 0 => {
                        self.dropped_party_presses -= 1;
                    }
                    Button::Up => {
                        let raw = match mem.read_u8(cursor) {
                            7 => 5,
                            0 => 0,
                            n => n - 1,
                        };
                        mem.write_u8(cursor, raw);
                    }
                    Button::Down => {
                        let raw = match mem.read_u8(cursor) {
                            5 | 7 => 7,
                            n => n + 1,
                        };
                        mem.write_u8(cursor, raw);
                    }
                    Button::A => {
                        let row = mem.read_u8(cursor);
                        if row <= 5 {
                            self.screen = Screen::SwitchPrompt(row);
                        }
                    }
                    Button::B => self.close_party_menu(mem),
                    _ => {}
                }
            }
            Screen::SwitchPrompt(row) => match button {
                Button::A => {
                    let slot = self
                        .menu_order
                        .as_ref()
                        .and_then(|order| order.get(row as usize).copied())
                        .unwrap_or(row + 1);
                    self.close_party_menu(mem);
                    mem.write_u16(self.map.battle.active_party_index.get(), (slot - 1) as u16);
                    self.commit(Committed::Switch(slot), mem);
                }
                Button::B => self.screen = Screen::PartyMenu,
                _ => {}
            },
        }
    }

    fn open_party_menu(&mut self, mem: &mut FakeMemory) {
        self.screen = Screen::PartyMenu;
        let Some(order) = self.menu_order.clone() else {
            return;
        };

        self.saved_party = (1..=6)
            .map(|slot| mem.read_bytes(self.map.party_slot(slot), STRUCTURE_LEN))
            .collect();
        for (row, slot) in order.iter().enumerate() {
            let raw = self.saved_party[(*slot - 1) as usize].clone();
            mem.write_bytes(self.map.party_slot(row as u8 + 1), &raw);
        }
    }

    fn close_party_menu(&mut self, mem: &mut FakeMemory) {
        self.screen = Screen::BattleMenu;
        for (i, raw) in std::mem::take(&mut self.saved_party).iter().enumerate() {
            mem.write_bytes(self.map.party_slot(i as u8 + 1), raw);
        }
    }

    fn commit(&mut self, action: Committed, mem: &mut FakeMemory) {
        self.log.lock().unwrap().push(action);
        self.screen = Screen::BattleMenu;
        if !self.resolves {
            return;
        }

        if let Committed::Move(_) = action {
            let opponent = self.map.opponent_slot(1);
            mem.set_hp(opponent, mem.hp(opponent).saturating_sub(self.opponent_damage));
        }

        let index = mem.read_u16(self.map.battle.active_party_index.get());
        let player = self.map.party_slot(index as u8 + 1);
        mem.set_hp(player, mem.hp(player).saturating_sub(self.player_damage));
    }
}

fn move_grid(mem: &mut FakeMemory, cursor: u32, button: Button) {
    let raw = mem.read_u8(cursor).min(3);
    let (row, col) = (raw / 2, raw % 2);
    let (row, col) = match button {
        Button::Up => (0, col),
        Button::Down => (1, col),
        Button::Left => (row, 0),
        Button::Right => (row, 1),
        _ => (row, col),
    };
    mem.write_u8(cursor, row * 2 + col);
}
