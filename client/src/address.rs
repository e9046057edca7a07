//! Memory address map
//!
//! Addresses accept `"0x02024284"` style strings or plain integers in JSON.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use kanto_structure::{STRUCTURE_LEN, TrailingLayout};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 32-bit bus address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub u32);

impl Address {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Address `n` structures past this one
    pub fn offset_by_structures(self, n: u32) -> Address {
        Address(self.0 + n * STRUCTURE_LEN as u32)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16).map(Address),
            None => s.parse().map(Address),
        }
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AddressRepr {
    Int(u32),
    Text(String),
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match AddressRepr::deserialize(deserializer)? {
            AddressRepr::Int(value) => Ok(Address(value)),
            AddressRepr::Text(text) => text
                .parse()
                .map_err(|e| D::Error::custom(format!("invalid address {:?}: {}", text, e))),
        }
    }
}

/// Battle-wide state and menu cursors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleAddresses {
    /// Nonzero byte while a battle runs
    pub flags: Address,
    /// 32-bit battle type word; bit 3 marks trainer battles
    #[serde(alias = "type")]
    pub type_word: Address,
    /// 16-bit index of the party member in battle
    pub active_party_index: Address,
    pub battle_menu_cursor: Address,
    pub move_menu_cursor: Address,
    #[serde(alias = "pokemon_menu_cursor")]
    pub party_menu_cursor: Address,
}

impl Default for BattleAddresses {
    fn default() -> Self {
        Self {
            flags: Address(0x0300_3529),
            type_word: Address(0x0202_2B4C),
            active_party_index: Address(0x0202_3BCE),
            battle_menu_cursor: Address(0x0202_3FF8),
            move_menu_cursor: Address(0x0202_3FFC),
            party_menu_cursor: Address(0x0203_B0A9),
        }
    }
}

/// Where everything lives in emulated memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressMap {
    /// Player party structures, slot 1 first
    #[serde(alias = "party_pokemon")]
    pub party: [Address; 6],
    /// Opponent party structures; index 0 is the creature in battle
    #[serde(alias = "enemy_pokemon")]
    pub opponent: [Address; 6],
    pub battle: BattleAddresses,
    #[serde(alias = "pokemon_structure")]
    pub layout: TrailingLayout,
}

const PARTY_BASE: Address = Address(0x0202_4284);
const OPPONENT_BASE: Address = Address(0x0202_402C);

impl Default for AddressMap {
    /// FireRed (US 1.0)
    fn default() -> Self {
        Self {
            party: std::array::from_fn(|i| PARTY_BASE.offset_by_structures(i as u32)),
            opponent: std::array::from_fn(|i| OPPONENT_BASE.offset_by_structures(i as u32)),
            battle: BattleAddresses::default(),
            layout: TrailingLayout::default(),
        }
    }
}

impl AddressMap {
    /// Parse an override file. Missing keys keep their FireRed defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: AddressMap = serde_json::from_str(json).context("Failed to parse address map")?;
        map.validate()?;
        Ok(map)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read address map {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid address map {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.layout.is_valid(),
            "trailing layout offsets must lie within bytes {}..{}",
            kanto_structure::TRAILING_START,
            STRUCTURE_LEN
        );
        Ok(())
    }

    /// Structure address of party slot 1-6. Out-of-range slots clamp.
    pub fn party_slot(&self, slot: u8) -> u32 {
        self.party[slot_index(slot)].get()
    }

    /// Structure address of opponent slot 1-6. Out-of-range slots clamp.
    pub fn opponent_slot(&self, slot: u8) -> u32 {
        self.opponent[slot_index(slot)].get()
    }
}

fn slot_index(slot: u8) -> usize {
    (slot.clamp(1, 6) - 1) as usize
}
