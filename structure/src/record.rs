//! Decoded creature record

use crate::layout::MAX_SPECIES_ID;

/// Non-volatile status condition, taken from the low 3 bits of the status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusCondition {
    #[default]
    Healthy,
    Asleep,
    Poisoned,
    Burned,
    Frozen,
    Paralyzed,
    BadlyPoisoned,
    Unknown,
}

impl StatusCondition {
    /// Map a raw status byte. Only the low 3 bits are significant; the one
    /// code without a condition maps to `Unknown`.
    pub fn from_byte(raw: u8) -> Self {
        match raw & 0x07 {
            0 => StatusCondition::Healthy,
            1 => StatusCondition::Asleep,
            2 => StatusCondition::Poisoned,
            3 => StatusCondition::Burned,
            4 => StatusCondition::Frozen,
            5 => StatusCondition::Paralyzed,
            6 => StatusCondition::BadlyPoisoned,
            _ => StatusCondition::Unknown,
        }
    }

    /// Raw code written by the encoder (`Unknown` uses the unmapped code 7)
    pub fn to_byte(self) -> u8 {
        match self {
            StatusCondition::Healthy => 0,
            StatusCondition::Asleep => 1,
            StatusCondition::Poisoned => 2,
            StatusCondition::Burned => 3,
            StatusCondition::Frozen => 4,
            StatusCondition::Paralyzed => 5,
            StatusCondition::BadlyPoisoned => 6,
            StatusCondition::Unknown => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCondition::Healthy => "healthy",
            StatusCondition::Asleep => "asleep",
            StatusCondition::Poisoned => "poisoned",
            StatusCondition::Burned => "burned",
            StatusCondition::Frozen => "frozen",
            StatusCondition::Paralyzed => "paralyzed",
            StatusCondition::BadlyPoisoned => "badly_poisoned",
            StatusCondition::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The five battle stats from the unencrypted block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStats {
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
}

/// Effort values, in storage order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffortValues {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
}

/// A known move in one of the four move slots
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveSlot {
    /// Slot in the move menu (1-4)
    pub slot: u8,
    pub id: u16,
    pub name: String,
    /// Remaining uses
    pub pp: u8,
}

/// A creature as reconstructed from one read of its memory block.
///
/// A fresh record is built on every read. Flags such as [`exists`](Self::exists)
/// are derived from the fields, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureRecord {
    /// Per-creature identity value (first header word)
    pub identity: u32,
    /// Second header word, the other half of the payload key
    pub secondary_key: u32,

    pub species_id: u16,
    pub species_name: String,
    pub level: u8,
    pub current_hp: u16,
    pub max_hp: u16,
    pub stats: BattleStats,
    pub status: StatusCondition,

    /// Moves in slot order; empty slots are omitted
    pub moves: Vec<MoveSlot>,

    pub held_item: u16,
    pub experience: u32,
    pub friendship: u8,
    pub effort: EffortValues,

    /// Whether the stored checksum matches the decrypted payload
    pub checksum_valid: bool,
}

impl CreatureRecord {
    /// Species id names a real creature (regardless of HP)
    pub fn is_occupied(&self) -> bool {
        (1..=MAX_SPECIES_ID).contains(&self.species_id)
    }

    /// The slot holds a living creature of a valid species
    pub fn exists(&self) -> bool {
        self.current_hp > 0 && self.is_occupied()
    }

    /// The creature can still fight
    pub fn can_battle(&self) -> bool {
        self.current_hp > 0
    }

    /// Identifying tuple used to find this creature again after the party
    /// menu reorders entries
    pub fn fingerprint(&self) -> (u16, u8, u16, u16) {
        (self.species_id, self.level, self.current_hp, self.max_hp)
    }

    /// Find a move by its menu slot (1-4)
    pub fn move_in_slot(&self, slot: u8) -> Option<&MoveSlot> {
        self.moves.iter().find(|m| m.slot == slot)
    }
}
