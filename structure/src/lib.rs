//! Decoder for the in-memory creature structure of FireRed (US 1.0).
//!
//! A creature occupies a fixed 100-byte block:
//!
//! ```text
//! 0x00  identity value (u32 LE)        ┐ plain header
//! 0x04  secondary key  (u32 LE)        │
//! 0x1C  checksum       (u16 LE)        ┘
//! 0x20  48-byte payload, XOR-encrypted and split into four
//!       12-byte substructures stored in a permuted order
//! 0x50  battle block (level, HP, stats), never encrypted
//! ```
//!
//! [`decode`] turns such a block into a [`CreatureRecord`]. Any byte pattern
//! of the right length decodes to *some* record; callers decide what to do
//! with it through [`CreatureRecord::exists`] and friends.
//!
//! [`RawStructureBuilder`] performs the inverse and is mostly useful for
//! producing fixtures.

pub mod builder;
pub mod cipher;
pub mod decode;
pub mod layout;
pub mod names;
pub mod record;
pub mod substructure;

use thiserror::Error;

pub use builder::RawStructureBuilder;
pub use decode::{decode, decode_with_layout};
pub use layout::{
    ENCRYPTED_LEN, ENCRYPTED_START, MAX_SPECIES_ID, STRUCTURE_LEN, SUBSTRUCTURE_LEN,
    TRAILING_START, TrailingLayout,
};
pub use names::{move_name, species_name};
pub use record::{BattleStats, CreatureRecord, EffortValues, MoveSlot, StatusCondition};
pub use substructure::{ORDER_TABLE, Substructure};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedStructureError {
    #[error("creature structure must be {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}
