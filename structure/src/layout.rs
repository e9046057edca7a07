//! Byte layout of the creature structure

/// Total size of one creature structure
pub const STRUCTURE_LEN: usize = 100;

/// Header field offsets
pub const IDENTITY_OFFSET: usize = 0x00;
pub const SECONDARY_KEY_OFFSET: usize = 0x04;
pub const CHECKSUM_OFFSET: usize = 0x1C;

/// Encrypted payload window
pub const ENCRYPTED_START: usize = 0x20;
pub const ENCRYPTED_LEN: usize = 48;
pub const SUBSTRUCTURE_LEN: usize = 12;

/// Start of the unencrypted battle block
pub const TRAILING_START: usize = ENCRYPTED_START + ENCRYPTED_LEN;

/// Highest species id that names a real creature (internal numbering)
pub const MAX_SPECIES_ID: u16 = 411;

// Offsets inside canonical substructures
pub(crate) const GROWTH_SPECIES: usize = 0;
pub(crate) const GROWTH_HELD_ITEM: usize = 2;
pub(crate) const GROWTH_EXPERIENCE: usize = 4;
pub(crate) const GROWTH_FRIENDSHIP: usize = 9;
pub(crate) const ATTACKS_MOVES: usize = 0;
pub(crate) const ATTACKS_PP: usize = 8;
pub(crate) const EFFORT_VALUES: usize = 0;
pub(crate) const MISC_STATUS: usize = 0;

/// Offsets of the fields in the unencrypted battle block.
///
/// Offsets are absolute within the 100-byte structure. The default matches
/// the game; an address map may override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrailingLayout {
    pub level: usize,
    pub current_hp: usize,
    pub max_hp: usize,
    pub attack: usize,
    pub defense: usize,
    pub speed: usize,
    pub sp_attack: usize,
    pub sp_defense: usize,
}

impl TrailingLayout {
    /// Check that every field lies inside the battle block
    pub fn is_valid(&self) -> bool {
        let in_block = |offset: usize, width: usize| {
            offset >= TRAILING_START && offset + width <= STRUCTURE_LEN
        };

        in_block(self.level, 1)
            && [
                self.current_hp,
                self.max_hp,
                self.attack,
                self.defense,
                self.speed,
                self.sp_attack,
                self.sp_defense,
            ]
            .iter()
            .all(|&offset| in_block(offset, 2))
    }
}

impl Default for TrailingLayout {
    fn default() -> Self {
        Self {
            level: 0x54,
            current_hp: 0x56,
            max_hp: 0x58,
            attack: 0x5A,
            defense: 0x5C,
            speed: 0x5E,
            sp_attack: 0x60,
            sp_defense: 0x62,
        }
    }
}

/// Read a little-endian u16, or 0 when the range falls outside `bytes`
pub(crate) fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    bytes
        .get(offset..offset + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .unwrap_or(0)
}

/// Read a little-endian u32, or 0 when the range falls outside `bytes`
pub(crate) fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    bytes
        .get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .unwrap_or(0)
}

pub(crate) fn byte_at(bytes: &[u8], offset: usize) -> u8 {
    bytes.get(offset).copied().unwrap_or(0)
}
