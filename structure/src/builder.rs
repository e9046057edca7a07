//! Encoder producing raw creature structures

use crate::cipher;
use crate::layout::{
    ATTACKS_MOVES, ATTACKS_PP, CHECKSUM_OFFSET, EFFORT_VALUES, ENCRYPTED_LEN, ENCRYPTED_START,
    GROWTH_EXPERIENCE, GROWTH_FRIENDSHIP, GROWTH_HELD_ITEM, GROWTH_SPECIES, IDENTITY_OFFSET,
    MISC_STATUS, SECONDARY_KEY_OFFSET, STRUCTURE_LEN, SUBSTRUCTURE_LEN, TrailingLayout,
};
use crate::record::{BattleStats, CreatureRecord, EffortValues, StatusCondition};
use crate::substructure::{self, Substructure};

/// Builds a 100-byte structure the way the game stores it: canonical
/// substructures are shuffled by `identity % 24`, checksummed and encrypted.
///
/// # Example
///
/// ```
/// use kanto_structure::{RawStructureBuilder, decode};
///
/// let raw = RawStructureBuilder::new(0x1234_5678, 0)
///     .species(1)
///     .level(50)
///     .hp(100, 120)
///     .build();
///
/// let record = decode(&raw).unwrap();
/// assert_eq!(record.species_id, 1);
/// assert!(record.exists());
/// ```
#[derive(Debug, Clone)]
pub struct RawStructureBuilder {
    identity: u32,
    secondary_key: u32,
    species_id: u16,
    held_item: u16,
    experience: u32,
    friendship: u8,
    moves: [(u16, u8); 4],
    effort: EffortValues,
    status: StatusCondition,
    level: u8,
    current_hp: u16,
    max_hp: u16,
    stats: BattleStats,
    layout: TrailingLayout,
}

impl RawStructureBuilder {
    pub fn new(identity: u32, secondary_key: u32) -> Self {
        Self {
            identity,
            secondary_key,
            species_id: 0,
            held_item: 0,
            experience: 0,
            friendship: 0,
            moves: [(0, 0); 4],
            effort: EffortValues::default(),
            status: StatusCondition::Healthy,
            level: 0,
            current_hp: 0,
            max_hp: 0,
            stats: BattleStats::default(),
            layout: TrailingLayout::default(),
        }
    }

    /// Start from an existing record, e.g. to re-encode it with changes
    pub fn from_record(record: &CreatureRecord) -> Self {
        let mut builder = Self::new(record.identity, record.secondary_key)
            .species(record.species_id)
            .held_item(record.held_item)
            .experience(record.experience)
            .friendship(record.friendship)
            .effort(record.effort)
            .status(record.status)
            .level(record.level)
            .hp(record.current_hp, record.max_hp)
            .stats(record.stats);
        for m in &record.moves {
            builder = builder.move_slot(m.slot, m.id, m.pp);
        }
        builder
    }

    pub fn species(mut self, species_id: u16) -> Self {
        self.species_id = species_id;
        self
    }

    pub fn held_item(mut self, item: u16) -> Self {
        self.held_item = item;
        self
    }

    pub fn experience(mut self, experience: u32) -> Self {
        self.experience = experience;
        self
    }

    pub fn friendship(mut self, friendship: u8) -> Self {
        self.friendship = friendship;
        self
    }

    /// Set the move in a menu slot (1-4); other slots are ignored
    pub fn move_slot(mut self, slot: u8, id: u16, pp: u8) -> Self {
        if (1..=4).contains(&slot) {
            self.moves[slot as usize - 1] = (id, pp);
        }
        self
    }

    pub fn effort(mut self, effort: EffortValues) -> Self {
        self.effort = effort;
        self
    }

    pub fn status(mut self, status: StatusCondition) -> Self {
        self.status = status;
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn hp(mut self, current: u16, max: u16) -> Self {
        self.current_hp = current;
        self.max_hp = max;
        self
    }

    pub fn stats(mut self, stats: BattleStats) -> Self {
        self.stats = stats;
        self
    }

    /// Write the battle block with a non-default layout
    pub fn layout(mut self, layout: TrailingLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Canonical (unshuffled, decrypted) payload
    fn canonical_payload(&self) -> [u8; ENCRYPTED_LEN] {
        let mut canonical = [0u8; ENCRYPTED_LEN];
        let base = |role: Substructure| role.index() * SUBSTRUCTURE_LEN;

        let growth = base(Substructure::Growth);
        put_u16(&mut canonical, growth + GROWTH_SPECIES, self.species_id);
        put_u16(&mut canonical, growth + GROWTH_HELD_ITEM, self.held_item);
        put_u32(&mut canonical, growth + GROWTH_EXPERIENCE, self.experience);
        canonical[growth + GROWTH_FRIENDSHIP] = self.friendship;

        let attacks = base(Substructure::Attacks);
        for (i, (id, pp)) in self.moves.iter().enumerate() {
            put_u16(&mut canonical, attacks + ATTACKS_MOVES + i * 2, *id);
            canonical[attacks + ATTACKS_PP + i] = *pp;
        }

        let effort = base(Substructure::Effort) + EFFORT_VALUES;
        canonical[effort..effort + 6].copy_from_slice(&[
            self.effort.hp,
            self.effort.attack,
            self.effort.defense,
            self.effort.speed,
            self.effort.sp_attack,
            self.effort.sp_defense,
        ]);

        canonical[base(Substructure::Misc) + MISC_STATUS] = self.status.to_byte();
        canonical
    }

    pub fn build(&self) -> [u8; STRUCTURE_LEN] {
        let mut raw = [0u8; STRUCTURE_LEN];
        put_u32(&mut raw, IDENTITY_OFFSET, self.identity);
        put_u32(&mut raw, SECONDARY_KEY_OFFSET, self.secondary_key);

        let canonical = self.canonical_payload();
        put_u16(&mut raw, CHECKSUM_OFFSET, cipher::checksum(&canonical));

        let mut payload = substructure::shuffle(&canonical, substructure::order_for(self.identity));
        cipher::apply(&mut payload, cipher::derive_key(self.identity, self.secondary_key));
        raw[ENCRYPTED_START..ENCRYPTED_START + ENCRYPTED_LEN].copy_from_slice(&payload);

        let layout = &self.layout;
        if let Some(level) = raw.get_mut(layout.level) {
            *level = self.level;
        }
        put_u16(&mut raw, layout.current_hp, self.current_hp);
        put_u16(&mut raw, layout.max_hp, self.max_hp);
        put_u16(&mut raw, layout.attack, self.stats.attack);
        put_u16(&mut raw, layout.defense, self.stats.defense);
        put_u16(&mut raw, layout.speed, self.stats.speed);
        put_u16(&mut raw, layout.sp_attack, self.stats.sp_attack);
        put_u16(&mut raw, layout.sp_defense, self.stats.sp_defense);

        raw
    }
}

fn put_u16(bytes: &mut [u8], offset: usize, value: u16) {
    if let Some(dst) = bytes.get_mut(offset..offset + 2) {
        dst.copy_from_slice(&value.to_le_bytes());
    }
}

fn put_u32(bytes: &mut [u8], offset: usize, value: u32) {
    if let Some(dst) = bytes.get_mut(offset..offset + 4) {
        dst.copy_from_slice(&value.to_le_bytes());
    }
}
