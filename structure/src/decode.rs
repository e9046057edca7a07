//! Structure decoding

use crate::MalformedStructureError;
use crate::cipher;
use crate::layout::{
    ATTACKS_MOVES, ATTACKS_PP, CHECKSUM_OFFSET, EFFORT_VALUES, ENCRYPTED_LEN, ENCRYPTED_START,
    GROWTH_EXPERIENCE, GROWTH_FRIENDSHIP, GROWTH_HELD_ITEM, GROWTH_SPECIES, IDENTITY_OFFSET,
    MISC_STATUS, SECONDARY_KEY_OFFSET, STRUCTURE_LEN, SUBSTRUCTURE_LEN, TrailingLayout, byte_at,
    le_u16, le_u32,
};
use crate::names::{move_name, species_name};
use crate::record::{BattleStats, CreatureRecord, EffortValues, MoveSlot, StatusCondition};
use crate::substructure::{self, Substructure};

/// Decode a 100-byte creature structure using the default battle-block layout
pub fn decode(raw: &[u8]) -> Result<CreatureRecord, MalformedStructureError> {
    decode_with_layout(raw, &TrailingLayout::default())
}

/// Decode a 100-byte creature structure.
///
/// Fails only when `raw` has the wrong length. Content is never rejected:
/// garbage bytes produce a record whose [`CreatureRecord::exists`] is false
/// or whose `checksum_valid` is false.
pub fn decode_with_layout(
    raw: &[u8],
    layout: &TrailingLayout,
) -> Result<CreatureRecord, MalformedStructureError> {
    if raw.len() != STRUCTURE_LEN {
        return Err(MalformedStructureError::WrongLength {
            expected: STRUCTURE_LEN,
            actual: raw.len(),
        });
    }

    let identity = le_u32(raw, IDENTITY_OFFSET);
    let secondary_key = le_u32(raw, SECONDARY_KEY_OFFSET);

    let mut payload = [0u8; ENCRYPTED_LEN];
    payload.copy_from_slice(&raw[ENCRYPTED_START..ENCRYPTED_START + ENCRYPTED_LEN]);
    cipher::apply(&mut payload, cipher::derive_key(identity, secondary_key));

    let checksum_valid = cipher::checksum(&payload) == le_u16(raw, CHECKSUM_OFFSET);

    let canonical = substructure::unshuffle(&payload, substructure::order_for(identity));
    let section = |role: Substructure| {
        let start = role.index() * SUBSTRUCTURE_LEN;
        &canonical[start..start + SUBSTRUCTURE_LEN]
    };

    let growth = section(Substructure::Growth);
    let attacks = section(Substructure::Attacks);
    let effort = section(Substructure::Effort);
    let misc = section(Substructure::Misc);

    let species_id = le_u16(growth, GROWTH_SPECIES);

    Ok(CreatureRecord {
        identity,
        secondary_key,
        species_id,
        species_name: species_name(species_id).into_owned(),
        level: byte_at(raw, layout.level),
        current_hp: le_u16(raw, layout.current_hp),
        max_hp: le_u16(raw, layout.max_hp),
        stats: BattleStats {
            attack: le_u16(raw, layout.attack),
            defense: le_u16(raw, layout.defense),
            speed: le_u16(raw, layout.speed),
            sp_attack: le_u16(raw, layout.sp_attack),
            sp_defense: le_u16(raw, layout.sp_defense),
        },
        status: StatusCondition::from_byte(byte_at(misc, MISC_STATUS)),
        moves: parse_moves(attacks),
        held_item: le_u16(growth, GROWTH_HELD_ITEM),
        experience: le_u32(growth, GROWTH_EXPERIENCE),
        friendship: byte_at(growth, GROWTH_FRIENDSHIP),
        effort: EffortValues {
            hp: byte_at(effort, EFFORT_VALUES),
            attack: byte_at(effort, EFFORT_VALUES + 1),
            defense: byte_at(effort, EFFORT_VALUES + 2),
            speed: byte_at(effort, EFFORT_VALUES + 3),
            sp_attack: byte_at(effort, EFFORT_VALUES + 4),
            sp_defense: byte_at(effort, EFFORT_VALUES + 5),
        },
        checksum_valid,
    })
}

/// Moves with id 0 are empty slots and are left out
fn parse_moves(attacks: &[u8]) -> Vec<MoveSlot> {
    (0..4)
        .filter_map(|i| {
            let id = le_u16(attacks, ATTACKS_MOVES + i * 2);
            (id != 0).then(|| MoveSlot {
                slot: i as u8 + 1,
                id,
                name: move_name(id).into_owned(),
                pp: byte_at(attacks, ATTACKS_PP + i),
            })
        })
        .collect()
}
