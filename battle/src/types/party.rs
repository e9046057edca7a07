//! Player party views

use kanto_structure::CreatureRecord;

/// A party member with its stable slot number.
///
/// The slot (1-6) is the position in party order and does not follow the
/// order the party menu happens to display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartyEntry {
    pub slot: u8,
    pub record: CreatureRecord,
}

impl PartyEntry {
    pub fn new(slot: u8, record: CreatureRecord) -> Self {
        Self { slot, record }
    }

    pub fn can_battle(&self) -> bool {
        self.record.can_battle()
    }

    pub fn is_fainted(&self) -> bool {
        !self.record.can_battle()
    }
}

/// The whole party, fainted members included since the menu shows them
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartyState {
    pub entries: Vec<PartyEntry>,
    /// Slot currently fighting
    pub active_slot: u8,
}

impl PartyState {
    pub fn new(entries: Vec<PartyEntry>, active_slot: u8) -> Self {
        Self {
            entries,
            active_slot,
        }
    }

    /// Find an entry by slot number
    pub fn get(&self, slot: u8) -> Option<&PartyEntry> {
        self.entries.iter().find(|e| e.slot == slot)
    }

    /// The entry currently in battle
    pub fn active(&self) -> Option<&PartyEntry> {
        self.get(self.active_slot)
    }

    /// Members that could be switched in
    pub fn switch_candidates(&self) -> impl Iterator<Item = &PartyEntry> {
        self.entries
            .iter()
            .filter(move |e| e.slot != self.active_slot && e.can_battle())
    }

    /// Count non-fainted members
    pub fn alive_count(&self) -> usize {
        self.entries.iter().filter(|e| e.can_battle()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
