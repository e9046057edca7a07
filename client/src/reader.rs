//! Reads decoded state out of emulator memory

use kanto_battle::{PartyEntry, TurnSnapshot};
use kanto_structure::{CreatureRecord, STRUCTURE_LEN, decode_with_layout};

use crate::address::AddressMap;
use crate::bus::MemoryBus;
use crate::error::TransportError;

/// Captures creature records and turn snapshots
pub struct StateReader<'a, B: ?Sized> {
    bus: &'a B,
    map: &'a AddressMap,
}

impl<'a, B: MemoryBus + ?Sized> StateReader<'a, B> {
    pub fn new(bus: &'a B, map: &'a AddressMap) -> Self {
        Self { bus, map }
    }

    /// Decode the structure stored at `address`
    pub async fn read_creature(&self, address: u32) -> Result<CreatureRecord, TransportError> {
        let raw = self.bus.read_bytes(address, STRUCTURE_LEN).await?;
        decode_with_layout(&raw, &self.map.layout).map_err(|_| TransportError::ShortRead {
            address,
            expected: STRUCTURE_LEN,
            actual: raw.len(),
        })
    }

    /// Party member in slot 1-6
    pub async fn party_member(&self, slot: u8) -> Result<CreatureRecord, TransportError> {
        self.read_creature(self.map.party_slot(slot)).await
    }

    /// Opponent in slot 1-6; slot 1 is the one in battle
    pub async fn opponent(&self, slot: u8) -> Result<CreatureRecord, TransportError> {
        self.read_creature(self.map.opponent_slot(slot)).await
    }

    /// Slot (1-6) of the party member in battle, slot 1 if unreadable
    pub async fn active_slot(&self) -> u8 {
        let address = self.map.battle.active_party_index;
        match self.bus.read_u16(address.get()).await {
            Ok(index @ 0..=5) => index as u8 + 1,
            Ok(index) => {
                tracing::warn!(%address, index, "Active party index out of range, assuming slot 1");
                1
            }
            Err(e) => {
                tracing::warn!(%address, error = %e, "Failed to read active party index, assuming slot 1");
                1
            }
        }
    }

    /// Occupied party slots in slot order, fainted members included
    pub async fn party(&self) -> Result<Vec<PartyEntry>, TransportError> {
        let mut entries = Vec::with_capacity(6);
        for slot in 1..=6 {
            let record = self.party_member(slot).await?;
            if record.is_occupied() {
                entries.push(PartyEntry::new(slot, record));
            }
        }
        Ok(entries)
    }

    /// HP and status of the active member and the leading opponent
    pub async fn snapshot(&self) -> Result<TurnSnapshot, TransportError> {
        let active_slot = self.active_slot().await;
        let player = self.party_member(active_slot).await?;
        let opponent = self.opponent(1).await?;
        Ok(TurnSnapshot::capture(active_slot, &player, &opponent))
    }

    /// (occupied, able to fight) opponent slots.
    ///
    /// Counting stops at the first slot that cannot be read.
    pub async fn opponent_counts(&self) -> (u8, u8) {
        let mut occupied = 0;
        let mut alive = 0;
        for slot in 1..=6 {
            match self.opponent(slot).await {
                Ok(record) if record.is_occupied() => {
                    occupied += 1;
                    if record.can_battle() {
                        alive += 1;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(slot, error = %e, "Failed to read opponent slot, stopping count");
                    break;
                }
            }
        }
        (occupied, alive)
    }
}
