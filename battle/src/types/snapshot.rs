//! Point-in-time battle snapshot

use std::time::SystemTime;

use kanto_structure::{CreatureRecord, StatusCondition};

/// HP and status of both combatants at one instant
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TurnSnapshot {
    pub active_slot: u8,
    pub player_hp: u16,
    pub player_max_hp: u16,
    pub player_status: StatusCondition,
    pub opponent_hp: u16,
    pub opponent_max_hp: u16,
    pub opponent_status: StatusCondition,
    pub captured_at: SystemTime,
}

impl TurnSnapshot {
    /// Capture from the active party member and the leading opponent
    pub fn capture(active_slot: u8, player: &CreatureRecord, opponent: &CreatureRecord) -> Self {
        Self {
            active_slot,
            player_hp: player.current_hp,
            player_max_hp: player.max_hp,
            player_status: player.status,
            opponent_hp: opponent.current_hp,
            opponent_max_hp: opponent.max_hp,
            opponent_status: opponent.status,
            captured_at: SystemTime::now(),
        }
    }

    /// Whether HP moved on either side since `earlier`
    pub fn hp_changed_since(&self, earlier: &TurnSnapshot) -> bool {
        self.player_hp != earlier.player_hp || self.opponent_hp != earlier.opponent_hp
    }
}
