//! Battle status summary

use crate::tracking::BattleKind;

/// Summary returned by a battle status query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BattleStatus {
    pub active: bool,
    pub kind: BattleKind,
    pub can_flee: bool,
    pub turn_number: u32,
    /// Occupied opponent slots
    pub opponent_party_count: u8,
    /// Opponent slots that can still fight
    pub opponent_alive_count: u8,
}

impl BattleStatus {
    /// Status reported outside of battle
    pub fn inactive() -> Self {
        Self {
            active: false,
            kind: BattleKind::None,
            can_flee: false,
            turn_number: 0,
            opponent_party_count: 0,
            opponent_alive_count: 0,
        }
    }
}
