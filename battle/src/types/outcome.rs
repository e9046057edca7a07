//! Turn outcome computed from two snapshots

use kanto_structure::StatusCondition;

use super::snapshot::TurnSnapshot;

/// What happened during one turn.
///
/// Every field is derived from a pre/post snapshot pair; the only way to
/// obtain one is [`TurnOutcome::between`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TurnOutcome {
    damage_dealt: u16,
    damage_received: u16,
    player_hp_remaining: u16,
    player_max_hp: u16,
    opponent_hp_remaining: u16,
    opponent_max_hp: u16,
    player_fainted: bool,
    opponent_fainted: bool,
    player_status_changed: bool,
    opponent_status_changed: bool,
    new_player_status: StatusCondition,
    new_opponent_status: StatusCondition,
}

impl TurnOutcome {
    /// Diff two snapshots. HP gains count as zero damage.
    pub fn between(pre: &TurnSnapshot, post: &TurnSnapshot) -> Self {
        Self {
            damage_dealt: pre.opponent_hp.saturating_sub(post.opponent_hp),
            damage_received: pre.player_hp.saturating_sub(post.player_hp),
            player_hp_remaining: post.player_hp,
            player_max_hp: post.player_max_hp,
            opponent_hp_remaining: post.opponent_hp,
            opponent_max_hp: post.opponent_max_hp,
            player_fainted: post.player_hp == 0,
            opponent_fainted: post.opponent_hp == 0,
            player_status_changed: pre.player_status != post.player_status,
            opponent_status_changed: pre.opponent_status != post.opponent_status,
            new_player_status: post.player_status,
            new_opponent_status: post.opponent_status,
        }
    }

    pub fn damage_dealt(&self) -> u16 {
        self.damage_dealt
    }

    pub fn damage_received(&self) -> u16 {
        self.damage_received
    }

    pub fn player_hp_remaining(&self) -> u16 {
        self.player_hp_remaining
    }

    pub fn player_max_hp(&self) -> u16 {
        self.player_max_hp
    }

    pub fn opponent_hp_remaining(&self) -> u16 {
        self.opponent_hp_remaining
    }

    pub fn opponent_max_hp(&self) -> u16 {
        self.opponent_max_hp
    }

    pub fn player_fainted(&self) -> bool {
        self.player_fainted
    }

    pub fn opponent_fainted(&self) -> bool {
        self.opponent_fainted
    }

    pub fn player_status_changed(&self) -> bool {
        self.player_status_changed
    }

    pub fn opponent_status_changed(&self) -> bool {
        self.opponent_status_changed
    }

    pub fn new_player_status(&self) -> StatusCondition {
        self.new_player_status
    }

    pub fn new_opponent_status(&self) -> StatusCondition {
        self.new_opponent_status
    }
}
