//! Turn execution state machine
//!
//! ```text
//! Idle → MenuOpen → SubmenuOpen → AwaitingResolution → Resolved
//!                                                    ↘ Failed
//! ```
//!
//! Arguments and battle preconditions are checked before the first press.
//! Once input has been issued a turn runs until it resolves or times out.

use std::time::Duration;

use kanto_battle::{
    BattleMenuOption, Button, GridPosition, ListPosition, Menu, TransitionTracker, TurnOutcome,
    TurnSnapshot,
};
use serde::Serialize;
use tokio::time::sleep;

use crate::address::AddressMap;
use crate::bus::MemoryBus;
use crate::config::Timings;
use crate::detector::{BattleDetector, wait_until};
use crate::error::{TurnError, TurnFailure, validate_range};
use crate::navigator::Navigator;
use crate::reader::StateReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    MenuOpen,
    SubmenuOpen,
    AwaitingResolution,
    Resolved,
    Failed,
}

/// What the player did this turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnAction {
    Attack { move_index: u8 },
    Switch { slot: u8, species_name: String },
}

/// A completed turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    pub action: TurnAction,
    pub outcome: TurnOutcome,
    /// Turn count after this turn
    pub turn_number: u32,
    pub pre_state: TurnSnapshot,
    pub post_state: TurnSnapshot,
}

/// Runs one turn at a time against the emulator
pub struct TurnExecutor<'a, B: ?Sized> {
    bus: &'a B,
    map: &'a AddressMap,
    timings: &'a Timings,
    tracker: &'a mut TransitionTracker,
    phase: TurnPhase,
}

impl<'a, B: MemoryBus + ?Sized> TurnExecutor<'a, B> {
    pub fn new(
        bus: &'a B,
        map: &'a AddressMap,
        timings: &'a Timings,
        tracker: &'a mut TransitionTracker,
    ) -> Self {
        Self {
            bus,
            map,
            timings,
            tracker,
            phase: TurnPhase::Idle,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    fn enter(&mut self, phase: TurnPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "Turn phase");
        self.phase = phase;
    }

    fn reader(&self) -> StateReader<'a, B> {
        StateReader::new(self.bus, self.map)
    }

    fn detector(&self) -> BattleDetector<'a, B> {
        BattleDetector::new(self.bus, self.map)
    }

    fn navigator(&self) -> Navigator<'a, B> {
        Navigator::new(self.bus, self.map, self.timings)
    }

    /// Use the move in menu position 1-4
    pub async fn execute_attack(&mut self, move_index: u8) -> Result<TurnReport, TurnFailure> {
        let mut pre_state = None;
        let result = self.attack(move_index, &mut pre_state).await;
        self.finish(result, pre_state)
    }

    /// Send in the party member in slot 1-6
    pub async fn execute_switch(&mut self, slot: u8) -> Result<TurnReport, TurnFailure> {
        let mut pre_state = None;
        let result = self.switch(slot, &mut pre_state).await;
        self.finish(result, pre_state)
    }

    /// Items cannot be used; fails without pressing anything
    pub fn use_item(&mut self, item_slot: u8) -> Result<TurnReport, TurnFailure> {
        tracing::debug!(item_slot, "Item use requested");
        self.finish(Err(TurnError::Unsupported("item use")), None)
    }

    async fn attack(
        &mut self,
        move_index: u8,
        pre_state: &mut Option<TurnSnapshot>,
    ) -> Result<TurnReport, TurnError> {
        validate_range("move index", move_index, 1, 4)?;
        if !self.detector().is_active().await {
            return Err(TurnError::NotInBattle);
        }

        let pre = self.reader().snapshot().await?;
        *pre_state = Some(pre.clone());

        let navigator = self.navigator();
        self.enter(TurnPhase::MenuOpen);
        navigator.select_battle_option(BattleMenuOption::Fight).await?;

        self.enter(TurnPhase::SubmenuOpen);
        navigator
            .navigate_grid(Menu::Move, GridPosition::new(move_index))
            .await?;
        navigator
            .press_and_wait(Button::A, self.timings.move_confirm_settle)
            .await?;

        let post = self.await_resolution(&pre, self.timings.attack_timeout).await?;
        Ok(self.report(TurnAction::Attack { move_index }, pre, post))
    }

    async fn switch(
        &mut self,
        slot: u8,
        pre_state: &mut Option<TurnSnapshot>,
    ) -> Result<TurnReport, TurnError> {
        validate_range("party slot", slot, 1, 6)?;
        if !self.detector().is_active().await {
            return Err(TurnError::NotInBattle);
        }

        let reader = self.reader();
        let target = reader.party_member(slot).await?;
        if !target.is_occupied() {
            return Err(TurnError::EmptySlot(slot));
        }
        if !target.can_battle() {
            return Err(TurnError::Fainted(slot));
        }
        if reader.active_slot().await == slot {
            return Err(TurnError::AlreadyActive(slot));
        }

        let fingerprint = target.fingerprint();
        let species_name = target.species_name.clone();

        let pre = reader.snapshot().await?;
        *pre_state = Some(pre.clone());

        let navigator = self.navigator();
        self.enter(TurnPhase::MenuOpen);
        navigator.select_battle_option(BattleMenuOption::Pokemon).await?;
        self.enter(TurnPhase::SubmenuOpen);
        sleep(self.timings.party_menu_open).await;

        let located = async {
            // The menu may list members in a different order than their slots
            let displayed = reader.party().await?;
            let row = displayed
                .iter()
                .position(|entry| entry.record.fingerprint() == fingerprint)
                .and_then(|index| ListPosition::row(index as u8))
                .ok_or_else(|| TurnError::IdentityMismatch {
                    slot,
                    species_name: species_name.clone(),
                })?;
            tracing::debug!(slot, row = %row, "Located switch target in party menu");
            navigator.navigate_party(row).await?;
            Ok::<_, TurnError>(())
        }
        .await;

        if let Err(e) = located {
            if matches!(e, TurnError::IdentityMismatch { .. } | TurnError::CursorDesync { .. }) {
                // Leave the battle menu where the next turn expects it
                if let Err(back) = navigator.press(Button::B).await {
                    tracing::warn!(error = %back, "Failed to close party menu");
                }
            }
            return Err(e);
        }

        navigator
            .press_and_wait(Button::A, self.timings.switch_prompt_settle)
            .await?;
        navigator
            .press_and_wait(Button::A, self.timings.switch_prompt_settle)
            .await?;

        let post = self.await_resolution(&pre, self.timings.switch_timeout).await?;
        Ok(self.report(TurnAction::Switch { slot, species_name }, pre, post))
    }

    /// Poll until HP moves on either side or the battle ends, then settle
    /// and capture the post-turn snapshot
    async fn await_resolution(
        &mut self,
        pre: &TurnSnapshot,
        timeout: Duration,
    ) -> Result<TurnSnapshot, TurnError> {
        self.enter(TurnPhase::AwaitingResolution);
        let reader = &self.reader();
        let detector = &self.detector();

        let resolved = wait_until(
            move || async move {
                match reader.snapshot().await {
                    Ok(current) => current.hp_changed_since(pre) || !detector.is_active().await,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to capture state while awaiting resolution");
                        false
                    }
                }
            },
            timeout,
            self.timings.poll_interval,
        )
        .await;

        if !resolved {
            return Err(TurnError::ResolutionTimeout(timeout));
        }

        sleep(self.timings.resolution_settle).await;
        Ok(reader.snapshot().await?)
    }

    fn report(&mut self, action: TurnAction, pre: TurnSnapshot, post: TurnSnapshot) -> TurnReport {
        let outcome = TurnOutcome::between(&pre, &post);
        let turn_number = self.tracker.increment_turn();
        TurnReport {
            action,
            outcome,
            turn_number,
            pre_state: pre,
            post_state: post,
        }
    }

    fn finish(
        &mut self,
        result: Result<TurnReport, TurnError>,
        pre_state: Option<TurnSnapshot>,
    ) -> Result<TurnReport, TurnFailure> {
        match result {
            Ok(report) => {
                self.enter(TurnPhase::Resolved);
                tracing::info!(
                    turn = report.turn_number,
                    action = ?report.action,
                    damage_dealt = report.outcome.damage_dealt(),
                    damage_received = report.outcome.damage_received(),
                    "Turn completed"
                );
                Ok(report)
            }
            Err(error) => {
                self.enter(TurnPhase::Failed);
                tracing::warn!(kind = error.kind().as_str(), error = %error, "Turn failed");
                Err(TurnFailure::new(error, pre_state))
            }
        }
    }
}
