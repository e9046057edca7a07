use std::time::Duration;

use anyhow::Result;
use kanto_battle::{
    BattleStatus, PartyState, Transition, TransitionTracker, VisibleOpponentView,
};
use kanto_structure::CreatureRecord;

use crate::address::AddressMap;
use crate::bus::MemoryBus;
use crate::config::{AgentConfig, Timings};
use crate::connection::HttpEmulator;
use crate::detector::{BattleDetector, wait_until};
use crate::error::{QueryError, TurnFailure};
use crate::executor::{TurnExecutor, TurnReport};
use crate::reader::StateReader;

/// Owns the emulator connection, configuration and battle tracking state.
///
/// Turns take `&mut self`, so at most one can be in flight per agent.
pub struct BattleAgent<B> {
    bus: B,
    addresses: AddressMap,
    timings: Timings,
    tracker: TransitionTracker,
}

impl BattleAgent<HttpEmulator> {
    /// Connect to the emulator at the default address with FireRed defaults
    pub async fn connect_default() -> Result<Self> {
        Self::connect(AgentConfig::default()).await
    }

    pub async fn connect(config: AgentConfig) -> Result<Self> {
        config.addresses.validate()?;
        let emulator = HttpEmulator::connect(&config.emulator_url).await?;
        Ok(Self::new(emulator, config.addresses, config.timings))
    }
}

impl<B: MemoryBus> BattleAgent<B> {
    pub fn new(bus: B, addresses: AddressMap, timings: Timings) -> Self {
        Self {
            bus,
            addresses,
            timings,
            tracker: TransitionTracker::new(),
        }
    }

    pub fn with_defaults(bus: B) -> Self {
        Self::new(bus, AddressMap::default(), Timings::default())
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn addresses(&self) -> &AddressMap {
        &self.addresses
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Turns completed since the last battle transition
    pub fn turn_count(&self) -> u32 {
        self.tracker.turn_count()
    }

    fn reader(&self) -> StateReader<'_, B> {
        StateReader::new(&self.bus, &self.addresses)
    }

    fn detector(&self) -> BattleDetector<'_, B> {
        BattleDetector::new(&self.bus, &self.addresses)
    }

    async fn require_battle(&self) -> Result<(), QueryError> {
        if self.detector().is_active().await {
            Ok(())
        } else {
            Err(QueryError::NotInBattle)
        }
    }

    /// Full record of the party member currently fighting
    pub async fn get_active_combatant(&self) -> Result<CreatureRecord, QueryError> {
        self.require_battle().await?;

        let reader = self.reader();
        let slot = reader.active_slot().await;
        let record = reader.party_member(slot).await?;
        if !record.exists() {
            return Err(QueryError::NoActiveCreature(slot));
        }
        Ok(record)
    }

    /// What the player can see of the opponent
    pub async fn get_opponent_view(&self) -> Result<VisibleOpponentView, QueryError> {
        self.require_battle().await?;

        let opponent = self.reader().opponent(1).await?;
        VisibleOpponentView::from_record(&opponent).ok_or(QueryError::NoOpponent)
    }

    /// Every occupied party slot, fainted members included
    pub async fn get_party(&self) -> Result<PartyState, QueryError> {
        let reader = self.reader();
        let entries = reader.party().await?;
        let active_slot = reader.active_slot().await;
        Ok(PartyState::new(entries, active_slot))
    }

    pub async fn get_battle_status(&self) -> BattleStatus {
        let detector = self.detector();
        if !detector.is_active().await {
            return BattleStatus::inactive();
        }

        let kind = detector.classify().await;
        let (opponent_party_count, opponent_alive_count) = self.reader().opponent_counts().await;
        BattleStatus {
            active: true,
            kind,
            can_flee: kind.can_flee(),
            turn_number: self.tracker.turn_count(),
            opponent_party_count,
            opponent_alive_count,
        }
    }

    /// Observe battle activity once and report a start or end edge
    pub async fn detect_transition(&mut self) -> Option<Transition> {
        let active = self.detector().is_active().await;
        let transition = self.tracker.observe(active);
        if let Some(transition) = transition {
            tracing::info!(?transition, "Battle transition");
        }
        transition
    }

    pub async fn wait_for_battle_start(&self, timeout: Option<Duration>) -> bool {
        let timeout = timeout.unwrap_or(self.timings.battle_start_timeout);
        let detector = &self.detector();
        wait_until(
            move || detector.is_active(),
            timeout,
            self.timings.battle_poll_interval,
        )
        .await
    }

    pub async fn wait_for_battle_end(&self, timeout: Option<Duration>) -> bool {
        let timeout = timeout.unwrap_or(self.timings.battle_end_timeout);
        let detector = &self.detector();
        wait_until(
            move || async move { !detector.is_active().await },
            timeout,
            self.timings.battle_poll_interval,
        )
        .await
    }

    fn executor(&mut self) -> TurnExecutor<'_, B> {
        TurnExecutor::new(&self.bus, &self.addresses, &self.timings, &mut self.tracker)
    }

    /// Use the move in menu position 1-4
    pub async fn execute_attack(&mut self, move_index: u8) -> Result<TurnReport, TurnFailure> {
        self.executor().execute_attack(move_index).await
    }

    /// Send in the party member in slot 1-6
    pub async fn execute_switch(&mut self, slot: u8) -> Result<TurnReport, TurnFailure> {
        self.executor().execute_switch(slot).await
    }

    /// Not supported; always fails without input
    pub fn use_item(&mut self, item_slot: u8) -> Result<TurnReport, TurnFailure> {
        self.executor().use_item(item_slot)
    }
}

#[cfg(test)]
mod tests {
    use kanto_battle::{BattleKind, HpBarColor};

    use super::*;
    use crate::testing::{Arena, FakeEmulator, creature};

    fn agent() -> BattleAgent<FakeEmulator> {
        let map = AddressMap::default();
        let emu = FakeEmulator::in_battle(
            &map,
            &[
                creature(0x0101, 4, 14, 39, 39),
                creature(0x0202, 16, 12, 0, 33),
                creature(0x0303, 7, 13, 37, 37),
            ],
            &[
                creature(0x0505, 19, 10, 10, 120),
                creature(0x0606, 21, 9, 25, 25),
                creature(0x0707, 23, 9, 0, 27),
            ],
        );
        BattleAgent::with_defaults(emu)
    }

    fn leave_battle(agent: &BattleAgent<FakeEmulator>) {
        let map = agent.addresses();
        agent.bus().write_u8(map.battle.flags.get(), 0);
        agent.bus().write_u32(map.battle.type_word.get(), 0);
        agent.bus().with_memory(|mem| mem.set_hp(map.opponent_slot(1), 0));
    }

    #[tokio::test]
    async fn test_active_combatant() {
        let agent = agent();
        let record = agent.get_active_combatant().await.unwrap();
        assert_eq!(record.species_name, "Charmander");
        assert_eq!(record.level, 14);

        agent
            .bus()
            .write_u16(agent.addresses().battle.active_party_index.get(), 1);
        assert!(matches!(
            agent.get_active_combatant().await,
            Err(QueryError::NoActiveCreature(2))
        ));
    }

    #[tokio::test]
    async fn test_opponent_view() {
        let agent = agent();
        let view = agent.get_opponent_view().await.unwrap();
        assert_eq!(view.species_name, "Rattata");
        assert_eq!(view.hp_bar_color, HpBarColor::Red);
        assert_eq!(view.hp_percentage, 8.3);
    }

    #[tokio::test]
    async fn test_queries_outside_battle() {
        let agent = agent();
        leave_battle(&agent);

        assert!(matches!(
            agent.get_active_combatant().await,
            Err(QueryError::NotInBattle)
        ));
        assert!(matches!(
            agent.get_opponent_view().await,
            Err(QueryError::NotInBattle)
        ));
        assert_eq!(agent.get_battle_status().await, BattleStatus::inactive());
        // The party is readable at any time
        assert_eq!(agent.get_party().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_party() {
        let agent = agent();
        let party = agent.get_party().await.unwrap();
        assert_eq!(party.active_slot, 1);
        assert_eq!(party.alive_count(), 2);
        let candidates: Vec<u8> = party.switch_candidates().map(|e| e.slot).collect();
        assert_eq!(candidates, vec![3]);
    }

    #[tokio::test]
    async fn test_battle_status() {
        let agent = agent();
        let status = agent.get_battle_status().await;
        assert!(status.active);
        assert_eq!(status.kind, BattleKind::Wild);
        assert!(status.can_flee);
        assert_eq!(status.opponent_party_count, 3);
        assert_eq!(status.opponent_alive_count, 2);
        assert_eq!(status.turn_number, 0);

        agent
            .bus()
            .write_u32(agent.addresses().battle.type_word.get(), 0x08);
        let status = agent.get_battle_status().await;
        assert_eq!(status.kind, BattleKind::Trainer);
        assert!(!status.can_flee);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transitions_reset_turn_count() {
        let mut agent = agent();
        let mut arena = Arena::new(agent.addresses());
        arena.opponent_damage = 1;
        agent.bus().install(arena);

        assert_eq!(agent.detect_transition().await, Some(Transition::Started));
        assert_eq!(agent.detect_transition().await, None);

        agent.execute_attack(1).await.unwrap();
        agent.execute_attack(1).await.unwrap();
        assert_eq!(agent.turn_count(), 2);
        assert_eq!(agent.get_battle_status().await.turn_number, 2);

        leave_battle(&agent);
        assert_eq!(agent.detect_transition().await, Some(Transition::Ended));
        assert_eq!(agent.turn_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_battle_end() {
        let agent = agent();
        assert!(!agent.wait_for_battle_end(Some(Duration::from_secs(2))).await);

        leave_battle(&agent);
        assert!(agent.wait_for_battle_end(None).await);
        assert!(!agent.wait_for_battle_start(Some(Duration::from_secs(1))).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_battle_start() {
        let agent = agent();
        leave_battle(&agent);
        let start = tokio::time::Instant::now();

        let encounter = async {
            tokio::time::sleep(Duration::from_millis(1200)).await;
            agent.bus().write_u8(agent.addresses().battle.flags.get(), 1);
        };
        let (started, ()) = tokio::join!(
            agent.wait_for_battle_start(Some(Duration::from_secs(5))),
            encounter
        );

        assert!(started);
        // Noticed on the first poll after the flag flips
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1200) && elapsed < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_entry_points() {
        let mut agent = agent();

        let failure = agent.execute_attack(5).await.unwrap_err();
        assert!(failure.to_string().contains("must be 1-4"));
        assert!(agent.use_item(1).is_err());
        assert!(agent.execute_switch(2).await.is_err());
        assert!(agent.bus().presses().is_empty());
    }
}
