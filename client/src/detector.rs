//! Battle presence and kind detection

use std::future::Future;
use std::time::Duration;

use kanto_battle::BattleKind;
use tokio::time::{Instant, sleep};

use crate::address::{Address, AddressMap};
use crate::bus::MemoryBus;

/// Reads the battle flags and type word
pub struct BattleDetector<'a, B: ?Sized> {
    bus: &'a B,
    map: &'a AddressMap,
}

impl<'a, B: MemoryBus + ?Sized> BattleDetector<'a, B> {
    pub fn new(bus: &'a B, map: &'a AddressMap) -> Self {
        Self { bus, map }
    }

    /// Whether a battle is running.
    ///
    /// Any nonzero battle flag or type word counts, and so does a leading
    /// opponent with HP left. Unreadable indicators count as absent.
    pub async fn is_active(&self) -> bool {
        let battle = &self.map.battle;

        match self.bus.read_u8(battle.flags.get()).await {
            Ok(flags) if flags != 0 => return true,
            Ok(_) => {}
            Err(e) => tracing::warn!(address = %battle.flags, error = %e, "Failed to read battle flags"),
        }

        match self.bus.read_u32(battle.type_word.get()).await {
            Ok(word) if word != 0 => return true,
            Ok(_) => {}
            Err(e) => tracing::warn!(address = %battle.type_word, error = %e, "Failed to read battle type"),
        }

        // Only the HP word, so the rest of the structure cannot mask it
        let hp_address = Address(self.map.opponent_slot(1) + self.map.layout.current_hp as u32);
        match self.bus.read_u16(hp_address.get()).await {
            Ok(hp) => hp > 0,
            Err(e) => {
                tracing::warn!(address = %hp_address, error = %e, "Failed to read opponent HP");
                false
            }
        }
    }

    /// Wild or trainer battle, `None` outside of battle
    pub async fn classify(&self) -> BattleKind {
        if !self.is_active().await {
            return BattleKind::None;
        }

        let address = self.map.battle.type_word;
        match self.bus.read_u32(address.get()).await {
            Ok(word) => BattleKind::from_type_word(word),
            Err(e) => {
                tracing::warn!(%address, error = %e, "Failed to read battle type");
                BattleKind::Unknown
            }
        }
    }

    pub async fn can_flee(&self) -> bool {
        self.classify().await.can_flee()
    }
}

/// Poll `condition` until it holds or `timeout` elapses.
///
/// The condition is checked before each sleep, so an already-true
/// condition returns immediately.
pub async fn wait_until<F, Fut>(mut condition: F, timeout: Duration, poll_interval: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if condition().await {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        sleep(poll_interval).await;
    }
}
