use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use kanto_battle::BattleMenuOption;
use serde::{Deserialize, Serialize};

use crate::address::AddressMap;
use crate::connection::DEFAULT_EMULATOR_URL;

/// Durations serialized as whole milliseconds
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Wait after confirming each top-level battle menu option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuOpenWaits {
    #[serde(with = "millis")]
    pub fight: Duration,
    #[serde(with = "millis")]
    pub bag: Duration,
    #[serde(with = "millis")]
    pub pokemon: Duration,
    #[serde(with = "millis")]
    pub run: Duration,
}

impl Default for MenuOpenWaits {
    fn default() -> Self {
        Self {
            fight: Duration::from_millis(300),
            bag: Duration::from_millis(400),
            pokemon: Duration::from_millis(500),
            run: Duration::from_millis(200),
        }
    }
}

/// Input pacing and timeouts. Values in JSON are milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// After every directional press
    #[serde(with = "millis")]
    pub press_settle: Duration,
    /// After the A press that commits a move
    #[serde(with = "millis")]
    pub move_confirm_settle: Duration,
    /// Between finishing list presses and re-reading the cursor
    #[serde(with = "millis")]
    pub party_verify_settle: Duration,
    /// After each A press on the switch prompt
    #[serde(with = "millis")]
    pub switch_prompt_settle: Duration,
    /// Before re-reading the party once the menu is open
    #[serde(with = "millis")]
    pub party_menu_open: Duration,
    /// Between detecting resolution and capturing the post-snapshot
    #[serde(with = "millis")]
    pub resolution_settle: Duration,
    #[serde(with = "millis")]
    pub poll_interval: Duration,
    #[serde(with = "millis")]
    pub attack_timeout: Duration,
    #[serde(with = "millis")]
    pub switch_timeout: Duration,
    #[serde(with = "millis")]
    pub battle_poll_interval: Duration,
    #[serde(with = "millis")]
    pub battle_start_timeout: Duration,
    #[serde(with = "millis")]
    pub battle_end_timeout: Duration,
    pub menu_open: MenuOpenWaits,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            press_settle: Duration::from_millis(100),
            move_confirm_settle: Duration::from_millis(200),
            party_verify_settle: Duration::from_millis(200),
            switch_prompt_settle: Duration::from_millis(300),
            party_menu_open: Duration::from_millis(200),
            resolution_settle: Duration::from_millis(500),
            poll_interval: Duration::from_millis(100),
            attack_timeout: Duration::from_secs(15),
            switch_timeout: Duration::from_secs(10),
            battle_poll_interval: Duration::from_millis(500),
            battle_start_timeout: Duration::from_secs(30),
            battle_end_timeout: Duration::from_secs(120),
            menu_open: MenuOpenWaits::default(),
        }
    }
}

impl Timings {
    pub fn menu_open_wait(&self, option: BattleMenuOption) -> Duration {
        match option {
            BattleMenuOption::Fight => self.menu_open.fight,
            BattleMenuOption::Bag => self.menu_open.bag,
            BattleMenuOption::Pokemon => self.menu_open.pokemon,
            BattleMenuOption::Run => self.menu_open.run,
        }
    }
}

/// Everything needed to build a [`BattleAgent`](crate::BattleAgent)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub emulator_url: String,
    pub addresses: AddressMap,
    pub timings: Timings,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            emulator_url: DEFAULT_EMULATOR_URL.to_string(),
            addresses: AddressMap::default(),
            timings: Timings::default(),
        }
    }
}

impl AgentConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AgentConfig =
            serde_json::from_str(json).context("Failed to parse agent config")?;
        config.addresses.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid config {}", path.display()))
    }
}
