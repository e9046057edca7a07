//! Async battle agent for FireRed (US 1.0) running in an emulator.
//!
//! The agent reads creature structures straight out of emulated memory,
//! works out where the battle stands, and plays turns by pressing buttons
//! through the emulator's HTTP scripting bridge.
//!
//! ```text
//! BattleAgent
//!   ├── StateReader     decoded records and turn snapshots
//!   ├── BattleDetector  battle presence and kind
//!   ├── Navigator       menu cursors, with verified party-list moves
//!   └── TurnExecutor    Idle → MenuOpen → SubmenuOpen → AwaitingResolution
//!            │
//!        MemoryBus  (HttpEmulator, or anything else that reads bytes and taps buttons)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kanto_client::BattleAgent;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut agent = BattleAgent::connect_default().await?;
//!
//! if agent.wait_for_battle_start(None).await {
//!     let view = agent.get_opponent_view().await?;
//!     println!("{} Lv.{} ({}%)", view.species_name, view.level, view.hp_percentage);
//!
//!     match agent.execute_attack(1).await {
//!         Ok(report) => println!("dealt {}", report.outcome.damage_dealt()),
//!         Err(failure) => println!("{}", failure.to_json()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod address;
mod agent;
mod bus;
mod config;
mod connection;
mod detector;
mod error;
mod executor;
mod navigator;
mod reader;
mod report;

#[cfg(test)]
mod testing;

pub use address::{Address, AddressMap, BattleAddresses};
pub use agent::BattleAgent;
pub use bus::MemoryBus;
pub use config::{AgentConfig, MenuOpenWaits, Timings};
pub use connection::{DEFAULT_EMULATOR_URL, HttpEmulator, RetryPolicy};
pub use detector::{BattleDetector, wait_until};
pub use error::{ErrorKind, QueryError, TransportError, TurnError, TurnFailure};
pub use executor::{TurnAction, TurnExecutor, TurnPhase, TurnReport};
pub use navigator::{LIST_ATTEMPTS, Navigator};
pub use reader::StateReader;
pub use report::turn_result_json;

pub use kanto_battle::{
    BattleKind, BattleMenuOption, BattleStatus, Button, GridPosition, HpBarColor, ListPosition,
    Menu, PartyEntry, PartyState, Transition, TurnOutcome, TurnSnapshot, VisibleOpponentView,
};
pub use kanto_structure::{CreatureRecord, MoveSlot, StatusCondition};
