//! Battle domain types for FireRed automation.
//!
//! This crate turns decoded creature records into the views a battle agent
//! works with, and plans the button presses needed to drive the in-game
//! menus. It performs no I/O.
//!
//! # Overview
//!
//! ```text
//! kanto-structure (100-byte structure decoding)
//!        │
//!        ▼
//! kanto-battle (domain types + navigation + tracking) ← THIS CRATE
//!        │
//!        ▼
//! kanto-client (emulator transport, snapshots, turn execution)
//! ```
//!
//! # Main Types
//!
//! ## Views
//! - [`VisibleOpponentView`] - What the player can see of the opponent
//! - [`PartyEntry`] / [`PartyState`] - Own party, fainted members included
//! - [`TurnSnapshot`] / [`TurnOutcome`] - Before/after state of a turn and its diff
//! - [`BattleStatus`] - Summary of the current battle
//!
//! ## Navigation
//! - [`GridPosition`] - Cursor in the 2×2 battle and move menus
//! - [`ListPosition`] - Cursor in the vertical party menu
//! - [`plan_grid`], [`plan_list`] - Minimal button sequences between positions
//!
//! ## Tracking
//! - [`TransitionTracker`] - Edge-triggered battle start/end detection and turn counting
//! - [`BattleKind`] - Wild / trainer classification
//!
//! # Example Usage
//!
//! ```
//! use kanto_battle::{GridPosition, Button, plan_grid};
//!
//! // From FIGHT (top-left) to RUN (bottom-right)
//! let presses = plan_grid(GridPosition::new(1), GridPosition::new(4));
//! assert_eq!(presses, vec![Button::Down, Button::Right]);
//! ```

pub mod navigation;
pub mod tracking;
pub mod types;

pub use navigation::{
    BattleMenuOption, GridPosition, InputSequence, ListPosition, Menu, plan_grid, plan_list,
};
pub use tracking::{BattleKind, Transition, TransitionTracker};
pub use types::{
    BattleStatus, Button, HpBarColor, PartyEntry, PartyState, TurnOutcome, TurnSnapshot,
    VisibleOpponentView,
};

// Re-export the record types the views are built from
pub use kanto_structure::{CreatureRecord, MoveSlot, StatusCondition};
