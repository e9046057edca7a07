//! Battle start/end tracking and battle classification

mod kind;
mod tracker;

pub use kind::BattleKind;
pub use tracker::{Transition, TransitionTracker};
