//! Domain types derived from decoded records

mod battle_status;
mod button;
mod opponent;
mod outcome;
mod party;
mod snapshot;

pub use battle_status::BattleStatus;
pub use button::Button;
pub use opponent::{HpBarColor, VisibleOpponentView};
pub use outcome::TurnOutcome;
pub use party::{PartyEntry, PartyState};
pub use snapshot::TurnSnapshot;
