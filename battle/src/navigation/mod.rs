//! Menu cursor geometries and input planning
//!
//! Three menus are driven during a turn:
//!
//! ```text
//! battle menu          move menu       party menu
//! [FIGHT] [BAG]        [1] [2]         0  slot
//! [PKMN]  [RUN]        [3] [4]         ...
//!                                      5  slot
//!                                      7  CANCEL
//! ```
//!
//! Planning is pure; issuing the presses and re-reading the cursor is the
//! client's job.

mod grid;
mod list;

pub use grid::{BattleMenuOption, GridPosition, plan_grid};
pub use list::{ListPosition, plan_list};

use crate::types::Button;

/// Ordered presses that move a cursor
pub type InputSequence = Vec<Button>;

/// The menus whose cursor position is read from memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    Battle,
    Move,
    Party,
}

impl Menu {
    pub fn as_str(&self) -> &'static str {
        match self {
            Menu::Battle => "battle",
            Menu::Move => "move",
            Menu::Party => "party",
        }
    }
}

impl std::fmt::Display for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
