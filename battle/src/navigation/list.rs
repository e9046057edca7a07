//! Vertical party list menu

use super::InputSequence;
use crate::types::Button;

/// Raw cursor value of the CANCEL entry, one past an unused gap
const CANCEL_RAW: u8 = 7;

/// Cursor position in the party menu: six member rows and CANCEL.
///
/// Rows are 0-based. CANCEL is stored as 7, not 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListPosition {
    Slot(u8),
    Cancel,
}

impl ListPosition {
    pub const DEFAULT: ListPosition = ListPosition::Slot(0);

    /// Row for a 0-based display index, `None` past the sixth row
    pub fn row(index: u8) -> Option<Self> {
        (index <= 5).then_some(ListPosition::Slot(index))
    }

    /// Interpret a raw cursor byte; unknown values become row 0
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0..=5 => ListPosition::Slot(raw),
            CANCEL_RAW => ListPosition::Cancel,
            _ => Self::DEFAULT,
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            ListPosition::Slot(index) => index,
            ListPosition::Cancel => CANCEL_RAW,
        }
    }
}

impl Default for ListPosition {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for ListPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListPosition::Slot(index) => write!(f, "row {}", index),
            ListPosition::Cancel => write!(f, "cancel"),
        }
    }
}

/// `|target - current|` presses in one direction, using raw values
pub fn plan_list(current: ListPosition, target: ListPosition) -> InputSequence {
    let (from, to) = (current.raw(), target.raw());

    if to > from {
        vec![Button::Down; (to - from) as usize]
    } else {
        vec![Button::Up; (from - to) as usize]
    }
}
