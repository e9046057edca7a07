//! 2×2 grid menus (battle menu, move menu)

use super::InputSequence;
use crate::types::Button;

/// Cursor position in a 2×2 grid, 1-based:
///
/// ```text
/// 1 2
/// 3 4
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition(u8);

impl GridPosition {
    pub const DEFAULT: GridPosition = GridPosition(1);

    /// Any value outside 1..=4 becomes position 1
    pub fn new(position: u8) -> Self {
        if (1..=4).contains(&position) {
            GridPosition(position)
        } else {
            Self::DEFAULT
        }
    }

    /// Convert the 0-based value stored in memory
    pub fn from_raw(raw: u8) -> Self {
        if raw <= 3 {
            GridPosition(raw + 1)
        } else {
            Self::DEFAULT
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// (row, col), both 0-based
    pub fn coords(self) -> (u8, u8) {
        ((self.0 - 1) / 2, (self.0 - 1) % 2)
    }
}

impl Default for GridPosition {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Presses needed to move between two grid positions.
///
/// Vertical first, then horizontal. On a 2×2 grid that is at most one
/// press of each kind.
pub fn plan_grid(current: GridPosition, target: GridPosition) -> InputSequence {
    let (current_row, current_col) = current.coords();
    let (target_row, target_col) = target.coords();
    let mut presses = Vec::with_capacity(2);

    if target_row > current_row {
        presses.push(Button::Down);
    } else if target_row < current_row {
        presses.push(Button::Up);
    }

    if target_col > current_col {
        presses.push(Button::Right);
    } else if target_col < current_col {
        presses.push(Button::Left);
    }

    presses
}

/// Top-level battle menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleMenuOption {
    Fight,
    Bag,
    Pokemon,
    Run,
}

impl BattleMenuOption {
    pub fn position(self) -> GridPosition {
        match self {
            BattleMenuOption::Fight => GridPosition(1),
            BattleMenuOption::Bag => GridPosition(2),
            BattleMenuOption::Pokemon => GridPosition(3),
            BattleMenuOption::Run => GridPosition(4),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BattleMenuOption::Fight => "FIGHT",
            BattleMenuOption::Bag => "BAG",
            BattleMenuOption::Pokemon => "POKEMON",
            BattleMenuOption::Run => "RUN",
        }
    }
}

impl std::fmt::Display for BattleMenuOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(GridPosition::new(0).get(), 1);
        assert_eq!(GridPosition::new(5).get(), 1);
        assert_eq!(GridPosition::new(3).get(), 3);
        assert_eq!(GridPosition::from_raw(0).get(), 1);
        assert_eq!(GridPosition::from_raw(3).get(), 4);
        assert_eq!(GridPosition::from_raw(4).get(), 1);
        assert_eq!(GridPosition::from_raw(0xFF).get(), 1);
    }

    #[test]
    fn test_coords() {
        assert_eq!(GridPosition::new(1).coords(), (0, 0));
        assert_eq!(GridPosition::new(2).coords(), (0, 1));
        assert_eq!(GridPosition::new(3).coords(), (1, 0));
        assert_eq!(GridPosition::new(4).coords(), (1, 1));
    }

    #[test]
    fn test_plan_specific_moves() {
        let p = GridPosition::new;
        assert!(plan_grid(p(2), p(2)).is_empty());
        assert_eq!(plan_grid(p(1), p(2)), vec![Button::Right]);
        assert_eq!(plan_grid(p(4), p(1)), vec![Button::Up, Button::Left]);
        assert_eq!(plan_grid(p(2), p(3)), vec![Button::Down, Button::Left]);
        assert_eq!(plan_grid(p(3), p(1)), vec![Button::Up]);
    }

    #[test]
    fn test_plan_is_bounded_for_all_pairs() {
        for from in 1..=4 {
            for to in 1..=4 {
                let presses = plan_grid(GridPosition::new(from), GridPosition::new(to));
                let vertical = presses
                    .iter()
                    .filter(|b| matches!(b, Button::Up | Button::Down))
                    .count();
                let horizontal = presses
                    .iter()
                    .filter(|b| matches!(b, Button::Left | Button::Right))
                    .count();
                assert!(vertical <= 1 && horizontal <= 1, "{} -> {}", from, to);
                // Vertical presses always come first
                if vertical == 1 && horizontal == 1 {
                    assert!(matches!(presses[0], Button::Up | Button::Down));
                }
            }
        }
    }

    #[test]
    fn test_plan_reaches_target() {
        for from in 1..=4u8 {
            for to in 1..=4u8 {
                let (mut row, mut col) = GridPosition::new(from).coords();
                for press in plan_grid(GridPosition::new(from), GridPosition::new(to)) {
                    match press {
                        Button::Up => row -= 1,
                        Button::Down => row += 1,
                        Button::Left => col -= 1,
                        Button::Right => col += 1,
                        other => panic!("unexpected press {}", other),
                    }
                }
                assert_eq!((row, col), GridPosition::new(to).coords());
            }
        }
    }

    #[test]
    fn test_battle_menu_options() {
        assert_eq!(BattleMenuOption::Fight.position().get(), 1);
        assert_eq!(BattleMenuOption::Run.position().get(), 4);
        assert_eq!(BattleMenuOption::Pokemon.as_str(), "POKEMON");
    }
}
