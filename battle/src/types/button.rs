//! Controller buttons

/// A button on the emulated controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    A,
    B,
    Start,
    Select,
    L,
    R,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Name used by the emulator's input API
    pub fn as_str(&self) -> &'static str {
        match self {
            Button::A => "A",
            Button::B => "B",
            Button::Start => "Start",
            Button::Select => "Select",
            Button::L => "L",
            Button::R => "R",
            Button::Up => "Up",
            Button::Down => "Down",
            Button::Left => "Left",
            Button::Right => "Right",
        }
    }

    /// Whether this is a d-pad direction
    pub fn is_direction(&self) -> bool {
        matches!(self, Button::Up | Button::Down | Button::Left | Button::Right)
    }
}

impl std::fmt::Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_names() {
        assert_eq!(Button::Down.as_str(), "Down");
        assert_eq!(Button::Start.to_string(), "Start");
    }

    #[test]
    fn test_is_direction() {
        assert!(Button::Left.is_direction());
        assert!(!Button::A.is_direction());
    }
}
