//! Edge-triggered battle transition tracking

/// A change in battle activity between two observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Transition {
    Started,
    Ended,
}

/// Remembers whether the last observation saw a battle and counts turns.
///
/// The turn counter is reset on every transition and only ever incremented
/// otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTracker {
    last_active: bool,
    turn_count: u32,
}

impl TransitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an activity observation and report a transition, if any
    pub fn observe(&mut self, active: bool) -> Option<Transition> {
        let transition = match (self.last_active, active) {
            (false, true) => Some(Transition::Started),
            (true, false) => Some(Transition::Ended),
            _ => None,
        };

        if transition.is_some() {
            self.turn_count = 0;
        }
        self.last_active = active;
        transition
    }

    /// Count a completed turn, returning the new count
    pub fn increment_turn(&mut self) -> u32 {
        self.turn_count += 1;
        self.turn_count
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn last_active(&self) -> bool {
        self.last_active
    }
}
