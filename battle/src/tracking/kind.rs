//! Battle kind classification

/// Bit of the battle type word set for trainer battles
pub const TRAINER_FLAG: u32 = 0x08;

/// Kind of the current battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BattleKind {
    #[default]
    None,
    Wild,
    Trainer,
    /// In battle, but the type word could not be read
    Unknown,
}

impl BattleKind {
    /// Classify an active battle from its type word
    pub fn from_type_word(word: u32) -> Self {
        if word & TRAINER_FLAG != 0 {
            BattleKind::Trainer
        } else {
            BattleKind::Wild
        }
    }

    /// Only wild battles can be fled
    pub fn can_flee(&self) -> bool {
        matches!(self, BattleKind::Wild)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BattleKind::None => "none",
            BattleKind::Wild => "wild",
            BattleKind::Trainer => "trainer",
            BattleKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BattleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_type_word() {
        assert_eq!(BattleKind::from_type_word(0), BattleKind::Wild);
        assert_eq!(BattleKind::from_type_word(0x04), BattleKind::Wild);
        assert_eq!(BattleKind::from_type_word(0x08), BattleKind::Trainer);
        assert_eq!(BattleKind::from_type_word(0x0C), BattleKind::Trainer);
    }

    #[test]
    fn test_can_flee() {
        assert!(BattleKind::Wild.can_flee());
        assert!(!BattleKind::Trainer.can_flee());
        assert!(!BattleKind::None.can_flee());
        assert!(!BattleKind::Unknown.can_flee());
    }
}
