//! Opponent view limited to what the player can see on screen

use kanto_structure::{CreatureRecord, StatusCondition};

/// Colour of the opponent's HP bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HpBarColor {
    /// More than half HP left
    Green,
    /// More than a fifth left
    Yellow,
    Red,
}

impl HpBarColor {
    pub fn from_percentage(percent: f64) -> Self {
        if percent > 50.0 {
            HpBarColor::Green
        } else if percent > 20.0 {
            HpBarColor::Yellow
        } else {
            HpBarColor::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HpBarColor::Green => "green",
            HpBarColor::Yellow => "yellow",
            HpBarColor::Red => "red",
        }
    }
}

impl std::fmt::Display for HpBarColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The opponent as shown in the battle HUD.
///
/// Exact HP, stats and moves are not part of this type. It is built from a
/// full record but only keeps the fields the player would see.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VisibleOpponentView {
    pub species_id: u16,
    pub species_name: String,
    pub level: u8,
    pub hp_bar_color: HpBarColor,
    /// HP fraction as a percentage, rounded to one decimal
    pub hp_percentage: f64,
    pub status: StatusCondition,
    pub can_battle: bool,
}

impl VisibleOpponentView {
    /// Build the view, or `None` when the record is not a living creature
    pub fn from_record(record: &CreatureRecord) -> Option<Self> {
        if !record.exists() {
            return None;
        }

        let percent = hp_percentage(record.current_hp, record.max_hp);

        Some(Self {
            species_id: record.species_id,
            species_name: record.species_name.clone(),
            level: record.level,
            hp_bar_color: HpBarColor::from_percentage(percent),
            hp_percentage: (percent * 10.0).round() / 10.0,
            status: record.status,
            can_battle: record.can_battle(),
        })
    }
}

fn hp_percentage(current: u16, max: u16) -> f64 {
    if max == 0 {
        return 0.0;
    }
    f64::from(current) / f64::from(max) * 100.0
}
