use std::collections::BTreeSet;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Contraindication, Equipment, ReadError, RecipeID, WriteError};

pub trait ProfileRepository {
    fn read_profile(&self) -> Result<AthleteProfile, ReadError>;
    fn replace_profile(&self, profile: AthleteProfile) -> Result<AthleteProfile, WriteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AthleteProfile {
    pub goal: Option<Goal>,
    pub equipment: BTreeSet<Equipment>,
    pub injuries: BTreeSet<Contraindication>,
    pub weekly_sessions: WeeklySessions,
    pub level: Level,
    pub position: Option<Position>,
}

impl AthleteProfile {
    #[must_use]
    pub fn position_or_default(&self) -> Position {
        self.position.unwrap_or_default()
    }
}

#[derive(AsRefStr, Display, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Goal {
    Strength,
    Hypertrophy,
}

#[derive(AsRefStr, Display, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Level {
    Beginner,
    Intermediate,
}

#[derive(
    AsRefStr, Display, EnumIter, EnumString, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    FrontRow,
    SecondRow,
    #[default]
    BackRow,
    HalfBacks,
    Centers,
    BackThree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeeklySessions {
    Two,
    Three,
}

impl WeeklySessions {
    /// Recipes composed for a week, always in the same order.
    #[must_use]
    pub fn recipes(self) -> &'static [RecipeID] {
        match self {
            WeeklySessions::Two => &[RecipeID::UpperV1, RecipeID::LowerV1],
            WeeklySessions::Three => &[RecipeID::UpperV1, RecipeID::LowerV1, RecipeID::FullV1],
        }
    }
}

impl TryFrom<u8> for WeeklySessions {
    type Error = WeeklySessionsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(WeeklySessions::Two),
            3 => Ok(WeeklySessions::Three),
            _ => Err(WeeklySessionsError::Unsupported(value)),
        }
    }
}

impl From<WeeklySessions> for u8 {
    fn from(value: WeeklySessions) -> Self {
        match value {
            WeeklySessions::Two => 2,
            WeeklySessions::Three => 3,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeeklySessionsError {
    #[error("Weekly sessions must be 2 or 3 ({0})")]
    Unsupported(u8),
}
