use std::collections::BTreeSet;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{BlockID, BlockVersion, ExerciseID, MetricType, Name, ReadError, WeekVersion};

/// Static reference data: blocks and exercises.
pub trait CatalogRepository {
    fn read_blocks(&self) -> Result<Vec<Block>, ReadError>;
    fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
}

/// Training purpose of a block.
#[derive(
    AsRefStr, Display, EnumIter, EnumString, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord,
)]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    Activation,
    Prehab,
    Neural,
    Force,
    Contrast,
    Hypertrophy,
    Core,
    Neck,
    Carry,
}

impl Intent {
    /// Intents tried, in order, when no block of this intent can be placed.
    #[must_use]
    pub fn fallbacks(self) -> &'static [Intent] {
        match self {
            Intent::Force => &[Intent::Contrast],
            Intent::Contrast => &[Intent::Force],
            Intent::Prehab | Intent::Neck => &[Intent::Core],
            Intent::Activation
            | Intent::Neural
            | Intent::Hypertrophy
            | Intent::Core
            | Intent::Carry => &[],
        }
    }

    /// Neck, core and carry blocks close a session.
    #[must_use]
    pub fn is_finisher(self) -> bool {
        matches!(self, Intent::Neck | Intent::Core | Intent::Carry)
    }

    #[must_use]
    pub fn is_main(self) -> bool {
        matches!(self, Intent::Contrast | Intent::Force)
    }

    /// Intents restricted by a recipe's focus tags.
    #[must_use]
    pub fn is_focus_filtered(self) -> bool {
        matches!(
            self,
            Intent::Activation
                | Intent::Neural
                | Intent::Contrast
                | Intent::Force
                | Intent::Hypertrophy
        )
    }

    /// Warm-up and prehab movements may repeat exercises used elsewhere.
    #[must_use]
    pub fn allows_exercise_overlap(self) -> bool {
        matches!(self, Intent::Activation | Intent::Prehab)
    }

    /// Slots that rotate between the top candidates from week to week.
    #[must_use]
    pub fn is_rotated(self) -> bool {
        matches!(
            self,
            Intent::Neural | Intent::Neck | Intent::Core | Intent::Carry
        )
    }

    /// Required slots whose choice stays stable across the weeks of a phase.
    #[must_use]
    pub fn is_anchored(self) -> bool {
        matches!(self, Intent::Activation | Intent::Contrast | Intent::Force)
    }
}

#[derive(
    AsRefStr, Display, EnumIter, EnumString, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord,
)]
#[strum(serialize_all = "snake_case")]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Bench,
    Band,
    Landmine,
    TbarRow,
    Ghd,
    MedBall,
    Box,
    PullupBar,
    Machine,
    /// Bodyweight only. Never a hard requirement.
    None,
}

#[derive(
    AsRefStr, Display, EnumIter, EnumString, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord,
)]
#[strum(serialize_all = "snake_case")]
pub enum Contraindication {
    ShoulderPain,
    ElbowPain,
    WristPain,
    LowBackPain,
    KneePain,
    GroinPain,
    NeckPain,
    AnklePain,
}

#[derive(AsRefStr, Display, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Prime,
    Contrast,
    Stability,
    Accessory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockExercise {
    pub exercise_id: ExerciseID,
    pub role: Role,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockID,
    pub name: Name,
    pub intent: Intent,
    pub tags: BTreeSet<String>,
    pub equipment: BTreeSet<Equipment>,
    pub contraindications: BTreeSet<Contraindication>,
    pub exercises: Vec<BlockExercise>,
    pub versions: Vec<BlockVersion>,
    pub coaching_notes: String,
}

impl Block {
    pub fn version(&self, week: WeekVersion) -> Result<&BlockVersion, VersionError> {
        self.versions
            .iter()
            .find(|v| v.week == week)
            .ok_or_else(|| VersionError::Missing {
                block: self.id.clone(),
                week,
            })
    }

    pub fn exercise_ids(&self) -> impl Iterator<Item = &ExerciseID> {
        self.exercises.iter().map(|e| &e.exercise_id)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    #[must_use]
    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|t| self.has_tag(t.as_ref()))
    }

    #[must_use]
    pub fn count_tags<S: AsRef<str>>(&self, tags: &[S]) -> i32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let count = tags.iter().filter(|t| self.has_tag(t.as_ref())).count() as i32;
        count
    }

    /// Equipment the athlete must own, ignoring the bodyweight wildcard.
    pub fn required_equipment(&self) -> impl Iterator<Item = &Equipment> {
        self.equipment.iter().filter(|e| **e != Equipment::None)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum VersionError {
    #[error("Block '{block}' skipped because version '{week}' is missing.")]
    Missing { block: BlockID, week: WeekVersion },
}

/// Reference data of a single movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub metric_type: Option<MetricType>,
    pub equipment: BTreeSet<Equipment>,
    pub contraindications: BTreeSet<Contraindication>,
    pub tags: BTreeSet<String>,
}
