use std::fmt;

use derive_more::Into;

use crate::{Block, WeekVersion};

/// Effort reserve: repetitions left in the tank at the end of a set.
#[derive(Debug, Default, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rer(u8);

impl Rer {
    pub const ZERO: Rer = Rer(0);
    pub const ONE: Rer = Rer(1);
    pub const TWO: Rer = Rer(2);
    pub const THREE: Rer = Rer(3);
    pub const FOUR: Rer = Rer(4);

    pub fn new(value: u8) -> Result<Self, RerError> {
        if value > 10 {
            return Err(RerError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Relax the effort reserve by `step` without going past `cap`. Never
    /// makes the prescription harder than it already is.
    #[must_use]
    pub fn relax(self, step: u8, cap: Rer) -> Rer {
        Rer(self.0.saturating_add(step).min(cap.0).max(self.0))
    }
}

impl TryFrom<&str> for Rer {
    type Error = RerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u8>() {
            Ok(parsed_value) => Rer::new(parsed_value),
            Err(_) => Err(RerError::ParseError),
        }
    }
}

impl fmt::Display for Rer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RER {}", self.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RerError {
    #[error("RER must be in the range 0 to 10 ({0} > 10)")]
    OutOfRange(u8),
    #[error("RER must be an integer")]
    ParseError,
}

pub const MAX_SETS: u32 = 20;
pub const MAX_EMOM_MINUTES: u32 = 60;

/// Check the set count of a block version.
pub fn validate_sets(value: u32) -> Result<u32, SetsError> {
    if value == 0 || value > MAX_SETS {
        return Err(SetsError::Sets(value));
    }
    Ok(value)
}

/// Check the duration of an EMOM in minutes.
pub fn validate_emom_minutes(value: u32) -> Result<u32, SetsError> {
    if value == 0 || value > MAX_EMOM_MINUTES {
        return Err(SetsError::EmomMinutes(value));
    }
    Ok(value)
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("sets must be in the range 1 to {MAX_SETS} ({0})")]
    Sets(u32),
    #[error("EMOM minutes must be in the range 1 to {MAX_EMOM_MINUTES} ({0})")]
    EmomMinutes(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scheme {
    /// Rep target, possibly structured like `3+3` or `5/5`.
    Reps { reps: String },
    Time { seconds: u32 },
    Emom { minutes: u32, work: Option<EmomWork> },
}

/// Work performed at the start of every minute of an EMOM.
#[derive(Debug, Clone, PartialEq)]
pub enum EmomWork {
    Reps(String),
    Seconds(String),
}

/// Scheme prescription of a block for one canonical week.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockVersion {
    pub week: WeekVersion,
    pub sets: u32,
    pub scheme: Scheme,
    pub rest_seconds: u32,
    pub rer: Option<Rer>,
    pub tempo: Option<String>,
}

impl BlockVersion {
    /// Short volume summary like `4×5`, `3×20s` or `EMOM 8' · 5 reps`.
    #[must_use]
    pub fn volume_label(&self) -> String {
        match &self.scheme {
            Scheme::Emom { minutes, work } => match work {
                None => format!("EMOM {minutes}'"),
                Some(EmomWork::Reps(reps)) => format!("EMOM {minutes}' · {reps} reps"),
                Some(EmomWork::Seconds(seconds)) => format!("EMOM {minutes}' · {seconds}s"),
            },
            Scheme::Time { seconds } => format!("{}×{seconds}s", self.sets),
            Scheme::Reps { reps } => {
                if reps.contains(['/', '+', '-']) {
                    format!("{}×({reps})", self.sets)
                } else {
                    format!("{}×{reps}", self.sets)
                }
            }
        }
    }

    #[must_use]
    pub fn emom_minutes(&self) -> Option<u32> {
        match self.scheme {
            Scheme::Emom { minutes, .. } => Some(minutes),
            Scheme::Reps { .. } | Scheme::Time { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmomDisplay {
    pub minutes: u32,
    pub exercise_count: usize,
    /// Complete rotations through all exercises. Absent for single-exercise EMOMs.
    pub rounds: Option<u32>,
    pub approximate: bool,
    pub label: String,
}

/// Describe how an EMOM block alternates its exercises. Rounds are truncated
/// when the minutes do not divide evenly, and flagged as approximate.
#[must_use]
pub fn emom_display(block: &Block, version: &BlockVersion) -> Option<EmomDisplay> {
    let minutes = version.emom_minutes()?;
    let exercise_count = block.exercises.len().max(1);

    if exercise_count == 1 {
        return Some(EmomDisplay {
            minutes,
            exercise_count,
            rounds: None,
            approximate: false,
            label: format!("EMOM {minutes}'"),
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    let count = exercise_count as u32;
    let rounds = minutes / count;
    let approximate = minutes % count != 0;
    let rounds_label = format!(
        "{}{rounds} round{}",
        if approximate { "~" } else { "" },
        if rounds > 1 { "s" } else { "" }
    );

    Some(EmomDisplay {
        minutes,
        exercise_count,
        rounds: Some(rounds),
        approximate,
        label: format!("EMOM {minutes}' · alternate {exercise_count} exercises ({rounds_label})"),
    })
}

#[must_use]
pub fn format_rest(rest_seconds: u32) -> String {
    format!("Rest {}:{:02}", rest_seconds / 60, rest_seconds % 60)
}
