use std::fmt;

use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    BlockID, CycleWeek, ExerciseID, Fatigue, MetricType, ReadError, SessionType, WriteError,
};

/// Append-only history of performed blocks and session check-ins.
pub trait LogRepository {
    fn read_block_logs(&self) -> Result<Vec<BlockLog>, ReadError>;
    fn append_block_log(&self, log: BlockLog) -> Result<BlockLog, WriteError>;
    fn read_session_logs(&self) -> Result<Vec<SessionLog>, ReadError>;
    fn append_session_log(&self, log: SessionLog) -> Result<SessionLog, WriteError>;
}

/// Record of one performed block. Logs are kept oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLog {
    pub id: LogID,
    pub date: NaiveDate,
    pub week: CycleWeek,
    pub session_type: SessionType,
    pub block_id: BlockID,
    pub block_name: String,
    pub entries: Vec<ExerciseLogEntry>,
}

impl BlockLog {
    #[must_use]
    pub fn entry(&self, exercise_id: &ExerciseID) -> Option<&ExerciseLogEntry> {
        self.entries.iter().find(|e| e.exercise_id == *exercise_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseLogEntry {
    pub exercise_id: ExerciseID,
    pub performance: Option<Performance>,
    pub note: String,
}

/// Primary metric logged for an exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Performance {
    LoadReps { load_kg: f32, reps: Option<u32> },
    Reps(u32),
    Seconds(u32),
    Meters(f32),
}

impl Performance {
    #[must_use]
    pub fn metric_type(self) -> MetricType {
        match self {
            Performance::LoadReps { .. } => MetricType::LoadReps,
            Performance::Reps(_) => MetricType::Reps,
            Performance::Seconds(_) => MetricType::Seconds,
            Performance::Meters(_) => MetricType::Meters,
        }
    }

    #[must_use]
    pub fn load_kg(self) -> Option<f32> {
        match self {
            Performance::LoadReps { load_kg, .. } => Some(load_kg),
            Performance::Reps(_) | Performance::Seconds(_) | Performance::Meters(_) => None,
        }
    }

    #[must_use]
    pub fn reps(self) -> Option<u32> {
        match self {
            Performance::LoadReps { reps, .. } => reps,
            Performance::Reps(reps) => Some(reps),
            Performance::Seconds(_) | Performance::Meters(_) => None,
        }
    }

    #[must_use]
    pub fn seconds(self) -> Option<u32> {
        match self {
            Performance::Seconds(seconds) => Some(seconds),
            Performance::LoadReps { .. } | Performance::Reps(_) | Performance::Meters(_) => None,
        }
    }

    #[must_use]
    pub fn meters(self) -> Option<f32> {
        match self {
            Performance::Meters(meters) => Some(meters),
            Performance::LoadReps { .. } | Performance::Reps(_) | Performance::Seconds(_) => None,
        }
    }

    /// Product of load and reps, if both were logged.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn volume(self) -> Option<f32> {
        match self {
            Performance::LoadReps {
                load_kg,
                reps: Some(reps),
            } => Some(load_kg * reps as f32),
            Performance::LoadReps { reps: None, .. }
            | Performance::Reps(_)
            | Performance::Seconds(_)
            | Performance::Meters(_) => None,
        }
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Performance::LoadReps {
                load_kg,
                reps: Some(reps),
            } => write!(f, "{load_kg} kg × {reps}"),
            Performance::LoadReps { load_kg, reps: None } => write!(f, "{load_kg} kg × ?"),
            Performance::Reps(reps) => write!(f, "{reps} reps"),
            Performance::Seconds(seconds) => write!(f, "{seconds}s"),
            Performance::Meters(meters) => write!(f, "{meters} m"),
        }
    }
}

/// Athlete check-in at the end of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLog {
    pub id: LogID,
    pub date: NaiveDate,
    pub week: CycleWeek,
    pub session_type: SessionType,
    pub fatigue: Fatigue,
    pub notes: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogID(Uuid);

impl LogID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for LogID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for LogID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Most recent logged entry of an exercise. Later dates win; on the same
/// date, the log appended last wins.
#[must_use]
pub fn latest_entry<'a>(
    logs: &'a [BlockLog],
    exercise_id: &ExerciseID,
) -> Option<&'a ExerciseLogEntry> {
    logs.iter()
        .enumerate()
        .filter_map(|(i, log)| log.entry(exercise_id).map(|e| ((log.date, i), e)))
        .max_by_key(|(key, _)| *key)
        .map(|(_, e)| e)
}
