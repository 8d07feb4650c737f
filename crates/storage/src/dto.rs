use std::{collections::BTreeSet, str::FromStr};

use chrono::NaiveDate;
use rugbyprep_domain as domain;
use uuid::Uuid;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DataError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidIdentifier(#[from] domain::IdentifierError),
    #[error(transparent)]
    InvalidRer(#[from] domain::RerError),
    #[error(transparent)]
    InvalidSets(#[from] domain::SetsError),
    #[error(transparent)]
    InvalidWeeklySessions(#[from] domain::WeeklySessionsError),
    #[error("invalid {field} {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

fn parse<T: FromStr>(field: &'static str, value: &str) -> Result<T, DataError> {
    value.parse().map_err(|_| DataError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_set<T: FromStr + Ord>(
    field: &'static str,
    values: &[String],
) -> Result<BTreeSet<T>, DataError> {
    values.iter().map(|v| parse(field, v)).collect()
}

fn to_strings<T: AsRef<str>>(values: impl IntoIterator<Item = T>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect()
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub block_id: String,
    pub name: String,
    pub intent: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
    pub exercises: Vec<BlockExercise>,
    pub versions: Vec<BlockVersion>,
    #[serde(default)]
    pub coaching_notes: String,
}

impl From<&domain::Block> for Block {
    fn from(value: &domain::Block) -> Self {
        Self {
            block_id: value.id.to_string(),
            name: value.name.to_string(),
            intent: value.intent.to_string(),
            tags: value.tags.iter().cloned().collect(),
            equipment: to_strings(&value.equipment),
            contraindications: to_strings(&value.contraindications),
            exercises: value.exercises.iter().map(BlockExercise::from).collect(),
            versions: value.versions.iter().map(BlockVersion::from).collect(),
            coaching_notes: value.coaching_notes.clone(),
        }
    }
}

impl TryFrom<Block> for domain::Block {
    type Error = DataError;

    fn try_from(value: Block) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain::BlockID::new(&value.block_id)?,
            name: domain::Name::new(&value.name)?,
            intent: parse("intent", &value.intent)?,
            tags: value.tags.into_iter().collect(),
            equipment: parse_set("equipment", &value.equipment)?,
            contraindications: parse_set("contraindication", &value.contraindications)?,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::BlockExercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            versions: value
                .versions
                .into_iter()
                .map(domain::BlockVersion::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            coaching_notes: value.coaching_notes,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockExercise {
    pub exercise_id: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&domain::BlockExercise> for BlockExercise {
    fn from(value: &domain::BlockExercise) -> Self {
        Self {
            exercise_id: value.exercise_id.to_string(),
            role: value.role.to_string(),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<BlockExercise> for domain::BlockExercise {
    type Error = DataError;

    fn try_from(value: BlockExercise) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_id: domain::ExerciseID::new(&value.exercise_id)?,
            role: parse("role", &value.role)?,
            notes: value.notes,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockVersion {
    pub version_id: String,
    pub sets: u32,
    pub scheme: Scheme,
    pub rest_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rer: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
}

impl From<&domain::BlockVersion> for BlockVersion {
    fn from(value: &domain::BlockVersion) -> Self {
        Self {
            version_id: value.week.to_string(),
            sets: value.sets,
            scheme: Scheme::from(&value.scheme),
            rest_seconds: value.rest_seconds,
            rer: value.rer.map(domain::Rer::value),
            tempo: value.tempo.clone(),
        }
    }
}

impl TryFrom<BlockVersion> for domain::BlockVersion {
    type Error = DataError;

    fn try_from(value: BlockVersion) -> Result<Self, Self::Error> {
        Ok(Self {
            week: parse("version", &value.version_id)?,
            sets: domain::validate_sets(value.sets)?,
            scheme: value.scheme.try_into()?,
            rest_seconds: value.rest_seconds,
            rer: value.rer.map(domain::Rer::new).transpose()?,
            tempo: value.tempo,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scheme {
    Reps {
        reps: String,
    },
    Time {
        seconds: u32,
    },
    Emom {
        minutes: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        work: Option<EmomWork>,
    },
}

impl From<&domain::Scheme> for Scheme {
    fn from(value: &domain::Scheme) -> Self {
        match value {
            domain::Scheme::Reps { reps } => Scheme::Reps { reps: reps.clone() },
            domain::Scheme::Time { seconds } => Scheme::Time { seconds: *seconds },
            domain::Scheme::Emom { minutes, work } => Scheme::Emom {
                minutes: *minutes,
                work: work.as_ref().map(EmomWork::from),
            },
        }
    }
}

impl TryFrom<Scheme> for domain::Scheme {
    type Error = DataError;

    fn try_from(value: Scheme) -> Result<Self, Self::Error> {
        Ok(match value {
            Scheme::Reps { reps } => domain::Scheme::Reps { reps },
            Scheme::Time { seconds } => domain::Scheme::Time { seconds },
            Scheme::Emom { minutes, work } => domain::Scheme::Emom {
                minutes: domain::validate_emom_minutes(minutes)?,
                work: work.map(domain::EmomWork::from),
            },
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmomWork {
    Reps { reps: String },
    Seconds { seconds: String },
}

impl From<&domain::EmomWork> for EmomWork {
    fn from(value: &domain::EmomWork) -> Self {
        match value {
            domain::EmomWork::Reps(reps) => EmomWork::Reps { reps: reps.clone() },
            domain::EmomWork::Seconds(seconds) => EmomWork::Seconds {
                seconds: seconds.clone(),
            },
        }
    }
}

impl From<EmomWork> for domain::EmomWork {
    fn from(value: EmomWork) -> Self {
        match value {
            EmomWork::Reps { reps } => domain::EmomWork::Reps(reps),
            EmomWork::Seconds { seconds } => domain::EmomWork::Seconds(seconds),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub exercise_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            exercise_id: value.id.to_string(),
            name: value.name.to_string(),
            metric_type: value.metric_type.map(|m| m.to_string()),
            equipment: to_strings(&value.equipment),
            contraindications: to_strings(&value.contraindications),
            tags: value.tags.iter().cloned().collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = DataError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain::ExerciseID::new(&value.exercise_id)?,
            name: domain::Name::new(&value.name)?,
            metric_type: value
                .metric_type
                .map(|m| parse("metric type", &m))
                .transpose()?,
            equipment: parse_set("equipment", &value.equipment)?,
            contraindications: parse_set("contraindication", &value.contraindications)?,
            tags: value.tags.into_iter().collect(),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub injuries: Vec<String>,
    pub weekly_sessions: u8,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl From<&domain::AthleteProfile> for Profile {
    fn from(value: &domain::AthleteProfile) -> Self {
        Self {
            goal: value.goal.map(|g| g.to_string()),
            equipment: to_strings(&value.equipment),
            injuries: to_strings(&value.injuries),
            weekly_sessions: value.weekly_sessions.into(),
            level: value.level.to_string(),
            position: value.position.map(|p| p.to_string()),
        }
    }
}

impl TryFrom<Profile> for domain::AthleteProfile {
    type Error = DataError;

    fn try_from(value: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            goal: value.goal.map(|g| parse("goal", &g)).transpose()?,
            equipment: parse_set("equipment", &value.equipment)?,
            injuries: parse_set("injury", &value.injuries)?,
            weekly_sessions: domain::WeeklySessions::try_from(value.weekly_sessions)?,
            level: parse("level", &value.level)?,
            position: value.position.map(|p| parse("position", &p)).transpose()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLogEntry {
    pub exercise_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_kg: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meters: Option<f32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl From<&domain::ExerciseLogEntry> for ExerciseLogEntry {
    fn from(value: &domain::ExerciseLogEntry) -> Self {
        let performance = value.performance;
        Self {
            exercise_id: value.exercise_id.to_string(),
            load_kg: performance.and_then(domain::Performance::load_kg),
            reps: performance.and_then(domain::Performance::reps),
            seconds: performance.and_then(domain::Performance::seconds),
            meters: performance.and_then(domain::Performance::meters),
            note: value.note.clone(),
        }
    }
}

impl TryFrom<ExerciseLogEntry> for domain::ExerciseLogEntry {
    type Error = DataError;

    fn try_from(value: ExerciseLogEntry) -> Result<Self, Self::Error> {
        let performance = match (value.load_kg, value.reps, value.seconds, value.meters) {
            (Some(load_kg), reps, _, _) => Some(domain::Performance::LoadReps { load_kg, reps }),
            (None, Some(reps), _, _) => Some(domain::Performance::Reps(reps)),
            (None, None, Some(seconds), _) => Some(domain::Performance::Seconds(seconds)),
            (None, None, None, Some(meters)) => Some(domain::Performance::Meters(meters)),
            (None, None, None, None) => None,
        };
        Ok(Self {
            exercise_id: domain::ExerciseID::new(&value.exercise_id)?,
            performance,
            note: value.note,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockLog {
    pub id: Uuid,
    #[serde(rename = "dateISO")]
    pub date: NaiveDate,
    pub week: String,
    pub session_type: String,
    pub block_id: String,
    pub block_name: String,
    pub entries: Vec<ExerciseLogEntry>,
}

impl From<&domain::BlockLog> for BlockLog {
    fn from(value: &domain::BlockLog) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            week: value.week.to_string(),
            session_type: value.session_type.to_string(),
            block_id: value.block_id.to_string(),
            block_name: value.block_name.clone(),
            entries: value.entries.iter().map(ExerciseLogEntry::from).collect(),
        }
    }
}

impl TryFrom<BlockLog> for domain::BlockLog {
    type Error = DataError;

    fn try_from(value: BlockLog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            date: value.date,
            week: parse("week", &value.week)?,
            session_type: parse("session type", &value.session_type)?,
            block_id: domain::BlockID::new(&value.block_id)?,
            block_name: value.block_name,
            entries: value
                .entries
                .into_iter()
                .map(domain::ExerciseLogEntry::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionLog {
    pub id: Uuid,
    #[serde(rename = "dateISO")]
    pub date: NaiveDate,
    pub week: String,
    pub session_type: String,
    pub fatigue: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl From<&domain::SessionLog> for SessionLog {
    fn from(value: &domain::SessionLog) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            week: value.week.to_string(),
            session_type: value.session_type.to_string(),
            fatigue: value.fatigue.to_string(),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<SessionLog> for domain::SessionLog {
    type Error = DataError;

    fn try_from(value: SessionLog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            date: value.date,
            week: parse("week", &value.week)?,
            session_type: parse("session type", &value.session_type)?,
            fatigue: parse("fatigue", &value.fatigue)?,
            notes: value.notes,
        })
    }
}
