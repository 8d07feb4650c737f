use rugbyprep_domain::{ExerciseID, ExerciseLogEntry, IdentifierError, Performance};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EntryError {
    #[error("expected EXERCISE=VALUE, got {0:?}")]
    MissingValue(String),
    #[error(transparent)]
    InvalidExercise(#[from] IdentifierError),
    #[error("invalid performance {0:?} (expected e.g. 60x5, 60kg, 8, 30s or 20m)")]
    InvalidPerformance(String),
}

/// Parse a command line log entry like `bench_press=60x5`.
///
/// Accepted values are `LOADxREPS`, `LOADkg`, `REPS`, `SECONDSs` and
/// `METERSm`. An empty value records the exercise without a performance.
pub fn parse_entry(value: &str) -> Result<ExerciseLogEntry, EntryError> {
    let Some((exercise_id, performance)) = value.split_once('=') else {
        return Err(EntryError::MissingValue(value.to_string()));
    };
    let (performance, note) = match performance.split_once(':') {
        Some((performance, note)) => (performance, note.trim()),
        None => (performance, ""),
    };
    Ok(ExerciseLogEntry {
        exercise_id: ExerciseID::new(exercise_id.trim())?,
        performance: parse_performance(performance.trim())?,
        note: note.to_string(),
    })
}

fn parse_performance(value: &str) -> Result<Option<Performance>, EntryError> {
    if value.is_empty() {
        return Ok(None);
    }
    let invalid = || EntryError::InvalidPerformance(value.to_string());
    let lower = value.to_lowercase();

    let performance = if let Some((load, reps)) = lower.split_once(['x', '×']) {
        Performance::LoadReps {
            load_kg: parse_load(load.trim().trim_end_matches("kg").trim()).ok_or_else(invalid)?,
            reps: Some(reps.trim().parse().map_err(|_| invalid())?),
        }
    } else if let Some(load) = lower.strip_suffix("kg") {
        Performance::LoadReps {
            load_kg: parse_load(load.trim()).ok_or_else(invalid)?,
            reps: None,
        }
    } else if let Some(seconds) = lower.strip_suffix('s') {
        Performance::Seconds(seconds.trim().parse().map_err(|_| invalid())?)
    } else if let Some(meters) = lower.strip_suffix('m') {
        Performance::Meters(parse_load(meters.trim()).ok_or_else(invalid)?)
    } else {
        Performance::Reps(lower.parse().map_err(|_| invalid())?)
    };

    Ok(Some(performance))
}

fn parse_load(value: &str) -> Option<f32> {
    value
        .replace(',', ".")
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
