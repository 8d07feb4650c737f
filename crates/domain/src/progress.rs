use std::collections::BTreeSet;

use crate::{
    BlockLog, BuiltSession, CycleWeek, ExerciseID, ExerciseLogEntry, MetricType, Performance,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalBest {
    pub metric_type: MetricType,
    pub value: f32,
    pub text: String,
}

fn entries<'a>(
    logs: impl IntoIterator<Item = &'a BlockLog>,
    exercise_id: &'a ExerciseID,
) -> impl Iterator<Item = Performance> {
    logs.into_iter()
        .flat_map(|log| &log.entries)
        .filter(move |e| e.exercise_id == *exercise_id)
        .filter_map(|e| e.performance)
}

/// Best value ever logged for an exercise in a metric.
///
/// Higher is better, except for seconds where the shortest non-zero time wins.
#[must_use]
pub fn personal_best(
    logs: &[BlockLog],
    exercise_id: &ExerciseID,
    metric_type: MetricType,
) -> Option<PersonalBest> {
    #[allow(clippy::cast_precision_loss)]
    let candidates = entries(logs, exercise_id).filter_map(|p| match metric_type {
        MetricType::LoadReps => p.volume().map(|v| (v, p.to_string())),
        MetricType::Reps => p.reps().map(|r| (r as f32, format!("{r} reps"))),
        MetricType::Meters => p.meters().map(|m| (m, p.to_string())),
        MetricType::Seconds => p
            .seconds()
            .filter(|s| *s > 0)
            .map(|s| (-(s as f32), p.to_string())),
    });

    let (value, text) = candidates.fold(None, |best: Option<(f32, String)>, (value, text)| {
        match best {
            Some((best_value, _)) if best_value >= value => best,
            _ => Some((value, text)),
        }
    })?;

    Some(PersonalBest {
        metric_type,
        value: value.abs(),
        text,
    })
}

/// Best entry of an exercise among the logs of a week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBest {
    pub performance: Performance,
    pub score: f32,
    pub text: String,
}

/// Comparable score of an entry: load times reps, reps, meters or seconds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score(performance: Performance) -> f32 {
    match performance {
        Performance::LoadReps { .. } => performance.volume().unwrap_or_default(),
        Performance::Reps(reps) => reps as f32,
        Performance::Seconds(seconds) => seconds as f32,
        Performance::Meters(meters) => meters,
    }
}

#[must_use]
pub fn best_in_week(
    logs: &[BlockLog],
    exercise_id: &ExerciseID,
    week: CycleWeek,
) -> Option<WeekBest> {
    let best = entries(logs.iter().filter(|l| l.week == week), exercise_id).fold(
        None,
        |best: Option<Performance>, p| match best {
            Some(b) if score(b) >= score(p) => Some(b),
            _ => Some(p),
        },
    )?;
    Some(WeekBest {
        performance: best,
        score: score(best),
        text: best.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaStatus {
    Up,
    Down,
    Same,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    pub status: DeltaStatus,
    pub text: String,
    pub from_text: String,
    pub to_text: String,
    pub value: f32,
}

fn signed(value: f32) -> String {
    let rounded = value.round();
    if rounded > 0.0 {
        format!("+{rounded}")
    } else {
        format!("{}", rounded + 0.0)
    }
}

/// Change of an exercise's best entry between the first and the last week of
/// the force phase.
#[must_use]
pub fn delta_w1_w4(logs: &[BlockLog], exercise_id: &ExerciseID) -> Delta {
    let from = best_in_week(logs, exercise_id, CycleWeek::W1);
    let to = best_in_week(logs, exercise_id, CycleWeek::W4);
    let text_of = |best: &Option<WeekBest>| {
        best.as_ref()
            .map_or_else(|| String::from("n/a"), |b| b.text.clone())
    };
    let from_text = text_of(&from);
    let to_text = text_of(&to);

    let (Some(from), Some(to)) = (from, to) else {
        return Delta {
            status: DeltaStatus::Unknown,
            text: String::from("unknown"),
            from_text,
            to_text,
            value: 0.0,
        };
    };

    let kind = from.performance.metric_type();
    if kind != to.performance.metric_type() {
        return Delta {
            status: DeltaStatus::Unknown,
            text: String::from("unknown"),
            from_text,
            to_text,
            value: 0.0,
        };
    }

    let value = to.score - from.score;
    let status = if value > 0.0 {
        DeltaStatus::Up
    } else if value < 0.0 {
        DeltaStatus::Down
    } else {
        DeltaStatus::Same
    };

    let text = match (from.performance, to.performance) {
        (
            Performance::LoadReps {
                load_kg: from_load,
                reps: from_reps,
            },
            Performance::LoadReps {
                load_kg: to_load,
                reps: to_reps,
            },
        ) if (to_load - from_load).abs() > f32::EPSILON => {
            let load = to_load - from_load;
            format!(
                "{}{load} kg @ {} reps",
                if load > 0.0 { "+" } else { "" },
                to_reps.or(from_reps).unwrap_or_default()
            )
        }
        _ => match kind {
            MetricType::LoadReps | MetricType::Reps => format!("{} score", signed(value)),
            MetricType::Meters => format!("{} m", signed(value)),
            MetricType::Seconds => format!("{} s", signed(value)),
        },
    };

    Delta {
        status,
        text,
        from_text,
        to_text,
        value,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecap {
    pub logged_exercises: usize,
    pub total_exercises: usize,
    /// Sum of load × reps × sets.
    pub load_proxy: u32,
}

/// Logging progress of a composed session in a week.
#[must_use]
pub fn session_recap(logs: &[BlockLog], session: &BuiltSession, week: CycleWeek) -> SessionRecap {
    let session_type = session.session_type();
    let session_logs = logs
        .iter()
        .filter(|l| l.week == week && l.session_type == session_type)
        .collect::<Vec<_>>();

    let mut logged = BTreeSet::new();
    let mut load_proxy = 0.0;

    for b in &session.blocks {
        let Some(log) = session_logs.iter().rev().find(|l| l.block_id == b.block.id) else {
            continue;
        };
        for exercise_id in b.block.exercise_ids() {
            let Some(ExerciseLogEntry { performance, .. }) = log.entry(exercise_id) else {
                continue;
            };
            logged.insert(exercise_id);
            if let Some(volume) = performance.and_then(Performance::volume) {
                #[allow(clippy::cast_precision_loss)]
                let sets = b.version.sets as f32;
                load_proxy += volume * sets;
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let load_proxy = f32::round(load_proxy) as u32;

    SessionRecap {
        logged_exercises: logged.len(),
        total_exercises: session.exercise_ids().len(),
        load_proxy,
    }
}
