use std::{collections::BTreeMap, sync::LazyLock};

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Exercise, ExerciseID};

/// Primary quantity logged for an exercise.
#[derive(AsRefStr, Display, EnumIter, EnumString, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum MetricType {
    LoadReps,
    Reps,
    Seconds,
    Meters,
}

/// Quality an athlete should try to improve from one session to the next.
#[derive(AsRefStr, Display, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum ProgressionHint {
    Load,
    Distance,
    Height,
    Quality,
    Speed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricOverride {
    pub metric_type: MetricType,
    pub hint: ProgressionHint,
    /// Coaching text shown instead of a computed suggestion.
    pub template: &'static str,
}

/// Where a resolved metric type came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSource {
    Override,
    Metadata,
    NamePattern,
    Default,
}

const DISTANCE_PATTERNS: [&str; 6] = ["carry__", "sled__", "_walk", "_march", "_run", "_sprint"];
const TIME_PATTERNS: [&str; 6] = ["__iso", "_iso_", "isometric", "plank", "copenhagen", "hold"];

pub static METRIC_OVERRIDES: LazyLock<BTreeMap<&'static str, MetricOverride>> =
    LazyLock::new(|| {
        use MetricType::{LoadReps, Meters, Reps, Seconds};
        use ProgressionHint::{Distance, Height, Load, Quality, Speed};

        [
            // plyometrics
            ("push_horizontal__push_up__plyo", Reps, Speed, "Explosive reps, stop when speed drops."),
            ("push_horizontal__push_up__oscillation", Reps, Speed, "Fast rhythm, quality before fatigue."),
            ("lower_jump__broad_jump__seated", Meters, Distance, "Chase distance with a clean landing."),
            ("power__jump__broad_jump", Meters, Distance, "Distance or quality, no grinding."),
            ("power__jump__box_jump", Reps, Height, "Clean jumps, height stable or slightly up."),
            ("power__jump__vertical_jump", Reps, Height, "Clean reps, chase height without fatigue."),
            ("lower_jump__box_squat_jump", Reps, Speed, "Explosive, stop when speed drops."),
            ("unilateral__jump_step_up", Reps, Speed, "Clean reps per leg, speed before volume."),
            ("power__bound__single_leg", Meters, Distance, "Distance with a stable pelvis."),
            // med ball
            ("power__medball_chest_pass__wall", Reps, Speed, "Explosive throw, full release."),
            ("power__medball_slam__overhead", Reps, Speed, "Fast slam, strong brace."),
            ("power__medball_rotational_throw__wall", Reps, Speed, "Fast rotation, trunk under control."),
            // carries
            ("carry__farmer_walk__dumbbell", Meters, Distance, "Tall posture, clean distance."),
            ("carry__suitcase_walk__dumbbell", Meters, Distance, "Braced trunk, no leaning."),
            ("carry__overhead_carry__dumbbell", Meters, Quality, "Arm locked, stable posture."),
            ("carry__overhead_hold__dumbbell", Seconds, Quality, "Clean hold, stable shoulder."),
            ("carry__farmer_hold__dumbbell", Seconds, Quality, "Tall posture, solid grip."),
            ("carry__zercher_carry__barbell", Meters, Distance, "Solid trunk, calm breathing."),
            // isometrics
            ("core_anti_extension__ghd_iso", Seconds, Quality, "Clean hold, no arching."),
            ("core_anti_extension__front_plank", Seconds, Quality, "Ribs down, stable posture."),
            ("core_anti_rotation__side_plank", Seconds, Quality, "Stable pelvis, calm breathing."),
            ("core_anti_extension__hollow_hold", Seconds, Quality, "Lower back pressed down, control."),
            ("groin_adductors__copenhagen_plank__short", Seconds, Quality, "Stable hip, no pain."),
            ("groin_adductors__copenhagen_plank__long", Seconds, Quality, "Clean hold, stop on pain."),
            ("hamstring__bridge_iso__single_leg", Seconds, Quality, "Stable pelvis, hamstrings engaged."),
            ("neck__flexion_iso__band", Seconds, Quality, "Neutral head, progressive resistance."),
            ("neck__extension_iso__band", Seconds, Quality, "Control, no hyperextension."),
            ("neck__lateral_flexion_iso__band", Seconds, Quality, "Clean hold, stable base."),
            ("neck__rotation_iso__band", Seconds, Quality, "Resist the rotation without moving."),
            // strength lifts
            ("push_horizontal__bench_press__barbell", LoadReps, Load, "Progressive load, crisp speed."),
            ("push_horizontal__board_press__barbell", LoadReps, Load, "Heavy but controlled, speed first."),
            ("squat__front_squat__barbell", LoadReps, Load, "Solid trunk, go up slightly if clean."),
            ("hinge__rdl__barbell", LoadReps, Load, "Neutral back, steady load."),
            ("pull_horizontal__tbar_row", LoadReps, Load, "Powerful pull, controlled."),
        ]
        .into_iter()
        .map(|(id, metric_type, hint, template)| {
            (
                id,
                MetricOverride {
                    metric_type,
                    hint,
                    template,
                },
            )
        })
        .collect()
    });

#[must_use]
pub fn metric_override(exercise_id: &str) -> Option<&'static MetricOverride> {
    METRIC_OVERRIDES.get(exercise_id)
}

/// Resolve the metric type of an exercise.
///
/// Resolution order: override table, declared exercise metadata, identifier
/// patterns (distance before time), then load and reps.
#[must_use]
pub fn resolve_metric_type(
    exercise_id: &ExerciseID,
    exercises: &BTreeMap<ExerciseID, Exercise>,
) -> (MetricType, MetricSource) {
    if let Some(o) = metric_override(exercise_id) {
        return (o.metric_type, MetricSource::Override);
    }

    if let Some(metric_type) = exercises.get(exercise_id).and_then(|e| e.metric_type) {
        return (metric_type, MetricSource::Metadata);
    }

    let id = exercise_id.to_lowercase();

    if DISTANCE_PATTERNS.iter().any(|p| id.contains(p)) {
        return (MetricType::Meters, MetricSource::NamePattern);
    }

    if TIME_PATTERNS.iter().any(|p| id.contains(p)) {
        return (MetricType::Seconds, MetricSource::NamePattern);
    }

    (MetricType::LoadReps, MetricSource::Default)
}

#[must_use]
pub fn metric_type(exercise_id: &ExerciseID, exercises: &BTreeMap<ExerciseID, Exercise>) -> MetricType {
    resolve_metric_type(exercise_id, exercises).0
}
