use crate::{
    CycleWeek, ExerciseID, ExerciseLogEntry, Fatigue, MetricType, Performance, Rer, Scheme,
    metric_override,
};

pub const LOAD_INCREMENT_KG: f32 = 2.5;

const DEFAULT_TARGET_RER: Rer = Rer::THREE;

const NO_HISTORY: &str = "No history: start conservative and log your performance.";
const FATIGUE: &str = "Fatigue: stabilise to keep the quality.";

#[derive(Debug, Clone, Copy)]
pub struct SuggestionInput<'a> {
    pub exercise_id: &'a ExerciseID,
    pub metric_type: MetricType,
    pub week: CycleWeek,
    pub fatigue: Fatigue,
    pub target_rer: Option<Rer>,
    pub scheme: Option<&'a Scheme>,
    pub last: Option<&'a ExerciseLogEntry>,
}

/// Proposed next value of an exercise.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Suggestion {
    /// `None` when nothing can be derived from the history.
    pub kind: Option<MetricType>,
    pub text: String,
    pub rationale: String,
    pub load_kg: Option<f32>,
    pub reps: Option<u32>,
    pub seconds: Option<u32>,
    pub meters: Option<f32>,
    pub last_text: Option<String>,
}

#[must_use]
pub fn round_to_increment(value_kg: f32, increment: f32) -> f32 {
    ((value_kg / increment).round() * increment).max(0.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_seconds(seconds: u32, factor: f32) -> u32 {
    #[allow(clippy::cast_precision_loss)]
    let scaled = seconds as f32 * factor;
    scaled.round().max(0.0) as u32
}

fn scale_meters(meters: f32, factor: f32) -> f32 {
    (meters * factor).round().max(0.0)
}

fn load_text(load_kg: f32, reps: Option<u32>) -> String {
    match reps {
        Some(reps) => format!("{load_kg} kg × {reps}"),
        None => format!("{load_kg} kg × ?"),
    }
}

/// Suggest the next load, reps, hold time or distance of an exercise from its
/// most recent logged entry.
///
/// Deload weeks reduce the previous value, fatigue repeats it, and otherwise
/// the target effort reserve decides how much to progress. Reps-only entries
/// are never changed. An override template replaces the computed text.
#[must_use]
pub fn suggest(input: &SuggestionInput) -> Suggestion {
    let template = metric_override(input.exercise_id).map(|o| o.template);
    let rer = input.target_rer.unwrap_or(DEFAULT_TARGET_RER).value();
    let performance = input.last.and_then(|e| e.performance);
    let kind = performance.map_or_else(
        || match (input.metric_type, input.scheme) {
            (MetricType::LoadReps, Some(Scheme::Emom { .. } | Scheme::Time { .. })) => {
                MetricType::Seconds
            }
            (metric_type, _) => metric_type,
        },
        Performance::metric_type,
    );
    let last_text = performance.map(|p| format!("Last time: {p}"));
    let text = |computed: String| template.map_or(computed, ToString::to_string);

    let Some(last) = input.last else {
        let (computed, rationale) = if input.week.is_deload() {
            ("Easy effort, technique first.", "Deload: quality first.")
        } else {
            (
                match input.metric_type {
                    MetricType::Reps => "Clean reps, keep the quality.",
                    MetricType::Seconds => "Clean hold, control.",
                    MetricType::Meters => "Clean distance, stable posture.",
                    MetricType::LoadReps => "Pick a load that respects the target RER.",
                },
                NO_HISTORY,
            )
        };
        return Suggestion {
            kind: Some(kind),
            text: text(computed.to_string()),
            rationale: rationale.to_string(),
            ..Suggestion::default()
        };
    };

    let Some(performance) = last.performance else {
        return Suggestion {
            kind: None,
            text: text(String::from("Work clean and log your performance.")),
            rationale: String::from("Not enough history for a better suggestion."),
            ..Suggestion::default()
        };
    };

    let suggestion = if input.week.is_deload() {
        match performance {
            Performance::Reps(reps) => Suggestion {
                text: text(format!("Keep {reps} reps (easy load)")),
                rationale: String::from("Deload: reduce the load to recover."),
                reps: Some(reps),
                ..Suggestion::default()
            },
            Performance::LoadReps { load_kg, reps } => {
                let load_kg = round_to_increment(load_kg * 0.85, LOAD_INCREMENT_KG);
                Suggestion {
                    text: text(load_text(load_kg, reps)),
                    rationale: String::from("Deload: reduce the load (~10-20%) to recover."),
                    load_kg: Some(load_kg),
                    reps,
                    ..Suggestion::default()
                }
            }
            Performance::Meters(meters) => {
                let meters = scale_meters(meters, 0.75);
                Suggestion {
                    text: text(format!("{meters} m")),
                    rationale: String::from("Deload: reduced volume to recover."),
                    meters: Some(meters),
                    ..Suggestion::default()
                }
            }
            Performance::Seconds(seconds) => {
                let seconds = scale_seconds(seconds, 0.85);
                Suggestion {
                    text: text(format!("{seconds}s quality")),
                    rationale: String::from("Deload: lighter hold, clean execution."),
                    seconds: Some(seconds),
                    ..Suggestion::default()
                }
            }
        }
    } else if input.fatigue == Fatigue::Fatigue {
        match performance {
            Performance::Reps(reps) => Suggestion {
                text: text(format!("{reps} reps")),
                rationale: FATIGUE.to_string(),
                reps: Some(reps),
                ..Suggestion::default()
            },
            Performance::LoadReps { load_kg, reps } => Suggestion {
                text: text(load_text(load_kg, reps)),
                rationale: FATIGUE.to_string(),
                load_kg: Some(load_kg),
                reps,
                ..Suggestion::default()
            },
            Performance::Meters(meters) => Suggestion {
                text: text(format!("{meters} m")),
                rationale: String::from("Fatigue: stabilise the volume."),
                meters: Some(meters),
                ..Suggestion::default()
            },
            Performance::Seconds(seconds) => Suggestion {
                text: text(format!("{seconds}s")),
                rationale: String::from("Fatigue: same effort, clean and controlled."),
                seconds: Some(seconds),
                ..Suggestion::default()
            },
        }
    } else {
        match performance {
            Performance::Reps(reps) => Suggestion {
                text: text(format!("{reps} reps")),
                rationale: String::from("Target RER: keep the quality and log your performance."),
                reps: Some(reps),
                ..Suggestion::default()
            },
            Performance::LoadReps { load_kg, reps } => {
                let (target, rationale) = match rer {
                    0 | 1 => (load_kg, "Low RER: keep the load, execution first."),
                    2 => (load_kg * 1.0125, "RER 2: careful, controlled progression."),
                    _ => (
                        (load_kg * 1.025).max(load_kg + LOAD_INCREMENT_KG),
                        "RER 3+: you have margin, go up slightly.",
                    ),
                };
                let load_kg = round_to_increment(target, LOAD_INCREMENT_KG);
                Suggestion {
                    text: text(load_text(load_kg, reps)),
                    rationale: rationale.to_string(),
                    load_kg: Some(load_kg),
                    reps,
                    ..Suggestion::default()
                }
            }
            Performance::Meters(meters) => {
                let (factor, rationale) = match rer {
                    0 | 1 => (1.0, "Low RER: stable volume or slight increase."),
                    2 => (1.05, "Low RER: stable volume or slight increase."),
                    _ => (1.1, "RER 3+: small volume increase."),
                };
                let meters = scale_meters(meters, factor);
                Suggestion {
                    text: text(format!("{meters} m")),
                    rationale: rationale.to_string(),
                    meters: Some(meters),
                    ..Suggestion::default()
                }
            }
            Performance::Seconds(seconds) => {
                let (seconds, rationale) = if rer >= 3 {
                    (
                        scale_seconds(seconds, 1.1),
                        "RER 3+: slightly longer hold if the quality stays good.",
                    )
                } else {
                    (seconds, "Low RER: keep the same duration, focus on quality.")
                };
                Suggestion {
                    text: text(format!("{seconds}s")),
                    rationale: rationale.to_string(),
                    seconds: Some(seconds),
                    ..Suggestion::default()
                }
            }
        }
    };

    Suggestion {
        kind: Some(performance.metric_type()),
        last_text,
        ..suggestion
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::tests::data::entry;

    use super::*;

    fn input<'a>(
        exercise_id: &'a ExerciseID,
        metric_type: MetricType,
        week: CycleWeek,
        fatigue: Fatigue,
        last: Option<&'a ExerciseLogEntry>,
    ) -> SuggestionInput<'a> {
        SuggestionInput {
            exercise_id,
            metric_type,
            week,
            fatigue,
            target_rer: None,
            scheme: None,
            last,
        }
    }

    fn load_reps(load_kg: f32, reps: u32) -> Option<Performance> {
        Some(Performance::LoadReps {
            load_kg,
            reps: Some(reps),
        })
    }

    #[rstest]
    #[case(61.2, 60.0)]
    #[case(61.25, 62.5)]
    #[case(51.0, 50.0)]
    #[case(-3.0, 0.0)]
    fn test_round_to_increment(#[case] value: f32, #[case] expected: f32) {
        assert_approx_eq!(round_to_increment(value, LOAD_INCREMENT_KG), expected);
    }

    #[rstest]
    #[case::rer_3(Some(Rer::THREE), 62.5)]
    #[case::default_rer(None, 62.5)]
    #[case::rer_4(Some(Rer::FOUR), 62.5)]
    #[case::rer_2(Some(Rer::TWO), 60.0)]
    #[case::rer_1(Some(Rer::ONE), 60.0)]
    #[case::rer_0(Some(Rer::ZERO), 60.0)]
    fn test_suggest_load_progression(#[case] target_rer: Option<Rer>, #[case] expected: f32) {
        let id = ExerciseID::new("squat__back_squat__barbell").unwrap();
        let last = entry("squat__back_squat__barbell", load_reps(60.0, 5));
        let suggestion = suggest(&SuggestionInput {
            target_rer,
            ..input(&id, MetricType::LoadReps, CycleWeek::W2, Fatigue::Ok, Some(&last))
        });
        assert_eq!(suggestion.kind, Some(MetricType::LoadReps));
        assert_approx_eq!(suggestion.load_kg.unwrap(), expected);
        assert_eq!(suggestion.reps, Some(5));
        assert_eq!(suggestion.last_text, Some(String::from("Last time: 60 kg × 5")));
    }

    #[test]
    fn test_suggest_heavy_load_uses_percentage() {
        let id = ExerciseID::new("hinge__trap_bar_deadlift").unwrap();
        let last = entry("hinge__trap_bar_deadlift", load_reps(200.0, 3));
        let suggestion = suggest(&input(
            &id,
            MetricType::LoadReps,
            CycleWeek::W3,
            Fatigue::Ok,
            Some(&last),
        ));
        assert_approx_eq!(suggestion.load_kg.unwrap(), 205.0);
        assert_eq!(suggestion.text, "205 kg × 3");
        assert_eq!(suggestion.rationale, "RER 3+: you have margin, go up slightly.");
    }

    #[test]
    fn test_suggest_deload_reduces_load() {
        let id = ExerciseID::new("squat__back_squat__barbell").unwrap();
        let last = entry("squat__back_squat__barbell", load_reps(60.0, 5));
        let suggestion = suggest(&input(
            &id,
            MetricType::LoadReps,
            CycleWeek::Deload,
            Fatigue::Ok,
            Some(&last),
        ));
        assert_approx_eq!(suggestion.load_kg.unwrap(), 50.0);
        assert_eq!(suggestion.reps, Some(5));
        assert_eq!(suggestion.text, "50 kg × 5");
    }

    #[rstest]
    #[case::deload_meters(CycleWeek::Deload, Fatigue::Ok, Performance::Meters(40.0), None, None, Some(30.0))]
    #[case::deload_seconds(CycleWeek::Deload, Fatigue::Ok, Performance::Seconds(40), None, Some(34), None)]
    #[case::deload_reps(CycleWeek::Deload, Fatigue::Ok, Performance::Reps(8), Some(8), None, None)]
    #[case::fatigue_meters(CycleWeek::W2, Fatigue::Fatigue, Performance::Meters(40.0), None, None, Some(40.0))]
    #[case::fatigue_seconds(CycleWeek::W2, Fatigue::Fatigue, Performance::Seconds(40), None, Some(40), None)]
    #[case::fatigue_reps(CycleWeek::W2, Fatigue::Fatigue, Performance::Reps(8), Some(8), None, None)]
    #[case::normal_meters(CycleWeek::W2, Fatigue::Ok, Performance::Meters(40.0), None, None, Some(44.0))]
    #[case::normal_seconds(CycleWeek::W2, Fatigue::Ok, Performance::Seconds(40), None, Some(44), None)]
    #[case::normal_reps(CycleWeek::W2, Fatigue::Ok, Performance::Reps(8), Some(8), None, None)]
    fn test_suggest_other_metrics(
        #[case] week: CycleWeek,
        #[case] fatigue: Fatigue,
        #[case] performance: Performance,
        #[case] reps: Option<u32>,
        #[case] seconds: Option<u32>,
        #[case] meters: Option<f32>,
    ) {
        let id = ExerciseID::new("misc__exercise").unwrap();
        let last = entry("misc__exercise", Some(performance));
        let suggestion = suggest(&input(&id, performance.metric_type(), week, fatigue, Some(&last)));
        assert_eq!(suggestion.kind, Some(performance.metric_type()));
        assert_eq!(suggestion.reps, reps);
        assert_eq!(suggestion.seconds, seconds);
        assert_eq!(suggestion.meters, meters);
        assert_eq!(suggestion.load_kg, None);
    }

    #[test]
    fn test_suggest_fatigue_repeats_load() {
        let id = ExerciseID::new("squat__back_squat__barbell").unwrap();
        let last = entry("squat__back_squat__barbell", load_reps(60.0, 5));
        let suggestion = suggest(&input(
            &id,
            MetricType::LoadReps,
            CycleWeek::W2,
            Fatigue::Fatigue,
            Some(&last),
        ));
        assert_eq!(suggestion.load_kg, Some(60.0));
        assert_eq!(suggestion.reps, Some(5));
        assert_eq!(suggestion.rationale, "Fatigue: stabilise to keep the quality.");
    }

    #[test]
    fn test_suggest_low_rer_keeps_seconds() {
        let id = ExerciseID::new("misc__exercise").unwrap();
        let last = entry("misc__exercise", Some(Performance::Seconds(30)));
        let suggestion = suggest(&SuggestionInput {
            target_rer: Some(Rer::TWO),
            ..input(&id, MetricType::Seconds, CycleWeek::W2, Fatigue::Ok, Some(&last))
        });
        assert_eq!(suggestion.seconds, Some(30));
    }

    #[rstest]
    #[case::load(MetricType::LoadReps, CycleWeek::W1, "Pick a load that respects the target RER.", NO_HISTORY)]
    #[case::reps(MetricType::Reps, CycleWeek::W1, "Clean reps, keep the quality.", NO_HISTORY)]
    #[case::seconds(MetricType::Seconds, CycleWeek::W5, "Clean hold, control.", NO_HISTORY)]
    #[case::meters(MetricType::Meters, CycleWeek::W5, "Clean distance, stable posture.", NO_HISTORY)]
    #[case::deload(MetricType::Meters, CycleWeek::Deload, "Easy effort, technique first.", "Deload: quality first.")]
    fn test_suggest_without_history(
        #[case] metric_type: MetricType,
        #[case] week: CycleWeek,
        #[case] text: &str,
        #[case] rationale: &str,
    ) {
        let id = ExerciseID::new("misc__exercise").unwrap();
        let suggestion = suggest(&input(&id, metric_type, week, Fatigue::Ok, None));
        assert_eq!(suggestion.kind, Some(metric_type));
        assert_eq!(suggestion.text, text);
        assert_eq!(suggestion.rationale, rationale);
        assert_eq!(suggestion.last_text, None);
        assert_eq!(suggestion.load_kg, None);
    }

    #[test]
    fn test_suggest_without_history_on_timed_scheme() {
        let id = ExerciseID::new("misc__exercise").unwrap();
        let scheme = Scheme::Emom {
            minutes: 8,
            work: None,
        };
        let suggestion = suggest(&SuggestionInput {
            scheme: Some(&scheme),
            ..input(&id, MetricType::LoadReps, CycleWeek::W1, Fatigue::Ok, None)
        });
        assert_eq!(suggestion.kind, Some(MetricType::Seconds));
    }

    #[test]
    fn test_suggest_entry_without_performance() {
        let id = ExerciseID::new("misc__exercise").unwrap();
        let last = entry("misc__exercise", None);
        let suggestion = suggest(&input(
            &id,
            MetricType::LoadReps,
            CycleWeek::W2,
            Fatigue::Ok,
            Some(&last),
        ));
        assert_eq!(suggestion.kind, None);
        assert_eq!(suggestion.text, "Work clean and log your performance.");
    }

    #[test]
    fn test_suggest_uses_override_template() {
        let id = ExerciseID::new("core_anti_extension__ghd_iso").unwrap();
        let last = entry("core_anti_extension__ghd_iso", Some(Performance::Seconds(30)));
        let suggestion = suggest(&input(
            &id,
            MetricType::Seconds,
            CycleWeek::W1,
            Fatigue::Ok,
            Some(&last),
        ));
        assert_eq!(suggestion.text, "Clean hold, no arching.");
        assert_eq!(suggestion.seconds, Some(33));
        assert_eq!(suggestion.last_text, Some(String::from("Last time: 30s")));
    }
}
