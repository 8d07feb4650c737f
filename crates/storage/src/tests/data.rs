use std::{collections::BTreeSet, sync::LazyLock};

use chrono::NaiveDate;
use rugbyprep_domain as domain;

fn version(
    week: domain::WeekVersion,
    sets: u32,
    scheme: domain::Scheme,
    rer: Option<domain::Rer>,
) -> domain::BlockVersion {
    domain::BlockVersion {
        week,
        sets,
        scheme,
        rest_seconds: 120,
        rer,
        tempo: None,
    }
}

fn reps(reps: &str) -> domain::Scheme {
    domain::Scheme::Reps {
        reps: reps.to_string(),
    }
}

fn exercise(id: &str, role: domain::Role, notes: Option<&str>) -> domain::BlockExercise {
    domain::BlockExercise {
        exercise_id: domain::ExerciseID::new(id).unwrap(),
        role,
        notes: notes.map(ToString::to_string),
    }
}

pub static BLOCK: LazyLock<domain::Block> = LazyLock::new(|| domain::Block {
    id: domain::BlockID::new("force_lower_hinge").unwrap(),
    name: domain::Name::new("Hinge strength").unwrap(),
    intent: domain::Intent::Force,
    tags: BTreeSet::from([String::from("lower"), String::from("hinge")]),
    equipment: BTreeSet::from([domain::Equipment::Barbell]),
    contraindications: BTreeSet::from([domain::Contraindication::LowBackPain]),
    exercises: vec![exercise("rdl", domain::Role::Prime, Some("Neutral spine"))],
    versions: vec![
        domain::BlockVersion {
            tempo: Some(String::from("30X0")),
            ..version(
                domain::WeekVersion::W1,
                3,
                reps("6"),
                Some(domain::Rer::THREE),
            )
        },
        version(
            domain::WeekVersion::W2,
            4,
            reps("5"),
            Some(domain::Rer::TWO),
        ),
        version(
            domain::WeekVersion::W3,
            4,
            reps("3+3"),
            Some(domain::Rer::TWO),
        ),
        version(
            domain::WeekVersion::W4,
            5,
            reps("3"),
            Some(domain::Rer::ONE),
        ),
    ],
    coaching_notes: String::from("Drive the hips back."),
});

pub static EMOM_BLOCK: LazyLock<domain::Block> = LazyLock::new(|| domain::Block {
    id: domain::BlockID::new("neck_emom").unwrap(),
    name: domain::Name::new("Neck EMOM").unwrap(),
    intent: domain::Intent::Neck,
    tags: BTreeSet::from([String::from("neck")]),
    equipment: BTreeSet::from([domain::Equipment::None]),
    contraindications: BTreeSet::new(),
    exercises: vec![
        exercise("neck__iso_front", domain::Role::Stability, None),
        exercise("neck__iso_side", domain::Role::Accessory, None),
    ],
    versions: vec![
        version(
            domain::WeekVersion::W1,
            1,
            domain::Scheme::Emom {
                minutes: 6,
                work: Some(domain::EmomWork::Seconds(String::from("20"))),
            },
            None,
        ),
        version(
            domain::WeekVersion::W2,
            1,
            domain::Scheme::Emom {
                minutes: 8,
                work: Some(domain::EmomWork::Reps(String::from("5"))),
            },
            None,
        ),
        version(
            domain::WeekVersion::W3,
            1,
            domain::Scheme::Emom {
                minutes: 8,
                work: None,
            },
            None,
        ),
        version(
            domain::WeekVersion::W4,
            2,
            domain::Scheme::Time { seconds: 30 },
            Some(domain::Rer::FOUR),
        ),
    ],
    coaching_notes: String::new(),
});

pub static ACTIVATION_BLOCK: LazyLock<domain::Block> = LazyLock::new(|| domain::Block {
    id: domain::BlockID::new("act_lower").unwrap(),
    name: domain::Name::new("Lower activation").unwrap(),
    intent: domain::Intent::Activation,
    tags: BTreeSet::from([String::from("lower")]),
    equipment: BTreeSet::new(),
    contraindications: BTreeSet::new(),
    exercises: vec![exercise("glute_bridge", domain::Role::Prime, None)],
    versions: [
        domain::WeekVersion::W1,
        domain::WeekVersion::W2,
        domain::WeekVersion::W3,
        domain::WeekVersion::W4,
    ]
    .into_iter()
    .map(|week| version(week, 2, reps("10"), None))
    .collect(),
    coaching_notes: String::new(),
});

pub static EXERCISE: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: domain::ExerciseID::new("core_anti_extension__ghd_iso").unwrap(),
    name: domain::Name::new("GHD isometric hold").unwrap(),
    metric_type: Some(domain::MetricType::Seconds),
    equipment: BTreeSet::from([domain::Equipment::Ghd]),
    contraindications: BTreeSet::from([domain::Contraindication::LowBackPain]),
    tags: BTreeSet::from([String::from("core")]),
});

pub static PROFILE: LazyLock<domain::AthleteProfile> =
    LazyLock::new(|| domain::AthleteProfile {
        goal: Some(domain::Goal::Strength),
        equipment: BTreeSet::from([domain::Equipment::Barbell, domain::Equipment::Band]),
        injuries: BTreeSet::from([domain::Contraindication::GroinPain]),
        weekly_sessions: domain::WeeklySessions::Three,
        level: domain::Level::Intermediate,
        position: Some(domain::Position::FrontRow),
    });

pub static BLOCK_LOG: LazyLock<domain::BlockLog> = LazyLock::new(|| domain::BlockLog {
    id: 1.into(),
    date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    week: domain::CycleWeek::W1,
    session_type: domain::SessionType::Upper,
    block_id: domain::BlockID::new("contrast_upper_bench").unwrap(),
    block_name: String::from("Bench contrast"),
    entries: vec![
        domain::ExerciseLogEntry {
            exercise_id: domain::ExerciseID::new("bench_press").unwrap(),
            performance: Some(domain::Performance::LoadReps {
                load_kg: 60.0,
                reps: Some(5),
            }),
            note: String::new(),
        },
        domain::ExerciseLogEntry {
            exercise_id: domain::ExerciseID::new("plyo_push_up").unwrap(),
            performance: Some(domain::Performance::Reps(8)),
            note: String::from("fast"),
        },
    ],
});

pub static SESSION_LOG: LazyLock<domain::SessionLog> = LazyLock::new(|| domain::SessionLog {
    id: 2.into(),
    date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
    week: domain::CycleWeek::Deload,
    session_type: domain::SessionType::Lower,
    fatigue: domain::Fatigue::Fatigue,
    notes: String::from("heavy legs"),
});
