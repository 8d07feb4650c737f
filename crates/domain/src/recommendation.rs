use crate::{CycleWeek, Fatigue, Intent, Rer, SessionLog};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeloadRecommendation {
    pub recommend: bool,
    pub reason: Option<String>,
}

impl DeloadRecommendation {
    fn because(reason: &str) -> Self {
        Self {
            recommend: true,
            reason: Some(reason.to_string()),
        }
    }
}

/// Whether the athlete should take a deload week after `current_week`.
///
/// Session logs are expected oldest first.
#[must_use]
pub fn recommend_deload(session_logs: &[SessionLog], current_week: CycleWeek) -> DeloadRecommendation {
    match current_week {
        CycleWeek::W4 => return DeloadRecommendation::because("End of force block"),
        CycleWeek::W8 => return DeloadRecommendation::because("End of cycle"),
        _ => {}
    }

    let last_two = &session_logs[session_logs.len().saturating_sub(2)..];
    if last_two.len() == 2 && last_two.iter().all(|log| log.fatigue == Fatigue::Fatigue) {
        return DeloadRecommendation::because("Fatigue over 2 sessions");
    }

    DeloadRecommendation::default()
}

/// Short coaching cue for a block, depending on its intent and effort reserve.
#[must_use]
pub fn rer_cue(intent: Intent, rer: Option<Rer>) -> &'static str {
    match intent {
        Intent::Neural => "Quality over fatigue. Stop before it degrades.",
        Intent::Activation | Intent::Prehab => "Control, full range, no pain.",
        Intent::Contrast | Intent::Force => match rer.map(Rer::value) {
            Some(3 | 4) => "Moderate load, perfect speed.",
            Some(2) => "Heavy but controlled.",
            Some(1) => "Very heavy, stop as soon as speed drops.",
            Some(0) => "Close to failure, no grinding, safety first.",
            _ => "Progressive load, speed first.",
        },
        Intent::Hypertrophy | Intent::Core | Intent::Neck | Intent::Carry => {
            "Clean, steady execution."
        }
    }
}
