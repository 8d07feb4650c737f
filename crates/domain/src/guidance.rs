use crate::{CycleWeek, WeekVersion};

/// Coaching guidance shown with the program of a week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGuidance {
    pub title: &'static str,
    pub focus: &'static str,
    pub intensity_cue: &'static str,
    pub key_rules: [&'static str; 3],
}

const W1: WeekGuidance = WeekGuidance {
    title: "Setup",
    focus: "Settle technique and session rhythm.",
    intensity_cue: "High effort reserve, technique first.",
    key_rules: [
        "Keep 3-4 reps in reserve on heavy blocks.",
        "Stop when bar speed clearly drops.",
        "Quality of execution before load.",
    ],
};

const W2: WeekGuidance = WeekGuidance {
    title: "Progressive build",
    focus: "Raise loads slightly without losing form.",
    intensity_cue: "A bit heavier, still clean.",
    key_rules: [
        "Add a small load increment if W1 felt easy.",
        "Keep 2-3 reps in reserve on main blocks.",
        "Stay explosive on neural and contrast blocks.",
    ],
};

const W3: WeekGuidance = WeekGuidance {
    title: "Key week",
    focus: "Most demanding work block with maximal quality.",
    intensity_cue: "Low effort reserve, controlled intensity.",
    key_rules: [
        "Work heavy but stop before grinding.",
        "Prioritise posture and control under fatigue.",
        "Reduce the load on pain or dropping speed.",
    ],
};

const W4: WeekGuidance = WeekGuidance {
    title: "Intensity peak",
    focus: "Approach a controlled maximum on main blocks.",
    intensity_cue: "Very close to failure on the main block, without compromising safety.",
    key_rules: [
        "On the main block, stop as soon as technique breaks down.",
        "Strict recovery: sleep, hydration, mobility.",
        "If form is average, keep the W3 load.",
    ],
};

const DELOAD: WeekGuidance = WeekGuidance {
    title: "Deload",
    focus: "Same session structure with a deliberately reduced internal load.",
    intensity_cue: "Lighten the load and keep clean execution from start to finish.",
    key_rules: [
        "Cut volume by about 30-40 % and keep reps in reserve.",
        "Speed, control and no pain come first.",
        "Recover properly to prepare the next cycle.",
    ],
};

impl CycleWeek {
    /// Guidance of the week. Weeks of the power phase share the guidance of
    /// their canonical week.
    #[must_use]
    pub fn guidance(self) -> &'static WeekGuidance {
        if self.is_deload() {
            return &DELOAD;
        }
        match self.base_week() {
            WeekVersion::W1 => &W1,
            WeekVersion::W2 => &W2,
            WeekVersion::W3 => &W3,
            WeekVersion::W4 => &W4,
        }
    }
}
