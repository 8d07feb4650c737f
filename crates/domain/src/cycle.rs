use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A week of the eight-week cycle, or the optional deload week.
#[derive(AsRefStr, Display, EnumIter, EnumString, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CycleWeek {
    #[default]
    W1,
    W2,
    W3,
    W4,
    W5,
    W6,
    W7,
    W8,
    Deload,
}

impl CycleWeek {
    #[must_use]
    pub fn is_deload(self) -> bool {
        self == CycleWeek::Deload
    }

    /// Canonical week whose scheme version is used for this week.
    ///
    /// The deload week maps onto `W4`. Callers that want the deload week to
    /// reuse the previous week's selection resolve it first with
    /// [`resolve_selection_week`].
    #[must_use]
    pub fn base_week(self) -> WeekVersion {
        match self {
            CycleWeek::W1 | CycleWeek::W5 => WeekVersion::W1,
            CycleWeek::W2 | CycleWeek::W6 => WeekVersion::W2,
            CycleWeek::W3 | CycleWeek::W7 => WeekVersion::W3,
            CycleWeek::W4 | CycleWeek::W8 | CycleWeek::Deload => WeekVersion::W4,
        }
    }

    #[must_use]
    pub fn phase(self) -> Option<Phase> {
        match self {
            CycleWeek::W1 | CycleWeek::W2 | CycleWeek::W3 | CycleWeek::W4 => Some(Phase::Force),
            CycleWeek::W5 | CycleWeek::W6 | CycleWeek::W7 | CycleWeek::W8 => Some(Phase::Power),
            CycleWeek::Deload => None,
        }
    }

    /// Position of the week within its phase (0 to 3).
    #[must_use]
    pub fn phase_week_index(self) -> usize {
        match self {
            CycleWeek::W1 | CycleWeek::W5 | CycleWeek::Deload => 0,
            CycleWeek::W2 | CycleWeek::W6 => 1,
            CycleWeek::W3 | CycleWeek::W7 => 2,
            CycleWeek::W4 | CycleWeek::W8 => 3,
        }
    }

    #[must_use]
    pub fn number(self) -> Option<u8> {
        match self {
            CycleWeek::W1 => Some(1),
            CycleWeek::W2 => Some(2),
            CycleWeek::W3 => Some(3),
            CycleWeek::W4 => Some(4),
            CycleWeek::W5 => Some(5),
            CycleWeek::W6 => Some(6),
            CycleWeek::W7 => Some(7),
            CycleWeek::W8 => Some(8),
            CycleWeek::Deload => None,
        }
    }

    /// Week that follows in the cycle. Each phase ends with a deload, which
    /// leads back to the start of the cycle.
    #[must_use]
    pub fn next(self) -> CycleWeek {
        match self {
            CycleWeek::W1 => CycleWeek::W2,
            CycleWeek::W2 => CycleWeek::W3,
            CycleWeek::W3 => CycleWeek::W4,
            CycleWeek::W5 => CycleWeek::W6,
            CycleWeek::W6 => CycleWeek::W7,
            CycleWeek::W7 => CycleWeek::W8,
            CycleWeek::W4 | CycleWeek::W8 => CycleWeek::Deload,
            CycleWeek::Deload => CycleWeek::W1,
        }
    }
}

impl From<WeekVersion> for CycleWeek {
    fn from(value: WeekVersion) -> Self {
        match value {
            WeekVersion::W1 => CycleWeek::W1,
            WeekVersion::W2 => CycleWeek::W2,
            WeekVersion::W3 => CycleWeek::W3,
            WeekVersion::W4 => CycleWeek::W4,
        }
    }
}

/// Week whose blocks are selected when composing `week`.
///
/// A deload week keeps the selection of the last regular week and only
/// reduces its volume afterwards.
#[must_use]
pub fn resolve_selection_week(week: CycleWeek, last_non_deload: Option<CycleWeek>) -> CycleWeek {
    if week.is_deload() {
        last_non_deload
            .filter(|w| !w.is_deload())
            .unwrap_or_default()
    } else {
        week
    }
}

/// One of the four canonical weeks a block defines a scheme version for.
#[derive(AsRefStr, Display, EnumIter, EnumString, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeekVersion {
    W1,
    W2,
    W3,
    W4,
}

#[derive(AsRefStr, Display, EnumIter, EnumString, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Force,
    Power,
}

#[derive(AsRefStr, Display, EnumIter, EnumString, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Upper,
    Lower,
    Full,
}

#[derive(AsRefStr, Display, EnumString, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Fatigue {
    #[default]
    Ok,
    Fatigue,
}
