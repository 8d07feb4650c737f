use crate::{Block, CycleWeek, Phase, Position};

/// Tags favoured or discouraged for an athlete context. Preferences only
/// reorder candidates; they never exclude a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub prefer_tags: &'static [&'static str],
    pub avoid_tags: &'static [&'static str],
}

impl Position {
    #[must_use]
    pub fn preferences(self) -> Preferences {
        match self {
            Position::FrontRow => Preferences {
                prefer_tags: &["scrum", "neck", "contact", "carry", "hinge", "posterior_chain"],
                avoid_tags: &["speed"],
            },
            Position::SecondRow => Preferences {
                prefer_tags: &["carry", "hinge", "posterior_chain", "power", "contact", "trunk"],
                avoid_tags: &[],
            },
            Position::BackRow => Preferences {
                prefer_tags: &["power", "unilateral", "conditioning", "carry", "contact"],
                avoid_tags: &[],
            },
            Position::HalfBacks => Preferences {
                prefer_tags: &["speed", "unilateral", "trunk", "shoulder_health"],
                avoid_tags: &["heavy_scrum"],
            },
            Position::Centers => Preferences {
                prefer_tags: &["power", "contact", "acceleration", "trunk"],
                avoid_tags: &[],
            },
            Position::BackThree => Preferences {
                prefer_tags: &["speed", "acceleration", "unilateral", "posterior_chain"],
                avoid_tags: &["scrum"],
            },
        }
    }
}

impl Phase {
    #[must_use]
    pub fn preferences(self) -> Preferences {
        match self {
            Phase::Force => Preferences {
                prefer_tags: &[
                    "force",
                    "hinge",
                    "squat",
                    "posterior_chain",
                    "contact",
                    "trunk",
                    "shoulder_health",
                ],
                avoid_tags: &[],
            },
            Phase::Power => Preferences {
                prefer_tags: &[
                    "neural",
                    "contrast",
                    "speed",
                    "power",
                    "unilateral",
                    "plyo",
                    "med_ball",
                    "carry",
                ],
                avoid_tags: &[],
            },
        }
    }
}

/// Phase preferences of a week. The deload week uses the force phase.
#[must_use]
pub fn week_preferences(week: CycleWeek) -> Preferences {
    week.phase().unwrap_or(Phase::Force).preferences()
}

/// Relative weights of the scoring terms.
///
/// Only the ordering matters: a position or phase tag outweighs a recipe tag,
/// and an avoided tag can flip a close tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub recipe_tag: i32,
    pub prefer_tag: i32,
    pub avoid_tag: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            recipe_tag: 1,
            prefer_tag: 3,
            avoid_tag: -2,
        }
    }
}

/// Scores blocks against the combined recipe, position and phase tags.
#[derive(Debug, Clone)]
pub struct TagScorer<'a> {
    recipe_tags: &'a [String],
    prefer_tags: Vec<&'static str>,
    avoid_tags: Vec<&'static str>,
    weights: ScoreWeights,
}

impl<'a> TagScorer<'a> {
    #[must_use]
    pub fn new(
        recipe_tags: &'a [String],
        position: Position,
        week: CycleWeek,
        weights: ScoreWeights,
    ) -> Self {
        let position = position.preferences();
        let phase = week_preferences(week);
        Self {
            recipe_tags,
            prefer_tags: [position.prefer_tags, phase.prefer_tags].concat(),
            avoid_tags: [position.avoid_tags, phase.avoid_tags].concat(),
            weights,
        }
    }

    /// Tags matched by both the position and the phase count twice.
    #[must_use]
    pub fn score(&self, block: &Block) -> i32 {
        block.count_tags(self.recipe_tags) * self.weights.recipe_tag
            + block.count_tags(&self.prefer_tags) * self.weights.prefer_tag
            + block.count_tags(&self.avoid_tags) * self.weights.avoid_tag
    }
}
