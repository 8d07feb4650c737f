use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Intent, SessionType};

#[derive(
    AsRefStr, Display, EnumIter, EnumString, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord,
)]
pub enum RecipeID {
    #[strum(serialize = "UPPER_V1")]
    UpperV1,
    #[strum(serialize = "LOWER_V1")]
    LowerV1,
    #[strum(serialize = "FULL_V1")]
    FullV1,
}

impl RecipeID {
    #[must_use]
    pub fn session_type(self) -> SessionType {
        match self {
            RecipeID::UpperV1 => SessionType::Upper,
            RecipeID::LowerV1 => SessionType::Lower,
            RecipeID::FullV1 => SessionType::Full,
        }
    }

    /// Finisher blocks (neck, core, carry) a session of this recipe may hold.
    #[must_use]
    pub fn max_finishers(self) -> usize {
        match self {
            RecipeID::UpperV1 | RecipeID::LowerV1 => 1,
            RecipeID::FullV1 => 2,
        }
    }

    /// Upper sessions stop filling finisher slots once one has been placed.
    #[must_use]
    pub fn stops_after_first_finisher(self) -> bool {
        matches!(self, RecipeID::UpperV1)
    }

    /// Lower sessions skip the core slot when prehab already covers the trunk.
    #[must_use]
    pub fn prehab_replaces_core(self) -> bool {
        matches!(self, RecipeID::LowerV1)
    }

    /// Upper sessions prefer neural blocks that do not reuse the exercises of
    /// the activation and contrast blocks.
    #[must_use]
    pub fn separates_neural_from_context(self) -> bool {
        matches!(self, RecipeID::UpperV1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeStep {
    pub intent: Intent,
    pub required: bool,
}

/// Ordered template of intents defining one session type.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeID,
    pub title: String,
    pub steps: Vec<RecipeStep>,
    pub preferred_tags: Vec<String>,
    /// Blocks of focus-filtered intents must carry one of these tags. Empty
    /// means no restriction.
    pub focus_tags: Vec<String>,
}

impl Recipe {
    #[must_use]
    pub fn builtin(id: RecipeID) -> Recipe {
        let steps = |steps: &[(Intent, bool)]| {
            steps
                .iter()
                .map(|(intent, required)| RecipeStep {
                    intent: *intent,
                    required: *required,
                })
                .collect::<Vec<_>>()
        };
        let tags = |tags: &[&str]| tags.iter().map(ToString::to_string).collect::<Vec<_>>();

        match id {
            RecipeID::UpperV1 => Recipe {
                id,
                title: String::from("Upper (rugby)"),
                steps: steps(&[
                    (Intent::Activation, true),
                    (Intent::Neural, false),
                    (Intent::Contrast, true),
                    (Intent::Neck, false),
                    (Intent::Core, false),
                    (Intent::Carry, false),
                ]),
                preferred_tags: tags(&["upper", "push", "pull", "shoulder_health", "contact"]),
                focus_tags: tags(&["upper"]),
            },
            RecipeID::LowerV1 => Recipe {
                id,
                title: String::from("Lower (rugby)"),
                steps: steps(&[
                    (Intent::Activation, true),
                    (Intent::Neural, false),
                    (Intent::Contrast, true),
                    (Intent::Force, false),
                    (Intent::Prehab, false),
                    (Intent::Core, false),
                ]),
                preferred_tags: tags(&["lower", "hinge", "squat", "groin", "posterior_chain"]),
                focus_tags: tags(&["lower"]),
            },
            RecipeID::FullV1 => Recipe {
                id,
                title: String::from("Full Body (rugby)"),
                steps: steps(&[
                    (Intent::Activation, true),
                    (Intent::Neural, true),
                    (Intent::Force, true),
                    (Intent::Core, false),
                    (Intent::Carry, false),
                ]),
                preferred_tags: tags(&["full", "power", "posterior_chain"]),
                focus_tags: vec![],
            },
        }
    }
}

pub static RECIPES: std::sync::LazyLock<Vec<Recipe>> = std::sync::LazyLock::new(|| {
    [RecipeID::UpperV1, RecipeID::LowerV1, RecipeID::FullV1]
        .into_iter()
        .map(Recipe::builtin)
        .collect()
});
