use std::collections::BTreeSet;

use log::{debug, warn};

use crate::{
    AnchorKey, AnchorRepository, AthleteProfile, Block, BlockID, BlockVersion, CycleWeek,
    ExerciseID, Intent, Recipe, RecipeID, ScoreWeights, SessionType, TagScorer, eligible_blocks,
};

/// Candidates considered by rotated slots.
const ROTATION_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltBlock {
    pub block: Block,
    pub version: BlockVersion,
}

/// A composed session. Warnings never abort a composition.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltSession {
    pub recipe: RecipeID,
    pub title: String,
    pub week: CycleWeek,
    pub blocks: Vec<BuiltBlock>,
    pub warnings: Vec<String>,
}

impl BuiltSession {
    #[must_use]
    pub fn session_type(&self) -> SessionType {
        self.recipe.session_type()
    }

    #[must_use]
    pub fn count_intent(&self, predicate: impl Fn(Intent) -> bool) -> usize {
        self.blocks.iter().filter(|b| predicate(b.block.intent)).count()
    }

    /// Distinct exercises of all blocks.
    #[must_use]
    pub fn exercise_ids(&self) -> BTreeSet<&ExerciseID> {
        self.blocks
            .iter()
            .flat_map(|b| b.block.exercise_ids())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Intents tried before the others whenever they are among a step's
    /// candidate intents.
    pub priority_intents: Vec<Intent>,
    pub weights: ScoreWeights,
}

/// Compose a session by walking the steps of a recipe and picking at most one
/// eligible block per step.
///
/// Anchors of required activation, contrast and force steps are read before
/// and written after the selection. Anchor store failures are logged and
/// treated as missing anchors.
pub fn compose_session(
    profile: &AthleteProfile,
    blocks: &[Block],
    recipe: &Recipe,
    week: CycleWeek,
    anchors: &impl AnchorRepository,
    options: &ComposeOptions,
) -> BuiltSession {
    let anchor_key = AnchorKey::new(profile, week.phase(), recipe.id);
    let base_week = week.base_week();
    let mut composition = Composition {
        recipe,
        week,
        eligible: eligible_blocks(profile, blocks),
        scorer: TagScorer::new(
            &recipe.preferred_tags,
            profile.position_or_default(),
            week,
            options.weights,
        ),
        used_blocks: BTreeSet::new(),
        used_exercises: BTreeSet::new(),
        chosen: vec![],
    };
    let mut warnings = vec![];

    debug!(
        "composing {} for {week} from {} eligible blocks",
        recipe.id,
        composition.eligible.len()
    );

    for step in &recipe.steps {
        if recipe.id.stops_after_first_finisher()
            && step.intent.is_finisher()
            && composition.contains(Intent::is_finisher)
        {
            debug!("{}: skipping {} after first finisher", recipe.id, step.intent);
            continue;
        }

        if recipe.id.prehab_replaces_core()
            && step.intent == Intent::Core
            && composition.contains(|i| i == Intent::Prehab)
        {
            debug!("{}: skipping core after prehab", recipe.id);
            continue;
        }

        let anchor_intent = (step.required && step.intent.is_anchored()).then_some(step.intent);
        let anchor = anchor_intent.and_then(|i| read_anchor(anchors, &anchor_key.for_intent(i)));

        let chosen = candidate_intents(step.intent, &options.priority_intents)
            .into_iter()
            .find_map(|intent| {
                composition
                    .choose(intent, anchor.as_deref())
                    .map(|block| (intent, block))
            });

        let Some((intent, block)) = chosen else {
            if step.required {
                let warning = format!("Missing required intent '{}'.", step.intent);
                warn!("{}: {warning}", recipe.id);
                warnings.push(warning);
            }
            continue;
        };

        let version = match block.version(base_week) {
            Ok(version) => version,
            Err(err) => {
                warn!("{}: {err}", recipe.id);
                warnings.push(err.to_string());
                continue;
            }
        };

        if intent != step.intent {
            let warning = format!(
                "Fallback: intent '{}' replaced with '{intent}' ({}).",
                step.intent, block.id
            );
            warn!("{}: {warning}", recipe.id);
            warnings.push(warning);
        }

        composition.add(block, version);

        if let Some(i) = anchor_intent {
            write_anchor(anchors, &anchor_key.for_intent(i), &block.id);
        }
    }

    BuiltSession {
        recipe: recipe.id,
        title: recipe.title.clone(),
        week,
        blocks: composition
            .chosen
            .into_iter()
            .map(|(block, version)| BuiltBlock {
                block: block.clone(),
                version: version.clone(),
            })
            .collect(),
        warnings,
    }
}

/// The step's intent and its fallbacks, with priority intents moved first.
fn candidate_intents(intent: Intent, priority_intents: &[Intent]) -> Vec<Intent> {
    let mut intents = vec![intent];
    intents.extend_from_slice(intent.fallbacks());
    priority_intents
        .iter()
        .filter(|i| intents.contains(i))
        .chain(intents.iter().filter(|i| !priority_intents.contains(i)))
        .copied()
        .collect()
}

fn read_anchor(anchors: &impl AnchorRepository, key: &str) -> Option<String> {
    match anchors.read_anchor(key) {
        Ok(anchor) => anchor.filter(|a| !a.is_empty()),
        Err(err) => {
            warn!("failed to read anchor {key}: {err}");
            None
        }
    }
}

fn write_anchor(anchors: &impl AnchorRepository, key: &str, block_id: &BlockID) {
    if let Err(err) = anchors.write_anchor(key, block_id) {
        warn!("failed to write anchor {key}: {err}");
    }
}

struct Composition<'a> {
    recipe: &'a Recipe,
    week: CycleWeek,
    eligible: Vec<&'a Block>,
    scorer: TagScorer<'a>,
    used_blocks: BTreeSet<&'a BlockID>,
    used_exercises: BTreeSet<&'a ExerciseID>,
    chosen: Vec<(&'a Block, &'a BlockVersion)>,
}

impl<'a> Composition<'a> {
    fn contains(&self, predicate: impl Fn(Intent) -> bool) -> bool {
        self.chosen.iter().any(|(b, _)| predicate(b.intent))
    }

    fn add(&mut self, block: &'a Block, version: &'a BlockVersion) {
        self.used_blocks.insert(&block.id);
        self.used_exercises.extend(block.exercise_ids());
        self.chosen.push((block, version));
    }

    /// Usable blocks of an intent, best first.
    fn candidates(&self, intent: Intent) -> Vec<&'a Block> {
        let focus_tags = &self.recipe.focus_tags;
        let apply_focus = intent.is_focus_filtered() && !focus_tags.is_empty();

        let mut candidates = self
            .eligible
            .iter()
            .copied()
            .filter(|b| {
                b.intent == intent
                    && !self.used_blocks.contains(&b.id)
                    && (!apply_focus || b.has_any_tag(focus_tags))
            })
            .collect::<Vec<_>>();

        candidates.sort_by(|a, b| {
            self.scorer
                .score(b)
                .cmp(&self.scorer.score(a))
                .then_with(|| a.id.cmp(&b.id))
        });

        if self.recipe.id.separates_neural_from_context() && intent == Intent::Neural {
            let context = self
                .chosen
                .iter()
                .filter(|(b, _)| matches!(b.intent, Intent::Activation | Intent::Contrast))
                .flat_map(|(b, _)| b.exercise_ids())
                .collect::<BTreeSet<_>>();
            let (separate, overlapping): (Vec<_>, Vec<_>) = candidates
                .into_iter()
                .partition(|b| !b.exercise_ids().any(|e| context.contains(e)));
            candidates = [separate, overlapping].concat();
        }

        candidates.retain(|b| {
            b.intent.allows_exercise_overlap()
                || !b.exercise_ids().any(|e| self.used_exercises.contains(e))
        });

        candidates
    }

    fn choose(&self, intent: Intent, anchor: Option<&str>) -> Option<&'a Block> {
        let candidates = self.candidates(intent);

        debug!(
            "{} {intent}: {} usable candidates",
            self.recipe.id,
            candidates.len()
        );

        let anchored =
            anchor.and_then(|a| candidates.iter().copied().find(|b| b.id.as_str() == a));

        if let Some(block) = anchored {
            debug!("{} {intent}: keeping anchored block {}", self.recipe.id, block.id);
            return Some(block);
        }

        if intent.is_rotated() && !candidates.is_empty() {
            let window = &candidates[..candidates.len().min(ROTATION_WINDOW)];
            let block = window[self.week.phase_week_index() % window.len()];
            debug!("{} {intent}: rotated to {}", self.recipe.id, block.id);
            return Some(block);
        }

        candidates.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use crate::{
        Equipment, InMemoryAnchors, NoAnchors, ReadError, WeekVersion, WriteError, is_eligible,
        tests::data::{block, bodyweight_profile, catalog, equipped_profile},
        validate_session,
    };

    use super::*;

    fn ids(session: &BuiltSession) -> Vec<&str> {
        session.blocks.iter().map(|b| b.block.id.as_str()).collect()
    }

    fn compose(recipe: RecipeID, week: CycleWeek) -> BuiltSession {
        compose_session(
            &bodyweight_profile(),
            &catalog(),
            &Recipe::builtin(recipe),
            week,
            &NoAnchors,
            &ComposeOptions::default(),
        )
    }

    struct FailingAnchors;

    impl AnchorRepository for FailingAnchors {
        fn read_anchor(&self, _key: &str) -> Result<Option<String>, ReadError> {
            Err(ReadError::Other("unavailable".into()))
        }

        fn write_anchor(&self, _key: &str, _block_id: &str) -> Result<(), WriteError> {
            Err(WriteError::Other("unavailable".into()))
        }
    }

    #[test]
    fn test_compose_upper_bodyweight() {
        let session = compose(RecipeID::UpperV1, CycleWeek::W1);
        assert_eq!(
            ids(&session),
            vec![
                "act_upper_bw",
                "neural_upper_plyo",
                "contrast_upper_bw",
                "neck_a"
            ]
        );
        assert_eq!(session.warnings, Vec::<String>::new());
        assert_eq!(session.title, "Upper (rugby)");
        assert!(session.blocks.iter().all(|b| b.version.week == WeekVersion::W1));
        assert!(session.blocks[0].block.required_equipment().next().is_none());
        assert!(validate_session(&session).is_valid);
    }

    #[test]
    fn test_compose_lower_skips_core_after_prehab() {
        let session = compose(RecipeID::LowerV1, CycleWeek::W1);
        assert_eq!(
            ids(&session),
            vec![
                "act_lower_bw",
                "neural_lower_jump",
                "contrast_lower_bw",
                "force_lower_bw",
                "prehab_groin"
            ]
        );
        assert_eq!(session.warnings, Vec::<String>::new());
        assert!(validate_session(&session).is_valid);
    }

    #[test]
    fn test_compose_full_bodyweight() {
        let session = compose(RecipeID::FullV1, CycleWeek::W1);
        assert_eq!(
            ids(&session),
            vec![
                "act_lower_bw",
                "neural_lower_jump",
                "force_lower_bw",
                "core_dead_bug"
            ]
        );
        assert!(validate_session(&session).is_valid);
    }

    #[test]
    fn test_compose_version_follows_base_week() {
        let session = compose(RecipeID::UpperV1, CycleWeek::W7);
        assert!(session.blocks.iter().all(|b| b.version.week == WeekVersion::W3));
        assert_eq!(session.week, CycleWeek::W7);
    }

    #[test]
    fn test_compose_is_deterministic() {
        for recipe in RecipeID::iter() {
            for week in CycleWeek::iter() {
                assert_eq!(compose(recipe, week), compose(recipe, week));
            }
        }
    }

    #[rstest]
    #[case::bodyweight(bodyweight_profile())]
    #[case::equipped(equipped_profile())]
    fn test_compose_selects_eligible_blocks_without_shared_exercises(
        #[case] profile: AthleteProfile,
    ) {
        let catalog = catalog();
        for recipe in RecipeID::iter() {
            for week in CycleWeek::iter() {
                let session = compose_session(
                    &profile,
                    &catalog,
                    &Recipe::builtin(recipe),
                    week,
                    &NoAnchors,
                    &ComposeOptions::default(),
                );
                let mut seen = BTreeSet::new();
                for b in &session.blocks {
                    assert!(is_eligible(&profile, &b.block));
                    if !b.block.intent.allows_exercise_overlap() {
                        for e in b.block.exercise_ids() {
                            assert!(seen.insert(e.clone()), "{e} used twice in {recipe} {week}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_compose_rotation() {
        let neck = |week| compose(RecipeID::UpperV1, week).blocks[3].block.id.to_string();
        assert_eq!(neck(CycleWeek::W1), "neck_a");
        assert_eq!(neck(CycleWeek::W2), "neck_b");
        assert_eq!(neck(CycleWeek::W3), "neck_c");
        assert_eq!(neck(CycleWeek::W4), "neck_a");
        for (a, b) in [
            (CycleWeek::W1, CycleWeek::W5),
            (CycleWeek::W2, CycleWeek::W6),
            (CycleWeek::W3, CycleWeek::W7),
            (CycleWeek::W4, CycleWeek::W8),
        ] {
            assert_eq!(neck(a), neck(b));
        }
    }

    #[test]
    fn test_compose_missing_required_intent() {
        let profile = bodyweight_profile();
        let blocks = catalog()
            .into_iter()
            .filter(|b| !b.intent.is_main() || b.has_tag("lower"))
            .collect::<Vec<_>>();
        let session = compose_session(
            &profile,
            &blocks,
            &Recipe::builtin(RecipeID::UpperV1),
            CycleWeek::W1,
            &NoAnchors,
            &ComposeOptions::default(),
        );
        assert_eq!(
            session.warnings,
            vec![String::from("Missing required intent 'contrast'.")]
        );
        assert_eq!(session.count_intent(Intent::is_main), 0);
        assert!(!validate_session(&session).is_valid);
    }

    #[test]
    fn test_compose_fallback_intent() {
        let blocks = catalog()
            .into_iter()
            .filter(|b| b.intent != Intent::Force)
            .collect::<Vec<_>>();
        let session = compose_session(
            &bodyweight_profile(),
            &blocks,
            &Recipe::builtin(RecipeID::FullV1),
            CycleWeek::W1,
            &NoAnchors,
            &ComposeOptions::default(),
        );
        assert_eq!(
            session.warnings,
            vec![String::from(
                "Fallback: intent 'force' replaced with 'contrast' (contrast_upper_bw)."
            )]
        );
    }

    #[test]
    fn test_compose_priority_intents() {
        let session = compose_session(
            &bodyweight_profile(),
            &catalog(),
            &Recipe::builtin(RecipeID::FullV1),
            CycleWeek::W1,
            &NoAnchors,
            &ComposeOptions {
                priority_intents: vec![Intent::Contrast],
                ..ComposeOptions::default()
            },
        );
        assert!(
            session
                .blocks
                .iter()
                .any(|b| b.block.id.as_str() == "contrast_upper_bw")
        );
        assert_eq!(session.count_intent(|i| i == Intent::Force), 0);
    }

    #[test]
    fn test_compose_missing_version() {
        let blocks = catalog()
            .into_iter()
            .map(|mut b| {
                if b.id.as_str() == "contrast_upper_bw" {
                    b.versions.retain(|v| v.week != WeekVersion::W2);
                }
                b
            })
            .collect::<Vec<_>>();
        let session = compose_session(
            &bodyweight_profile(),
            &blocks,
            &Recipe::builtin(RecipeID::UpperV1),
            CycleWeek::W6,
            &NoAnchors,
            &ComposeOptions::default(),
        );
        assert_eq!(
            session.warnings,
            vec![String::from(
                "Block 'contrast_upper_bw' skipped because version 'W2' is missing."
            )]
        );
        assert_eq!(session.count_intent(Intent::is_main), 0);
    }

    #[test]
    fn test_compose_focus_filter() {
        let mut blocks = catalog();
        blocks.push(block("act_aaa_untagged", Intent::Activation, &[], &["arm_circle"]));
        let session = compose_session(
            &bodyweight_profile(),
            &blocks,
            &Recipe::builtin(RecipeID::UpperV1),
            CycleWeek::W1,
            &NoAnchors,
            &ComposeOptions::default(),
        );
        assert_eq!(session.blocks[0].block.id.as_str(), "act_upper_bw");
        let session = compose_session(
            &bodyweight_profile(),
            &blocks,
            &Recipe::builtin(RecipeID::FullV1),
            CycleWeek::W1,
            &NoAnchors,
            &ComposeOptions::default(),
        );
        assert_eq!(session.blocks[0].block.id.as_str(), "act_aaa_untagged");
    }

    #[test]
    fn test_compose_anchors() {
        let anchors = InMemoryAnchors::new();
        let profile = bodyweight_profile();
        let recipe = Recipe::builtin(RecipeID::FullV1);
        let compose = |week, blocks: &[Block]| {
            compose_session(
                &profile,
                blocks,
                &recipe,
                week,
                &anchors,
                &ComposeOptions::default(),
            )
        };

        let session = compose(CycleWeek::W1, &catalog());
        assert_eq!(session.blocks[0].block.id.as_str(), "act_lower_bw");
        let key = AnchorKey::new(&profile, Some(crate::Phase::Force), RecipeID::FullV1);
        assert_eq!(
            anchors.snapshot(),
            BTreeMap::from([
                (key.for_intent(Intent::Activation), String::from("act_lower_bw")),
                (key.for_intent(Intent::Force), String::from("force_lower_bw")),
            ])
        );

        // a new top-scored block does not replace the anchored one
        let mut blocks = catalog();
        blocks.push(block("act_aaa_new", Intent::Activation, &[], &["arm_circle"]));
        let session = compose(CycleWeek::W2, &blocks);
        assert_eq!(session.blocks[0].block.id.as_str(), "act_lower_bw");

        // the anchor of another phase is independent
        let session = compose(CycleWeek::W5, &blocks);
        assert_eq!(session.blocks[0].block.id.as_str(), "act_aaa_new");
    }

    #[test]
    fn test_compose_ignores_anchor_store_failures() {
        let session = compose_session(
            &bodyweight_profile(),
            &catalog(),
            &Recipe::builtin(RecipeID::UpperV1),
            CycleWeek::W1,
            &FailingAnchors,
            &ComposeOptions::default(),
        );
        assert_eq!(session, compose(RecipeID::UpperV1, CycleWeek::W1));
    }

    #[test]
    fn test_compose_stale_anchor() {
        let profile = bodyweight_profile();
        let key = AnchorKey::new(&profile, Some(crate::Phase::Force), RecipeID::UpperV1);
        let anchors = InMemoryAnchors::from(BTreeMap::from([(
            key.for_intent(Intent::Activation),
            String::from("act_upper_band"),
        )]));
        let session = compose_session(
            &profile,
            &catalog(),
            &Recipe::builtin(RecipeID::UpperV1),
            CycleWeek::W1,
            &anchors,
            &ComposeOptions::default(),
        );
        assert_eq!(session.blocks[0].block.id.as_str(), "act_upper_bw");
        assert_eq!(
            anchors.read_anchor(&key.for_intent(Intent::Activation)).unwrap(),
            Some(String::from("act_upper_bw"))
        );
    }

    #[test]
    fn test_compose_equipped_prefers_position_tags() {
        let mut profile = equipped_profile();
        profile.equipment.insert(Equipment::MedBall);
        let session = compose_session(
            &profile,
            &catalog(),
            &Recipe::builtin(RecipeID::LowerV1),
            CycleWeek::W1,
            &NoAnchors,
            &ComposeOptions::default(),
        );
        assert!(
            session
                .blocks
                .iter()
                .any(|b| b.block.id.as_str() == "force_lower_hinge")
        );
    }

    #[rstest]
    #[case(Intent::Force, &[], vec![Intent::Force, Intent::Contrast])]
    #[case(Intent::Force, &[Intent::Contrast], vec![Intent::Contrast, Intent::Force])]
    #[case(Intent::Neck, &[Intent::Contrast], vec![Intent::Neck, Intent::Core])]
    #[case(Intent::Carry, &[], vec![Intent::Carry])]
    fn test_candidate_intents(
        #[case] intent: Intent,
        #[case] priority: &[Intent],
        #[case] expected: Vec<Intent>,
    ) {
        assert_eq!(candidate_intents(intent, priority), expected);
    }
}
