use log::{debug, warn};

use crate::{
    AnchorRepository, AthleteProfile, Block, BuiltSession, ComposeOptions, CycleWeek, Recipe,
    apply_deload, compose_session, resolve_selection_week, validate_session,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WeekProgram {
    pub week: CycleWeek,
    pub sessions: Vec<BuiltSession>,
    /// One entry per invalid session, prefixed with its recipe.
    pub warnings: Vec<String>,
}

/// Compose the sessions of a week in the fixed recipe order of the athlete's
/// weekly session count.
///
/// A deload week reuses the selection of the last regular week and reduces
/// its volume afterwards. Sessions are validated as returned.
pub fn build_week_program(
    profile: &AthleteProfile,
    blocks: &[Block],
    recipes: &[Recipe],
    week: CycleWeek,
    last_non_deload: Option<CycleWeek>,
    anchors: &impl AnchorRepository,
    options: &ComposeOptions,
) -> WeekProgram {
    let selection_week = resolve_selection_week(week, last_non_deload);
    let mut warnings = vec![];

    debug!("building program of {week} (selection {selection_week})");

    let sessions = profile
        .weekly_sessions
        .recipes()
        .iter()
        .filter_map(|id| {
            let Some(recipe) = recipes.iter().find(|r| r.id == *id) else {
                let warning = format!("{id}: Recipe is missing.");
                warn!("{warning}");
                warnings.push(warning);
                return None;
            };
            let session = compose_session(profile, blocks, recipe, selection_week, anchors, options);
            let session = if week.is_deload() {
                apply_deload(&session)
            } else {
                session
            };
            let validation = validate_session(&session);
            if !validation.is_valid {
                warnings.push(format!("{id}: {}", validation.warnings.join(" ")));
            }
            Some(session)
        })
        .collect();

    WeekProgram {
        week,
        sessions,
        warnings,
    }
}
