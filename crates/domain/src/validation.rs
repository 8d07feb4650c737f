use std::collections::BTreeSet;

use crate::{BuiltSession, Intent, Scheme};

pub const MAX_BLOCKS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionValidation {
    pub is_valid: bool,
    pub warnings: Vec<String>,
}

/// Check the structure of a composed session.
#[must_use]
pub fn validate_session(session: &BuiltSession) -> SessionValidation {
    let mut warnings = vec![];

    let activation_count = session.count_intent(|i| i == Intent::Activation);
    if activation_count != 1 {
        warnings.push(format!(
            "Session must include exactly 1 activation block (found {activation_count})."
        ));
    }

    if session.count_intent(Intent::is_main) == 0 {
        warnings.push(String::from(
            "Session must include at least 1 main block (contrast or force).",
        ));
    }

    let distinct = session
        .blocks
        .iter()
        .map(|b| &b.block.id)
        .collect::<BTreeSet<_>>()
        .len();
    let duplicates = session.blocks.len() - distinct;
    if duplicates > 0 {
        warnings.push(format!(
            "Session has duplicate block entries ({duplicates} duplicate(s))."
        ));
    }

    for b in &session.blocks {
        if let Scheme::Emom { minutes, work } = &b.version.scheme {
            if work.is_none() {
                warnings.push(format!(
                    "Incomplete EMOM: add reps or time ({}).",
                    b.block.id
                ));
            }
            let exercises = b.block.exercises.len();
            if exercises > 1 && (*minutes as usize) < exercises {
                warnings.push(format!(
                    "EMOM too short to alternate all exercises ({}).",
                    b.block.id
                ));
            }
        }
    }

    if session.blocks.len() > MAX_BLOCKS {
        warnings.push(format!(
            "Session exceeds max blocks ({}/{MAX_BLOCKS}).",
            session.blocks.len()
        ));
    }

    let finishers = session.count_intent(Intent::is_finisher);
    let max_finishers = session.recipe.max_finishers();
    if finishers > max_finishers {
        warnings.push(format!(
            "Session exceeds max finishers ({finishers}/{max_finishers}) in neck/core/carry."
        ));
    }

    SessionValidation {
        is_valid: warnings.is_empty(),
        warnings,
    }
}
