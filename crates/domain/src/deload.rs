use crate::{BlockVersion, BuiltBlock, BuiltSession, CycleWeek, Intent, Rer, Scheme};

/// Effort reserve assumed for versions without one.
const DEFAULT_RER: Rer = Rer::THREE;
const MIN_EMOM_MINUTES: u32 = 3;

/// 70 % of a count, rounded half up.
fn reduce(value: u32) -> u32 {
    u32::try_from((u64::from(value) * 7 + 5) / 10).unwrap_or(value)
}

fn deload_sets(sets: u32, intent: Intent) -> u32 {
    let floor = if matches!(intent, Intent::Activation | Intent::Prehab) {
        2
    } else {
        1
    };
    reduce(sets).max(floor).min(sets)
}

fn deload_rer(rer: Option<Rer>, intent: Intent) -> Rer {
    let rer = rer.unwrap_or(DEFAULT_RER);
    if intent.is_main() {
        rer.relax(2, Rer::THREE)
    } else {
        rer.relax(1, Rer::FOUR)
    }
}

#[must_use]
pub fn deload_version(version: &BlockVersion, intent: Intent) -> BlockVersion {
    BlockVersion {
        sets: deload_sets(version.sets, intent),
        rer: Some(deload_rer(version.rer, intent)),
        scheme: match &version.scheme {
            Scheme::Emom { minutes, work } => Scheme::Emom {
                minutes: reduce(*minutes).max(MIN_EMOM_MINUTES),
                work: work.clone(),
            },
            scheme => scheme.clone(),
        },
        ..version.clone()
    }
}

/// Reduce the volume and intensity of a composed session. The block
/// selection is kept as is.
///
/// Sets never increase and effort reserves never decrease. Short EMOMs keep
/// at least three minutes.
#[must_use]
pub fn apply_deload(session: &BuiltSession) -> BuiltSession {
    BuiltSession {
        week: CycleWeek::Deload,
        blocks: session
            .blocks
            .iter()
            .map(|b| BuiltBlock {
                block: b.block.clone(),
                version: deload_version(&b.version, b.block.intent),
            })
            .collect(),
        ..session.clone()
    }
}

#[must_use]
pub fn apply_deload_to_sessions(sessions: &[BuiltSession]) -> Vec<BuiltSession> {
    sessions.iter().map(apply_deload).collect()
}
