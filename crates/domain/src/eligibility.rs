use crate::{AthleteProfile, Block};

/// Whether the athlete owns the block's equipment and has none of its
/// contraindications.
#[must_use]
pub fn is_eligible(profile: &AthleteProfile, block: &Block) -> bool {
    block
        .required_equipment()
        .all(|e| profile.equipment.contains(e))
        && block.contraindications.is_disjoint(&profile.injuries)
}

#[must_use]
pub fn eligible_blocks<'a>(profile: &AthleteProfile, blocks: &'a [Block]) -> Vec<&'a Block> {
    blocks.iter().filter(|b| is_eligible(profile, b)).collect()
}
