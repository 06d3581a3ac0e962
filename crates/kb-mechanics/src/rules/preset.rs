//! Built-in rule sets.

use crate::combination::CombinationTable;
use crate::faces::FaceValues;
use crate::rules::RuleSet;

/// Names of the four classic faces, in anchor order.
pub const CLASSIC_FACES: [&str; 4] = ["ventre", "dos", "bassin", "membres"];

/// The classic astragalus scoring.
///
/// The broad concave side (`ventre`) scores 3, the broad convex side
/// (`dos`) 4, the narrow flat side (`bassin`) 1 and the narrow twisted
/// side (`membres`) 6. The named throws follow the Roman game:
/// *venus* shows all four faces, *canis* four ones, *senio* three sixes.
pub fn classic() -> RuleSet {
    let faces = FaceValues::new()
        .with("ventre", 3)
        .with("dos", 4)
        .with("bassin", 1)
        .with("membres", 6);
    let combinations = CombinationTable::new()
        .with("venus", &[1, 3, 4, 6])
        .with("canis", &[1, 1, 1, 1])
        .with("senio", &[6, 6, 6])
        .with("trias", &[3, 3, 3])
        .with("tetras", &[4, 4, 4]);
    RuleSet::new(faces, combinations)
}
