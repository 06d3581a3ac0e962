//! Scoring rules for knucklebone (astragalus) throws.
//!
//! Maps the face each body lands on to a value, sums the values, and
//! detects named combinations. Pure data and arithmetic: the physics that
//! decides which face lands up lives in `kb-simulation`.

pub mod combination;
pub mod error;
pub mod faces;
pub mod outcome;
pub mod rules;
pub mod validate;

pub use combination::{Combination, CombinationTable, ValueCounts};
pub use error::{MechError, MechResult};
pub use faces::{FaceValues, NO_FACE_VALUE};
pub use outcome::Outcome;
pub use rules::RuleSet;
pub use validate::{ValidationIssue, validate_rules};
