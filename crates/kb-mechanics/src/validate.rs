//! Consistency checks between scoring rules and the face anchors that
//! will resolve them.
//!
//! The simulation itself tolerates incomplete configuration (a body with
//! no usable anchor is force-resolved to [`crate::faces::NO_FACE_VALUE`]).
//! These checks let a caller catch such problems before the first throw.

use crate::faces::normalize;
use crate::rules::RuleSet;

/// Number of faces a knucklebone has.
pub const EXPECTED_FACES: usize = 4;

/// A warning or error found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// What the issue is about (a face, an anchor, or a combination).
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Validate a rule set against the anchor names provided by the model and
/// the number of bodies thrown per round.
pub fn validate_rules(
    rules: &RuleSet,
    anchor_names: &[&str],
    dice_count: usize,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let anchors: Vec<String> = anchor_names.iter().map(|n| normalize(n)).collect();

    if rules.faces.len() < EXPECTED_FACES {
        issues.push(ValidationIssue::warning(
            "faces",
            format!(
                "only {} of {EXPECTED_FACES} faces have a value",
                rules.faces.len()
            ),
        ));
    }

    for name in rules.faces.names() {
        if !anchors.iter().any(|a| a == name) {
            issues.push(ValidationIssue::error(
                format!("face '{name}'"),
                "no anchor direction for this face; it can never be rolled",
            ));
        }
    }

    for anchor in &anchors {
        if rules.faces.value_of(anchor).is_none() {
            issues.push(ValidationIssue::warning(
                format!("anchor '{anchor}'"),
                "anchor has no value and will be ignored",
            ));
        }
    }

    for combo in rules.combinations.iter() {
        let subject = format!("combination '{}'", combo.name);
        if combo.requires.is_empty() {
            issues.push(ValidationIssue::error(&subject, "requires no values"));
            continue;
        }
        for value in &combo.requires {
            if !rules.faces.produces(*value) {
                issues.push(ValidationIssue::error(
                    &subject,
                    format!("requires value {value}, which no face produces"),
                ));
            }
        }
        if combo.requires.len() > dice_count {
            issues.push(ValidationIssue::warning(
                &subject,
                format!(
                    "requires {} values but only {dice_count} bodies are thrown",
                    combo.requires.len()
                ),
            ));
        }
    }

    issues
}

/// Returns true if any issue is an error.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.is_error)
}
