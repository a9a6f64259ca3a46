use serde::{Deserialize, Serialize};

const FULL_MATCH: u8 = 100;
const PARTIAL_MATCH_FLOOR: u8 = 50;

/// Presentation grade for an evaluated scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    PartiallyEligible,
    NotEligible,
}

impl EligibilityStatus {
    pub(crate) fn grade(is_eligible: bool, confidence_score: u8) -> Self {
        if is_eligible {
            Self::Eligible
        } else if confidence_score >= PARTIAL_MATCH_FLOOR {
            Self::PartiallyEligible
        } else {
            Self::NotEligible
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Eligible => "Eligible",
            Self::PartiallyEligible => "Partially Eligible",
            Self::NotEligible => "Not Eligible",
        }
    }
}

/// Percentage of active criteria satisfied.
///
/// A scheme without active criteria is a full match for everyone.
pub(crate) fn confidence_score(active: usize, matched: usize) -> u8 {
    if active == 0 {
        return FULL_MATCH;
    }

    ((matched as f64 / active as f64) * 100.0).round() as u8
}

pub(crate) fn is_eligible(missing_criteria: &[String], confidence_score: u8) -> bool {
    missing_criteria.is_empty() && confidence_score >= PARTIAL_MATCH_FLOOR
}
