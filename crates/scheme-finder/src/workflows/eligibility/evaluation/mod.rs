mod policy;
mod rules;

pub use policy::EligibilityStatus;

use super::domain::{Profile, Scheme};
use serde::{Deserialize, Serialize};

/// Compare a profile against every active constraint of a scheme.
///
/// Total and deterministic: missing profile attributes count as unsatisfied
/// criteria rather than errors.
pub fn evaluate(profile: &Profile, scheme: &Scheme) -> EligibilityResult {
    let criteria = rules::check_criteria(profile, scheme);

    let mut reasons = Vec::new();
    let mut missing_criteria = Vec::new();
    for outcome in &criteria {
        if outcome.satisfied {
            reasons.push(outcome.note.clone());
        } else {
            missing_criteria.push(outcome.note.clone());
        }
    }

    let confidence_score = policy::confidence_score(criteria.len(), reasons.len());
    let is_eligible = policy::is_eligible(&missing_criteria, confidence_score);

    EligibilityResult {
        scheme: scheme.clone(),
        is_eligible,
        confidence_score,
        reasons,
        missing_criteria,
        criteria,
    }
}

/// The ten constraint families a scheme can declare, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    Age,
    Gender,
    Category,
    Occupation,
    Education,
    Disability,
    Income,
    State,
    Bpl,
    Minority,
}

impl CriterionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Category => "Category",
            Self::Occupation => "Occupation",
            Self::Education => "Education",
            Self::Disability => "Disability",
            Self::Income => "Annual income",
            Self::State => "State of residence",
            Self::Bpl => "BPL status",
            Self::Minority => "Minority status",
        }
    }
}

/// Outcome of one active criterion, kept for audit alongside the summary lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionOutcome {
    pub criterion: CriterionKind,
    pub satisfied: bool,
    pub note: String,
}

/// Match result for a (profile, scheme) pair. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub scheme: Scheme,
    pub is_eligible: bool,
    pub confidence_score: u8,
    pub reasons: Vec<String>,
    pub missing_criteria: Vec<String>,
    pub criteria: Vec<CriterionOutcome>,
}

impl EligibilityResult {
    pub fn active_criteria(&self) -> usize {
        self.criteria.len()
    }

    pub fn matched_criteria(&self) -> usize {
        self.criteria
            .iter()
            .filter(|outcome| outcome.satisfied)
            .count()
    }

    pub fn status(&self) -> EligibilityStatus {
        EligibilityStatus::grade(self.is_eligible, self.confidence_score)
    }

    pub fn summary(&self) -> String {
        if self.missing_criteria.is_empty() {
            format!("{} ({}% match)", self.status().label(), self.confidence_score)
        } else {
            format!(
                "{} ({}% match): {}",
                self.status().label(),
                self.confidence_score,
                self.missing_criteria.join("; ")
            )
        }
    }
}
