use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::deadline::DeadlineStatus;
use super::domain::{Profile, Scheme, SchemeId};
use super::evaluation::{evaluate, EligibilityResult, EligibilityStatus};

const CLOSING_SOON_DAYS: i64 = 7;

/// Eligibility and deadline view of one scheme for one profile.
#[derive(Debug, Clone, Serialize)]
pub struct SchemeMatch {
    #[serde(flatten)]
    pub eligibility: EligibilityResult,
    pub status: EligibilityStatus,
    pub status_label: &'static str,
    pub deadline: DeadlineStatus,
}

impl SchemeMatch {
    pub fn assess(profile: &Profile, scheme: &Scheme, now: DateTime<Utc>) -> Self {
        let eligibility = evaluate(profile, scheme);
        let status = eligibility.status();

        Self {
            eligibility,
            status,
            status_label: status.label(),
            deadline: deadline_status(scheme, now),
        }
    }

    /// Eligible and due within the next week.
    pub fn is_closing_soon(&self) -> bool {
        self.eligibility.is_eligible
            && self
                .deadline
                .days_remaining
                .is_some_and(|days| (0..=CLOSING_SOON_DAYS).contains(&days))
    }
}

/// Deadline status for a scheme, degrading unparseable deadlines to "no deadline".
pub fn deadline_status(scheme: &Scheme, now: DateTime<Utc>) -> DeadlineStatus {
    match DeadlineStatus::assess(scheme.application_deadline.as_deref(), now) {
        Ok(status) => status,
        Err(err) => {
            warn!(
                scheme_id = %scheme.id.0,
                error = %err,
                "ignoring unparseable application deadline"
            );
            DeadlineStatus::none()
        }
    }
}

/// Evaluate every scheme and order the results by confidence, best first.
///
/// Ties keep catalog order.
pub fn rank_matches(
    profile: &Profile,
    schemes: &[Scheme],
    now: DateTime<Utc>,
) -> Vec<SchemeMatch> {
    let mut matches: Vec<SchemeMatch> = schemes
        .iter()
        .map(|scheme| SchemeMatch::assess(profile, scheme, now))
        .collect();

    matches.sort_by(|a, b| {
        b.eligibility
            .confidence_score
            .cmp(&a.eligibility.confidence_score)
    });

    debug!(evaluated = matches.len(), "ranked scheme matches");
    matches
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosingSoonEntry {
    pub scheme_id: SchemeId,
    pub name: String,
    pub days_remaining: i64,
}

/// Dashboard counters over a ranked match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub evaluated: usize,
    pub eligible: Vec<SchemeId>,
    pub partially_eligible: Vec<SchemeId>,
    pub closing_soon: Vec<ClosingSoonEntry>,
    pub profile_incomplete: bool,
}

impl MatchSummary {
    pub fn from_matches(profile: &Profile, matches: &[SchemeMatch]) -> Self {
        let ids_with = |status: EligibilityStatus| {
            matches
                .iter()
                .filter(|entry| entry.status == status)
                .map(|entry| entry.eligibility.scheme.id.clone())
                .collect::<Vec<_>>()
        };

        let closing_soon = matches
            .iter()
            .filter(|entry| entry.is_closing_soon())
            .filter_map(|entry| {
                entry.deadline.days_remaining.map(|days| ClosingSoonEntry {
                    scheme_id: entry.eligibility.scheme.id.clone(),
                    name: entry.eligibility.scheme.name.clone(),
                    days_remaining: days,
                })
            })
            .collect();

        Self {
            evaluated: matches.len(),
            eligible: ids_with(EligibilityStatus::Eligible),
            partially_eligible: ids_with(EligibilityStatus::PartiallyEligible),
            closing_soon,
            profile_incomplete: profile.is_incomplete(),
        }
    }
}

/// Ranked matches plus their summary, as served to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub matches: Vec<SchemeMatch>,
    pub summary: MatchSummary,
}

impl MatchReport {
    pub fn build(profile: &Profile, schemes: &[Scheme], now: DateTime<Utc>) -> Self {
        let matches = rank_matches(profile, schemes, now);
        let summary = MatchSummary::from_matches(profile, &matches);
        Self { matches, summary }
    }
}
