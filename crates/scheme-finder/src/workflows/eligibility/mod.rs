//! Scheme eligibility matching, deadline tracking, and the catalog plumbing around them.
//!
//! [`evaluate`] and [`classify`] are the pure core; everything else adapts them to
//! the profile store, the scheme catalog, and the HTTP surface.

pub mod catalog;
pub mod deadline;
pub mod domain;
pub(crate) mod evaluation;
pub mod ingest;
pub mod matching;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use deadline::{
    classify, days_until, days_until_now, parse_deadline, DeadlineError, DeadlineStatus,
    ExpiryStatus,
};
pub use domain::{
    Category, Disability, Education, Gender, Occupation, Profile, Scheme, SchemeId, UserId,
};
pub use evaluation::{
    evaluate, CriterionKind, CriterionOutcome, EligibilityResult, EligibilityStatus,
};
pub use ingest::{decode_generated_schemes, IngestError, SchemeCatalogFile};
pub use matching::{rank_matches, ClosingSoonEntry, MatchReport, MatchSummary, SchemeMatch};
pub use repository::{CatalogError, ProfileStore, ProfileStoreError, SchemeCatalog};
pub use router::eligibility_router;
pub use service::{EligibilityService, EligibilityServiceError, SchemeDetail, SchemeListing};
