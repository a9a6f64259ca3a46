use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::catalog::{self, SchemeQuery};
use super::deadline::DeadlineStatus;
use super::domain::{Profile, Scheme, SchemeId, UserId};
use super::ingest::{decode_generated_schemes, IngestError};
use super::matching::{deadline_status, MatchReport};
use super::repository::{CatalogError, ProfileStore, ProfileStoreError, SchemeCatalog};

/// Service composing the scheme catalog, the profile store and the matching engine.
pub struct EligibilityService<C, P> {
    catalog: Arc<C>,
    profiles: Arc<P>,
}

/// Catalog search response with the ministry list used for filtering.
#[derive(Debug, Clone, Serialize)]
pub struct SchemeListing {
    pub total: usize,
    pub ministries: Vec<String>,
    pub schemes: Vec<Scheme>,
}

/// A single scheme with its current deadline status.
#[derive(Debug, Clone, Serialize)]
pub struct SchemeDetail {
    pub scheme: Scheme,
    pub deadline: DeadlineStatus,
}

impl<C, P> EligibilityService<C, P>
where
    C: SchemeCatalog + 'static,
    P: ProfileStore + 'static,
{
    pub fn new(catalog: Arc<C>, profiles: Arc<P>) -> Self {
        Self { catalog, profiles }
    }

    /// Rank every active scheme for an ad-hoc profile.
    pub fn match_profile(
        &self,
        profile: &Profile,
        now: DateTime<Utc>,
    ) -> Result<MatchReport, EligibilityServiceError> {
        let schemes = self.active_schemes()?;
        let report = MatchReport::build(profile, &schemes, now);

        info!(
            evaluated = report.summary.evaluated,
            eligible = report.summary.eligible.len(),
            closing_soon = report.summary.closing_soon.len(),
            "matched profile against catalog"
        );
        Ok(report)
    }

    /// Rank every active scheme for a stored profile.
    pub fn match_user(
        &self,
        user: &UserId,
        now: DateTime<Utc>,
    ) -> Result<MatchReport, EligibilityServiceError> {
        let profile = self
            .profiles
            .fetch(user)?
            .ok_or_else(|| EligibilityServiceError::ProfileNotFound(user.0.clone()))?;
        self.match_profile(&profile, now)
    }

    pub fn save_profile(
        &self,
        user: UserId,
        profile: Profile,
    ) -> Result<(), EligibilityServiceError> {
        self.profiles.upsert(user, profile)?;
        Ok(())
    }

    pub fn search(&self, query: &SchemeQuery) -> Result<SchemeListing, EligibilityServiceError> {
        let active = self.active_schemes()?;
        let ministries = catalog::ministries(&active);
        let schemes = catalog::search(active, query);

        Ok(SchemeListing {
            total: schemes.len(),
            ministries,
            schemes,
        })
    }

    pub fn scheme(
        &self,
        id: &SchemeId,
        now: DateTime<Utc>,
    ) -> Result<SchemeDetail, EligibilityServiceError> {
        let scheme = self
            .catalog
            .fetch(id)?
            .ok_or_else(|| EligibilityServiceError::SchemeNotFound(id.0.clone()))?;
        let deadline = deadline_status(&scheme, now);
        Ok(SchemeDetail { scheme, deadline })
    }

    /// Store schemes decoded from a generated listing, returning what was stored.
    pub fn import_generated(
        &self,
        content: &str,
    ) -> Result<Vec<Scheme>, EligibilityServiceError> {
        let schemes = decode_generated_schemes(content)?;
        let stored = self.catalog.insert_many(schemes.clone())?;
        info!(stored, "imported generated schemes");
        Ok(schemes)
    }

    fn active_schemes(&self) -> Result<Vec<Scheme>, CatalogError> {
        Ok(self
            .catalog
            .list()?
            .into_iter()
            .filter(|scheme| scheme.is_active)
            .collect())
    }
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Profiles(#[from] ProfileStoreError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("no profile stored for user {0}")]
    ProfileNotFound(String),
    #[error("scheme {0} not found")]
    SchemeNotFound(String),
}
