use super::domain::{Profile, Scheme, SchemeId, UserId};

/// Read side of the scheme catalog plus the bulk insert used by ingestion.
pub trait SchemeCatalog: Send + Sync {
    fn list(&self) -> Result<Vec<Scheme>, CatalogError>;
    fn fetch(&self, id: &SchemeId) -> Result<Option<Scheme>, CatalogError>;
    fn insert_many(&self, schemes: Vec<Scheme>) -> Result<usize, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("scheme {0} already exists")]
    Conflict(String),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Source of citizen profiles keyed by account.
pub trait ProfileStore: Send + Sync {
    fn fetch(&self, user: &UserId) -> Result<Option<Profile>, ProfileStoreError>;
    fn upsert(&self, user: UserId, profile: Profile) -> Result<(), ProfileStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}
