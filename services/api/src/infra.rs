use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use scheme_finder::workflows::eligibility::{
    parse_deadline, CatalogError, IngestError, Profile, ProfileStore, ProfileStoreError, Scheme,
    SchemeCatalog, SchemeCatalogFile, SchemeId, UserId,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

const SAMPLE_CATALOG: &str = include_str!("../data/sample_schemes.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Scheme catalog kept in insertion order so ranking ties stay stable.
#[derive(Default, Clone)]
pub(crate) struct InMemorySchemeCatalog {
    schemes: Arc<Mutex<Vec<Scheme>>>,
}

impl InMemorySchemeCatalog {
    pub(crate) fn seeded(schemes: Vec<Scheme>) -> Result<Self, CatalogError> {
        let catalog = Self::default();
        catalog.insert_many(schemes)?;
        Ok(catalog)
    }
}

impl SchemeCatalog for InMemorySchemeCatalog {
    fn list(&self) -> Result<Vec<Scheme>, CatalogError> {
        let guard = self.schemes.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }

    fn fetch(&self, id: &SchemeId) -> Result<Option<Scheme>, CatalogError> {
        let guard = self.schemes.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|scheme| &scheme.id == id).cloned())
    }

    fn insert_many(&self, schemes: Vec<Scheme>) -> Result<usize, CatalogError> {
        let mut guard = self.schemes.lock().expect("catalog mutex poisoned");
        for (index, scheme) in schemes.iter().enumerate() {
            let clashes_stored = guard.iter().any(|stored| stored.id == scheme.id);
            let clashes_batch = schemes[..index].iter().any(|other| other.id == scheme.id);
            if clashes_stored || clashes_batch {
                return Err(CatalogError::Conflict(scheme.id.0.clone()));
            }
        }

        let count = schemes.len();
        guard.extend(schemes);
        Ok(count)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    profiles: Arc<Mutex<HashMap<UserId, Profile>>>,
}

impl ProfileStore for InMemoryProfileStore {
    fn fetch(&self, user: &UserId) -> Result<Option<Profile>, ProfileStoreError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(user).cloned())
    }

    fn upsert(&self, user: UserId, profile: Profile) -> Result<(), ProfileStoreError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.insert(user, profile);
        Ok(())
    }
}

/// Bundled catalog used by the demo and when `match` runs without `--catalog`.
pub(crate) fn sample_schemes() -> Result<Vec<Scheme>, IngestError> {
    SchemeCatalogFile::from_reader(SAMPLE_CATALOG.as_bytes())
}

/// Accepts the same formats as scheme deadlines: RFC 3339 or a bare date.
pub(crate) fn parse_now(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_deadline(raw).map_err(|err| format!("failed to parse '{raw}' as a timestamp ({err})"))
}
