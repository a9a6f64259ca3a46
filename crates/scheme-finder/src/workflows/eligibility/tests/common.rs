use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::workflows::eligibility::domain::{
    Category, Gender, Occupation, Profile, Scheme, SchemeId, UserId,
};
use crate::workflows::eligibility::repository::{
    CatalogError, ProfileStore, ProfileStoreError, SchemeCatalog,
};
use crate::workflows::eligibility::EligibilityService;

pub(super) fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-10T06:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// 22 year old woman from Kerala, general category, ₹1.5 lakh income, not BPL.
pub(super) fn kerala_student() -> Profile {
    Profile {
        full_name: Some("Anjali Menon".to_string()),
        age: Some(22),
        gender: Some(Gender::Female),
        category: Category::General,
        occupation: Some(Occupation::Student),
        annual_income: Some(150000.0),
        state: Some("Kerala".to_string()),
        is_bpl: false,
        ..Profile::default()
    }
}

/// Women's scheme for 18-35 year olds in Kerala or Tamil Nadu under ₹2 lakh.
pub(super) fn southern_women_scheme(id: &str) -> Scheme {
    let mut scheme =
        Scheme::unrestricted(id, "Southern Women Scholarship", "Ministry of Education");
    scheme.min_age = Some(18);
    scheme.max_age = Some(35);
    scheme.gender = Some(vec![Gender::Female]);
    scheme.max_income = Some(200000.0);
    scheme.states = Some(vec!["Kerala".to_string(), "Tamil Nadu".to_string()]);
    scheme
}

pub(super) fn scheme_with_deadline(id: &str, deadline: &str) -> Scheme {
    let mut scheme = southern_women_scheme(id);
    scheme.application_deadline = Some(deadline.to_string());
    scheme
}

pub(super) fn bpl_scheme(id: &str) -> Scheme {
    let mut scheme = southern_women_scheme(id);
    scheme.bpl_only = true;
    scheme
}

pub(super) fn farmer_scheme(id: &str) -> Scheme {
    let mut scheme = Scheme::unrestricted(id, "Kisan Support", "Ministry of Agriculture");
    scheme.occupations = Some(vec![Occupation::Farmer]);
    scheme.categories = Some(vec![Category::Sc, Category::St]);
    scheme
}

/// Criteria a scheme turns on, counted straight from its fields.
pub(super) fn active_criteria_count(scheme: &Scheme) -> usize {
    fn listed<T>(values: &Option<Vec<T>>) -> bool {
        values.as_ref().is_some_and(|values| !values.is_empty())
    }

    [
        scheme.min_age.is_some() || scheme.max_age.is_some(),
        listed(&scheme.gender),
        listed(&scheme.categories),
        listed(&scheme.occupations),
        listed(&scheme.education_levels),
        listed(&scheme.disabilities),
        scheme.max_income.is_some(),
        listed(&scheme.states),
        scheme.bpl_only,
        scheme.minority_only,
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}

#[derive(Default)]
pub(super) struct MemoryCatalog {
    schemes: Mutex<BTreeMap<SchemeId, Scheme>>,
}

impl MemoryCatalog {
    pub(super) fn with(schemes: Vec<Scheme>) -> Self {
        let catalog = Self::default();
        catalog.insert_many(schemes).expect("seed catalog");
        catalog
    }
}

impl SchemeCatalog for MemoryCatalog {
    fn list(&self) -> Result<Vec<Scheme>, CatalogError> {
        Ok(self
            .schemes
            .lock()
            .expect("catalog mutex poisoned")
            .values()
            .cloned()
            .collect())
    }

    fn fetch(&self, id: &SchemeId) -> Result<Option<Scheme>, CatalogError> {
        Ok(self
            .schemes
            .lock()
            .expect("catalog mutex poisoned")
            .get(id)
            .cloned())
    }

    fn insert_many(&self, schemes: Vec<Scheme>) -> Result<usize, CatalogError> {
        let mut guard = self.schemes.lock().expect("catalog mutex poisoned");
        if let Some(existing) = schemes.iter().find(|scheme| guard.contains_key(&scheme.id)) {
            return Err(CatalogError::Conflict(existing.id.0.clone()));
        }
        let count = schemes.len();
        for scheme in schemes {
            guard.insert(scheme.id.clone(), scheme);
        }
        Ok(count)
    }
}

pub(super) struct UnavailableCatalog;

impl SchemeCatalog for UnavailableCatalog {
    fn list(&self) -> Result<Vec<Scheme>, CatalogError> {
        Err(CatalogError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &SchemeId) -> Result<Option<Scheme>, CatalogError> {
        Err(CatalogError::Unavailable("offline".to_string()))
    }

    fn insert_many(&self, _schemes: Vec<Scheme>) -> Result<usize, CatalogError> {
        Err(CatalogError::Unavailable("offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryProfiles {
    profiles: Mutex<HashMap<UserId, Profile>>,
}

impl ProfileStore for MemoryProfiles {
    fn fetch(&self, user: &UserId) -> Result<Option<Profile>, ProfileStoreError> {
        Ok(self
            .profiles
            .lock()
            .expect("profile mutex poisoned")
            .get(user)
            .cloned())
    }

    fn upsert(&self, user: UserId, profile: Profile) -> Result<(), ProfileStoreError> {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .insert(user, profile);
        Ok(())
    }
}

pub(super) type MemoryService = EligibilityService<MemoryCatalog, MemoryProfiles>;

pub(super) fn build_service(schemes: Vec<Scheme>) -> (Arc<MemoryService>, Arc<MemoryProfiles>) {
    let profiles = Arc::new(MemoryProfiles::default());
    let service = Arc::new(EligibilityService::new(
        Arc::new(MemoryCatalog::with(schemes)),
        profiles.clone(),
    ));
    (service, profiles)
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("body is json");
    (status, value)
}
