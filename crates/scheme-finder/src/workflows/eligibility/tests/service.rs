use std::sync::Arc;

use super::common::*;
use crate::workflows::eligibility::catalog::SchemeQuery;
use crate::workflows::eligibility::domain::{Profile, Scheme, SchemeId, UserId};
use crate::workflows::eligibility::repository::CatalogError;
use crate::workflows::eligibility::{
    EligibilityService, EligibilityServiceError, ExpiryStatus,
};

#[test]
fn match_profile_skips_inactive_schemes() {
    let mut retired = southern_women_scheme("retired");
    retired.is_active = false;
    let (service, _) = build_service(vec![southern_women_scheme("south"), retired]);

    let report = service
        .match_profile(&kerala_student(), now())
        .expect("catalog available");
    assert_eq!(report.summary.evaluated, 1);
    assert_eq!(report.summary.eligible, vec![SchemeId("south".to_string())]);
}

#[test]
fn match_user_requires_a_stored_profile() {
    let (service, _) = build_service(vec![southern_women_scheme("south")]);

    let err = service
        .match_user(&UserId("u-404".to_string()), now())
        .expect_err("no profile stored");
    assert!(matches!(err, EligibilityServiceError::ProfileNotFound(ref id) if id == "u-404"));
}

#[test]
fn saved_profiles_drive_user_matches() {
    let (service, _) = build_service(vec![southern_women_scheme("south"), bpl_scheme("bpl")]);
    let user = UserId("u-1".to_string());

    service
        .save_profile(user.clone(), kerala_student())
        .expect("profile stored");
    let report = service.match_user(&user, now()).expect("profile found");
    assert_eq!(report.matches.len(), 2);
    assert_eq!(report.summary.partially_eligible, vec![SchemeId("bpl".to_string())]);

    let mut updated = kerala_student();
    updated.is_bpl = true;
    service.save_profile(user.clone(), updated).expect("profile replaced");
    let report = service.match_user(&user, now()).expect("profile found");
    assert_eq!(report.summary.eligible.len(), 2);
}

#[test]
fn search_lists_ministries_of_active_schemes_only() {
    let mut retired =
        Scheme::unrestricted("retired", "Old Age Relief", "Ministry of Retired Programmes");
    retired.is_active = false;
    let (service, _) = build_service(vec![
        southern_women_scheme("south"),
        farmer_scheme("farm"),
        retired,
    ]);
    let active_ministries = vec![
        "Ministry of Agriculture".to_string(),
        "Ministry of Education".to_string(),
    ];

    let listing = service
        .search(&SchemeQuery {
            text: Some("kisan".to_string()),
            ministry: None,
        })
        .expect("catalog available");
    assert_eq!(listing.total, 1);
    assert_eq!(listing.schemes[0].id, SchemeId("farm".to_string()));
    assert_eq!(listing.ministries, active_ministries);

    let listing = service
        .search(&SchemeQuery::default())
        .expect("catalog available");
    assert_eq!(listing.total, 2);
    assert_eq!(listing.ministries, active_ministries);
}

#[test]
fn scheme_detail_includes_deadline_status() {
    let (service, _) = build_service(vec![scheme_with_deadline("due", "2026-03-16")]);

    let detail = service
        .scheme(&SchemeId("due".to_string()), now())
        .expect("scheme exists");
    assert_eq!(detail.deadline.days_remaining, Some(6));
    assert_eq!(detail.deadline.status, ExpiryStatus::Warning);

    let err = service
        .scheme(&SchemeId("missing".to_string()), now())
        .expect_err("unknown scheme");
    assert!(matches!(err, EligibilityServiceError::SchemeNotFound(_)));
}

#[test]
fn import_generated_stores_decoded_schemes() {
    let (service, _) = build_service(Vec::new());
    let content = r#"```json
[{"name": "Mahila Udyam", "ministry": "Ministry of MSME", "gender": ["female"], "max_income": 300000}]
```"#;

    let imported = service.import_generated(content).expect("listing decodes");
    assert_eq!(imported.len(), 1);
    assert!(imported[0].is_active);
    assert!(imported[0].id.0.starts_with("scheme-"));

    let stored = service
        .scheme(&imported[0].id, now())
        .expect("imported scheme stored");
    assert_eq!(stored.scheme.name, "Mahila Udyam");

    let report = service
        .match_profile(&kerala_student(), now())
        .expect("catalog available");
    assert_eq!(report.summary.eligible, vec![imported[0].id.clone()]);
}

#[test]
fn import_generated_rejects_malformed_listings() {
    let (service, _) = build_service(Vec::new());

    let err = service
        .import_generated("Sorry, I could not find any schemes.")
        .expect_err("not json");
    assert!(matches!(err, EligibilityServiceError::Ingest(_)));
}

#[test]
fn catalog_failures_propagate() {
    let service = EligibilityService::new(
        Arc::new(UnavailableCatalog),
        Arc::new(MemoryProfiles::default()),
    );

    let err = service
        .match_profile(&Profile::default(), now())
        .expect_err("catalog offline");
    assert!(matches!(
        err,
        EligibilityServiceError::Catalog(CatalogError::Unavailable(_))
    ));
}
