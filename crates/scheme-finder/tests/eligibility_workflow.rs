use chrono::{DateTime, Utc};
use scheme_finder::workflows::eligibility::{
    classify, days_until, decode_generated_schemes, evaluate, DeadlineError, EligibilityStatus,
    ExpiryStatus, Gender, IngestError, MatchReport, Profile, SchemeCatalogFile,
};

const CATALOG: &str = r#"[
  {
    "id": "widow-pension",
    "name": "Widow Pension Scheme",
    "ministry": "Ministry of Rural Development",
    "application_deadline": "2026-03-12",
    "min_age": 40,
    "gender": ["female"],
    "max_income": 100000,
    "bpl_only": true
  },
  {
    "id": "skill-india",
    "name": "Skill India Training",
    "ministry": "Ministry of Skill Development",
    "application_deadline": null,
    "min_age": 18,
    "max_age": 45,
    "occupations": ["unemployed", "student"],
    "category": null
  },
  {
    "id": "archived",
    "name": "Archived Scheme",
    "ministry": "Ministry of Finance",
    "is_active": false
  }
]"#;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-10T12:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn applicant() -> Profile {
    serde_json::from_str(
        r#"{
            "full_name": "Meena Kumari",
            "age": 52,
            "gender": "female",
            "category": null,
            "occupation": "unemployed",
            "annual_income": 60000,
            "state": "Bihar",
            "is_bpl": true,
            "is_minority": null
        }"#,
    )
    .expect("profile json is valid")
}

#[test]
fn catalog_file_round_trips_into_ranked_report() {
    let schemes = SchemeCatalogFile::from_reader(CATALOG.as_bytes()).expect("catalog parses");
    assert_eq!(schemes.len(), 3);
    assert!(!schemes[2].is_active);

    let active: Vec<_> = schemes.into_iter().filter(|scheme| scheme.is_active).collect();
    let report = MatchReport::build(&applicant(), &active, now());

    let widow = &report.matches[0];
    assert_eq!(widow.eligibility.scheme.id.0, "widow-pension");
    assert_eq!(widow.status, EligibilityStatus::Eligible);
    assert_eq!(widow.eligibility.confidence_score, 100);
    assert_eq!(widow.deadline.days_remaining, Some(2));
    assert_eq!(widow.deadline.status, ExpiryStatus::Urgent);

    let skills = &report.matches[1];
    assert_eq!(skills.eligibility.confidence_score, 50);
    assert_eq!(
        skills.eligibility.missing_criteria,
        vec!["Age must be between 18 and 45 years"]
    );
    assert_eq!(skills.status, EligibilityStatus::PartiallyEligible);
    assert_eq!(skills.deadline.status, ExpiryStatus::NoDeadline);

    assert_eq!(report.summary.closing_soon.len(), 1);
    assert_eq!(report.summary.closing_soon[0].name, "Widow Pension Scheme");
}

#[test]
fn null_profile_fields_fall_back_to_defaults() {
    let profile = applicant();
    assert_eq!(profile.gender, Some(Gender::Female));
    assert!(!profile.is_minority);
    assert!(!profile.is_incomplete());
}

#[test]
fn generated_listing_feeds_the_evaluator() {
    let content = "```json\n[\n  {\"name\": \"Ujjwala Yojana\", \"ministry\": \"Ministry of Petroleum\", \"gender\": [\"female\"], \"bpl_only\": true}\n]\n```";

    let schemes = decode_generated_schemes(content).expect("listing decodes");
    assert_eq!(schemes.len(), 1);
    let result = evaluate(&applicant(), &schemes[0]);
    assert!(result.is_eligible);
    assert_eq!(
        result.reasons,
        vec![
            "Gender (female) is eligible",
            "BPL status qualifies for this scheme",
        ]
    );
}

#[test]
fn generated_listing_rejects_empty_and_non_array_payloads() {
    assert!(matches!(
        decode_generated_schemes("```json\n[]\n```"),
        Err(IngestError::Empty)
    ));
    assert!(matches!(
        decode_generated_schemes(r#"{"name": "Lone Scheme"}"#),
        Err(IngestError::NotAnArray)
    ));
    assert!(matches!(
        decode_generated_schemes("I could not find any schemes."),
        Err(IngestError::Json(_))
    ));
}

#[test]
fn deadline_tiers_follow_day_counts() {
    let days = days_until(Some("2026-03-17T12:00:00Z"), now()).expect("parses");
    assert_eq!(days, Some(7));
    assert_eq!(classify(days), ExpiryStatus::Warning);

    let days = days_until(Some("2026-03-18T12:00:00Z"), now()).expect("parses");
    assert_eq!(classify(days), ExpiryStatus::Safe);

    assert_eq!(
        days_until(Some("31/03/2026"), now()),
        Err(DeadlineError::Unparseable {
            value: "31/03/2026".to_string()
        })
    );
}
