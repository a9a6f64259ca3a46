use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use super::domain::{Scheme, SchemeId};

static SCHEME_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_scheme_id() -> SchemeId {
    let id = SCHEME_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SchemeId(format!("scheme-{id:06}"))
}

#[derive(Debug)]
pub enum IngestError {
    Io(std::io::Error),
    Json(serde_json::Error),
    NotAnArray,
    Empty,
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Io(err) => write!(f, "failed to read scheme data: {}", err),
            IngestError::Json(err) => write!(f, "failed to parse scheme data: {}", err),
            IngestError::NotAnArray => write!(f, "scheme data must be a JSON array"),
            IngestError::Empty => write!(f, "scheme data contained no schemes"),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::Io(err) => Some(err),
            IngestError::Json(err) => Some(err),
            IngestError::NotAnArray | IngestError::Empty => None,
        }
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads catalog snapshots: complete scheme records with their own ids.
pub struct SchemeCatalogFile;

impl SchemeCatalogFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Scheme>, IngestError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Scheme>, IngestError> {
        let schemes: Vec<Scheme> = serde_json::from_reader(reader)?;
        Ok(schemes)
    }
}

/// Decode a generated scheme listing into catalog records.
///
/// The payload is a JSON array, optionally wrapped in markdown code fences.
/// Records pass through as-is apart from a fresh id and `is_active = true`.
pub fn decode_generated_schemes(content: &str) -> Result<Vec<Scheme>, IngestError> {
    let stripped = strip_code_fences(content);
    let payload: Value = serde_json::from_str(&stripped)?;

    let Value::Array(entries) = payload else {
        return Err(IngestError::NotAnArray);
    };
    if entries.is_empty() {
        return Err(IngestError::Empty);
    }

    entries
        .into_iter()
        .map(|mut entry| {
            if let Value::Object(fields) = &mut entry {
                fields.insert("id".to_string(), Value::String(next_scheme_id().0));
                fields.insert("is_active".to_string(), Value::Bool(true));
            }
            serde_json::from_value::<Scheme>(entry).map_err(IngestError::from)
        })
        .collect()
}

fn strip_code_fences(content: &str) -> String {
    content
        .replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::eligibility::domain::Gender;

    const GENERATED: &str = r#"```json
[
  {
    "name": "Post Matric Scholarship",
    "description": "Scholarship for SC students in post-matric courses.",
    "ministry": "Ministry of Social Justice",
    "benefits": "Tuition fee reimbursement",
    "documents_required": ["Aadhaar Card", "Caste Certificate"],
    "application_url": "https://scholarships.gov.in",
    "application_deadline": "2026-10-31",
    "min_age": null,
    "max_age": null,
    "gender": ["male", "female", "other"],
    "categories": ["sc"],
    "occupations": ["student"],
    "education_levels": null,
    "disabilities": null,
    "max_income": 250000,
    "states": null,
    "bpl_only": null,
    "minority_only": false
  }
]
```"#;

    #[test]
    fn decodes_fenced_payload_and_assigns_ids() {
        let schemes = decode_generated_schemes(GENERATED).expect("payload decodes");

        assert_eq!(schemes.len(), 1);
        let scheme = &schemes[0];
        assert!(scheme.id.0.starts_with("scheme-"));
        assert!(scheme.is_active);
        assert!(!scheme.bpl_only);
        assert_eq!(scheme.max_income, Some(250000.0));
        assert_eq!(
            scheme.gender.as_deref(),
            Some(&[Gender::Male, Gender::Female, Gender::Other][..])
        );
    }

    #[test]
    fn rejects_empty_and_non_array_payloads() {
        assert!(matches!(
            decode_generated_schemes("```json\n[]\n```"),
            Err(IngestError::Empty)
        ));
        assert!(matches!(
            decode_generated_schemes("{\"name\": \"x\"}"),
            Err(IngestError::NotAnArray)
        ));
        assert!(matches!(
            decode_generated_schemes("Sure! Here are some schemes"),
            Err(IngestError::Json(_))
        ));
    }

    #[test]
    fn catalog_snapshots_keep_their_ids() {
        let snapshot = r#"[{"id": "pm-kisan", "name": "PM Kisan", "ministry": "Agriculture"}]"#;
        let schemes = SchemeCatalogFile::from_reader(snapshot.as_bytes()).expect("parses");

        assert_eq!(schemes[0].id, SchemeId("pm-kisan".to_string()));
        assert!(schemes[0].is_active);
    }
}
