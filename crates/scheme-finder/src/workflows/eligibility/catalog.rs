use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::deadline::parse_deadline;
use super::domain::Scheme;

const ALL_MINISTRIES: &str = "all";

/// Keyword and ministry filter for browsing the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SchemeQuery {
    #[serde(default, rename = "q")]
    pub text: Option<String>,
    #[serde(default)]
    pub ministry: Option<String>,
}

impl SchemeQuery {
    pub fn matches(&self, scheme: &Scheme) -> bool {
        self.matches_text(scheme) && self.matches_ministry(scheme)
    }

    fn matches_text(&self, scheme: &Scheme) -> bool {
        let Some(needle) = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
        else {
            return true;
        };
        let needle = needle.to_lowercase();

        [
            Some(scheme.name.as_str()),
            scheme.description.as_deref(),
            Some(scheme.ministry.as_str()),
            scheme.benefits.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_ministry(&self, scheme: &Scheme) -> bool {
        match self.ministry.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(ministry) if ministry.eq_ignore_ascii_case(ALL_MINISTRIES) => true,
            Some(ministry) => scheme.ministry == ministry,
        }
    }
}

/// Active schemes matching `query`, soonest deadline first.
///
/// Schemes without a usable deadline sort last and keep their relative order.
pub fn search(schemes: Vec<Scheme>, query: &SchemeQuery) -> Vec<Scheme> {
    let mut found: Vec<Scheme> = schemes
        .into_iter()
        .filter(|scheme| scheme.is_active && query.matches(scheme))
        .collect();

    found.sort_by_key(deadline_sort_key);
    found
}

/// Distinct ministries in first-seen order.
pub fn ministries(schemes: &[Scheme]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for scheme in schemes {
        if !seen.iter().any(|ministry| ministry == &scheme.ministry) {
            seen.push(scheme.ministry.clone());
        }
    }
    seen
}

fn deadline_sort_key(scheme: &Scheme) -> (bool, Option<DateTime<Utc>>) {
    let deadline = scheme
        .application_deadline
        .as_deref()
        .and_then(|raw| parse_deadline(raw).ok());
    (deadline.is_none(), deadline)
}
