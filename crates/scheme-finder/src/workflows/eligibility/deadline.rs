use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 86_400_000;
const URGENT_WITHIN_DAYS: i64 = 3;
const WARNING_WITHIN_DAYS: i64 = 7;

/// Urgency tier for an application deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryStatus {
    Expired,
    Urgent,
    Warning,
    Safe,
    NoDeadline,
}

impl ExpiryStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Urgent => "urgent",
            Self::Warning => "warning",
            Self::Safe => "safe",
            Self::NoDeadline => "no-deadline",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::Urgent => "Urgent",
            Self::Warning => "Closing soon",
            Self::Safe => "Open",
            Self::NoDeadline => "No deadline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeadlineError {
    #[error("application deadline '{value}' is not an ISO-8601 date or date-time")]
    Unparseable { value: String },
}

/// Day count and tier computed for one scheme deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeadlineStatus {
    pub days_remaining: Option<i64>,
    pub status: ExpiryStatus,
    pub status_label: &'static str,
}

impl DeadlineStatus {
    pub fn assess(deadline: Option<&str>, now: DateTime<Utc>) -> Result<Self, DeadlineError> {
        let days_remaining = days_until(deadline, now)?;
        Ok(Self::from_days(days_remaining))
    }

    pub fn from_days(days_remaining: Option<i64>) -> Self {
        let status = classify(days_remaining);
        Self {
            days_remaining,
            status,
            status_label: status.label(),
        }
    }

    pub fn none() -> Self {
        Self::from_days(None)
    }
}

/// Parse an ISO-8601 deadline.
///
/// RFC 3339 values keep their offset, bare dates are midnight UTC and
/// offset-less date-times are read in the local time zone.
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, DeadlineError> {
    let trimmed = raw.trim();
    let unparseable = || DeadlineError::Unparseable {
        value: raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(unparseable)?;
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc))
                .ok_or_else(unparseable);
        }
    }

    Err(unparseable())
}

/// Signed number of days from `now` until `deadline`, rounded up.
///
/// Returns `Ok(None)` when there is no deadline.
pub fn days_until(
    deadline: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<i64>, DeadlineError> {
    let Some(raw) = deadline.filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };

    let deadline = parse_deadline(raw)?;
    let millis = (deadline - now).num_milliseconds();
    Ok(Some(ceil_days(millis)))
}

/// [`days_until`] against the current wall clock.
pub fn days_until_now(deadline: Option<&str>) -> Result<Option<i64>, DeadlineError> {
    days_until(deadline, Utc::now())
}

pub fn classify(days: Option<i64>) -> ExpiryStatus {
    match days {
        None => ExpiryStatus::NoDeadline,
        Some(days) if days < 0 => ExpiryStatus::Expired,
        Some(days) if days <= URGENT_WITHIN_DAYS => ExpiryStatus::Urgent,
        Some(days) if days <= WARNING_WITHIN_DAYS => ExpiryStatus::Warning,
        Some(_) => ExpiryStatus::Safe,
    }
}

fn ceil_days(millis: i64) -> i64 {
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}
