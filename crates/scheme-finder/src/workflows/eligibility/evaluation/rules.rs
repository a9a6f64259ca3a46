use super::super::domain::{Profile, Scheme};
use super::{CriterionKind, CriterionOutcome};

const DEFAULT_MIN_AGE: u32 = 0;
const DEFAULT_MAX_AGE: u32 = 150;

/// Run the ten criterion checks in their fixed order, skipping inactive ones.
pub(crate) fn check_criteria(profile: &Profile, scheme: &Scheme) -> Vec<CriterionOutcome> {
    [
        check_age(profile, scheme),
        check_gender(profile, scheme),
        check_category(profile, scheme),
        check_occupation(profile, scheme),
        check_education(profile, scheme),
        check_disability(profile, scheme),
        check_income(profile, scheme),
        check_state(profile, scheme),
        check_bpl(profile, scheme),
        check_minority(profile, scheme),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn check_age(profile: &Profile, scheme: &Scheme) -> Option<CriterionOutcome> {
    if scheme.min_age.is_none() && scheme.max_age.is_none() {
        return None;
    }

    let min_age = scheme.min_age.unwrap_or(DEFAULT_MIN_AGE);
    let max_age = scheme.max_age.unwrap_or(DEFAULT_MAX_AGE);

    Some(match profile.age {
        Some(age) if (min_age..=max_age).contains(&age) => satisfied(
            CriterionKind::Age,
            format!("Age {age} is within eligible range ({min_age}-{max_age} years)"),
        ),
        Some(_) => missing(
            CriterionKind::Age,
            format!("Age must be between {min_age} and {max_age} years"),
        ),
        None => missing(CriterionKind::Age, "Age information required"),
    })
}

fn check_gender(profile: &Profile, scheme: &Scheme) -> Option<CriterionOutcome> {
    let allowed = active_set(&scheme.gender)?;

    Some(match profile.gender {
        Some(gender) if allowed.contains(&gender) => satisfied(
            CriterionKind::Gender,
            format!("Gender ({}) is eligible", gender.as_str()),
        ),
        Some(_) => missing(
            CriterionKind::Gender,
            format!(
                "This scheme is for {} only",
                join(allowed, |gender| gender.as_str(), "/")
            ),
        ),
        None => missing(CriterionKind::Gender, "Gender information required"),
    })
}

fn check_category(profile: &Profile, scheme: &Scheme) -> Option<CriterionOutcome> {
    let allowed = active_set(&scheme.categories)?;
    let category = profile.category;

    Some(if allowed.contains(&category) {
        satisfied(
            CriterionKind::Category,
            format!("Category ({}) is eligible", category.label()),
        )
    } else {
        missing(
            CriterionKind::Category,
            format!(
                "This scheme is for {} categories",
                join(allowed, |category| category.label(), "/")
            ),
        )
    })
}

fn check_occupation(profile: &Profile, scheme: &Scheme) -> Option<CriterionOutcome> {
    let allowed = active_set(&scheme.occupations)?;

    Some(match profile.occupation {
        Some(occupation) if allowed.contains(&occupation) => satisfied(
            CriterionKind::Occupation,
            format!("Occupation ({}) is eligible", occupation.label()),
        ),
        Some(_) => missing(
            CriterionKind::Occupation,
            format!(
                "This scheme requires occupation: {}",
                join(allowed, |occupation| occupation.as_str(), ", ")
            ),
        ),
        None => missing(CriterionKind::Occupation, "Occupation information required"),
    })
}

fn check_education(profile: &Profile, scheme: &Scheme) -> Option<CriterionOutcome> {
    let allowed = active_set(&scheme.education_levels)?;

    Some(match profile.education {
        Some(education) if allowed.contains(&education) => satisfied(
            CriterionKind::Education,
            format!("Education level ({}) is eligible", education.label()),
        ),
        Some(_) => missing(
            CriterionKind::Education,
            format!(
                "This scheme requires education: {}",
                join(allowed, |education| education.as_str(), ", ")
            ),
        ),
        None => missing(CriterionKind::Education, "Education information required"),
    })
}

fn check_disability(profile: &Profile, scheme: &Scheme) -> Option<CriterionOutcome> {
    let allowed = active_set(&scheme.disabilities)?;
    let disability = profile.disability;

    // A profile without a declared disability never satisfies a disability
    // requirement, even when the scheme lists `none`.
    Some(if !disability.is_declared() {
        missing(
            CriterionKind::Disability,
            "This scheme requires disability status",
        )
    } else if allowed.contains(&disability) {
        satisfied(
            CriterionKind::Disability,
            "Disability status qualifies for this scheme",
        )
    } else {
        missing(
            CriterionKind::Disability,
            format!(
                "This scheme is for {} disabilities",
                join(allowed, |disability| disability.as_str(), "/")
            ),
        )
    })
}

fn check_income(profile: &Profile, scheme: &Scheme) -> Option<CriterionOutcome> {
    let max_income = scheme.max_income?;

    Some(match profile.annual_income {
        Some(income) if income <= max_income => satisfied(
            CriterionKind::Income,
            format!(
                "Annual income ₹{} is within limit (₹{})",
                format_rupees(income),
                format_rupees(max_income)
            ),
        ),
        Some(_) => missing(
            CriterionKind::Income,
            format!("Annual income must be below ₹{}", format_rupees(max_income)),
        ),
        None => missing(CriterionKind::Income, "Income information required"),
    })
}

fn check_state(profile: &Profile, scheme: &Scheme) -> Option<CriterionOutcome> {
    let allowed = active_set(&scheme.states)?;

    let state = profile
        .state
        .as_deref()
        .filter(|state| !state.is_empty());

    Some(match state {
        Some(state) if allowed.iter().any(|candidate| candidate == state) => satisfied(
            CriterionKind::State,
            format!("Resident of {state} is eligible"),
        ),
        Some(_) => missing(
            CriterionKind::State,
            format!("This scheme is for {} residents only", allowed.join(", ")),
        ),
        None => missing(CriterionKind::State, "State information required"),
    })
}

fn check_bpl(profile: &Profile, scheme: &Scheme) -> Option<CriterionOutcome> {
    if !scheme.bpl_only {
        return None;
    }

    Some(if profile.is_bpl {
        satisfied(CriterionKind::Bpl, "BPL status qualifies for this scheme")
    } else {
        missing(CriterionKind::Bpl, "This scheme is for BPL families only")
    })
}

fn check_minority(profile: &Profile, scheme: &Scheme) -> Option<CriterionOutcome> {
    if !scheme.minority_only {
        return None;
    }

    Some(if profile.is_minority {
        satisfied(
            CriterionKind::Minority,
            "Minority status qualifies for this scheme",
        )
    } else {
        missing(
            CriterionKind::Minority,
            "This scheme is for minority communities only",
        )
    })
}

fn satisfied(criterion: CriterionKind, note: impl Into<String>) -> CriterionOutcome {
    CriterionOutcome {
        criterion,
        satisfied: true,
        note: note.into(),
    }
}

fn missing(criterion: CriterionKind, note: impl Into<String>) -> CriterionOutcome {
    CriterionOutcome {
        criterion,
        satisfied: false,
        note: note.into(),
    }
}

fn active_set<T>(values: &Option<Vec<T>>) -> Option<&[T]> {
    values.as_deref().filter(|values| !values.is_empty())
}

fn join<T>(values: &[T], label: impl Fn(&T) -> &'static str, separator: &str) -> String {
    values.iter().map(label).collect::<Vec<_>>().join(separator)
}

/// Rupee amount with Indian digit grouping (`1,50,000`), at most two decimals.
fn format_rupees(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let paise = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let grouped = group_indian(whole);
    match paise {
        0 => format!("{sign}{grouped}"),
        p if p % 10 == 0 => format!("{sign}{grouped}.{}", p / 10),
        p => format!("{sign}{grouped}.{p:02}"),
    }
}

fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (mut rest, thousands) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while rest.len() > 2 {
        let (head, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = head;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), thousands)
}
