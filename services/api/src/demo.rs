use crate::infra::{parse_now, sample_schemes, InMemoryProfileStore, InMemorySchemeCatalog};
use chrono::{DateTime, Utc};
use clap::Args;
use scheme_finder::error::AppError;
use scheme_finder::workflows::eligibility::catalog::SchemeQuery;
use scheme_finder::workflows::eligibility::{
    Category, DeadlineStatus, EligibilityService, EligibilityServiceError, Gender, MatchReport,
    Occupation, Profile, Scheme, SchemeCatalogFile, UserId,
};
use std::path::PathBuf;
use std::sync::Arc;

type LocalService = EligibilityService<InMemorySchemeCatalog, InMemoryProfileStore>;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Profile JSON file
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Scheme catalog JSON file (defaults to the bundled sample catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Evaluation instant for deadlines (RFC 3339 or YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = parse_now)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DeadlineArgs {
    /// Application deadline (RFC 3339 or YYYY-MM-DD)
    pub(crate) value: String,
    /// Evaluation instant (defaults to now)
    #[arg(long, value_parser = parse_now)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation instant for deadlines (defaults to now)
    #[arg(long, value_parser = parse_now)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Show the per-criterion audit trail for every scheme
    #[arg(long)]
    pub(crate) show_criteria: bool,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        profile,
        catalog,
        now,
        json,
    } = args;

    let profile: Profile = serde_json::from_reader(std::fs::File::open(profile)?)?;
    let schemes = match catalog {
        Some(path) => SchemeCatalogFile::from_path(path)?,
        None => sample_schemes()?,
    };
    let now = now.unwrap_or_else(Utc::now);

    let service = local_service(schemes)?;
    let report = service.match_profile(&profile, now)?;

    if json {
        println!("{}", render_match_json(&report)?);
    } else {
        render_match_report(&report, now, false);
    }

    Ok(())
}

pub(crate) fn run_deadline(args: DeadlineArgs) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(Utc::now);
    let status = DeadlineStatus::assess(Some(&args.value), now)?;
    println!("{}", describe_deadline(&args.value, &status));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(Utc::now);
    let service = local_service(sample_schemes()?)?;

    println!("Scheme finder demo");
    let listing = service.search(&SchemeQuery::default())?;
    println!(
        "Catalog: {} open schemes across {} ministries",
        listing.total,
        listing.ministries.len()
    );

    let user = UserId("demo-citizen".to_string());
    let profile = demo_profile();
    println!(
        "Profile: {}, {} years, {}, {} category, {}, annual income {}",
        profile.full_name.as_deref().unwrap_or("Anonymous"),
        profile.age.map_or_else(|| "?".to_string(), |age| age.to_string()),
        profile.gender.map_or("unspecified", Gender::as_str),
        profile.category.label(),
        profile.state.as_deref().unwrap_or("unknown state"),
        profile
            .annual_income
            .map_or_else(|| "not declared".to_string(), |income| format!("₹{income:.0}")),
    );

    service.save_profile(user.clone(), profile)?;
    let report = service.match_user(&user, now)?;
    render_match_report(&report, now, args.show_criteria);

    Ok(())
}

fn render_match_json(report: &MatchReport) -> Result<String, AppError> {
    serde_json::to_string_pretty(report).map_err(AppError::Render)
}

fn local_service(schemes: Vec<Scheme>) -> Result<LocalService, AppError> {
    let catalog = InMemorySchemeCatalog::seeded(schemes).map_err(EligibilityServiceError::from)?;
    Ok(EligibilityService::new(
        Arc::new(catalog),
        Arc::new(InMemoryProfileStore::default()),
    ))
}

fn demo_profile() -> Profile {
    Profile {
        full_name: Some("Lakshmi Nair".to_string()),
        age: Some(27),
        gender: Some(Gender::Female),
        category: Category::Obc,
        occupation: Some(Occupation::SelfEmployed),
        annual_income: Some(180000.0),
        state: Some("Kerala".to_string()),
        district: Some("Thrissur".to_string()),
        ..Profile::default()
    }
}

fn describe_deadline(value: &str, status: &DeadlineStatus) -> String {
    match status.days_remaining {
        Some(days) if days < 0 => format!(
            "{value}: closed {} day(s) ago ({})",
            -days, status.status_label
        ),
        Some(days) => format!(
            "{value}: {days} day(s) remaining ({})",
            status.status_label
        ),
        None => format!("{value}: {}", status.status_label),
    }
}

pub(crate) fn render_match_report(report: &MatchReport, now: DateTime<Utc>, show_criteria: bool) {
    println!(
        "\nEvaluated {} schemes (deadlines as of {})",
        report.summary.evaluated,
        now.format("%Y-%m-%d %H:%M UTC")
    );
    if report.summary.profile_incomplete {
        println!("Profile incomplete: add age, gender and occupation for sharper matches");
    }

    for entry in &report.matches {
        let scheme = &entry.eligibility.scheme;
        println!(
            "\n[{}] {} ({}% match)",
            entry.status_label, scheme.name, entry.eligibility.confidence_score
        );
        println!("  {}", scheme.ministry);
        println!("  Deadline: {}", describe_deadline_short(&entry.deadline));

        for reason in &entry.eligibility.reasons {
            println!("  + {reason}");
        }
        for gap in &entry.eligibility.missing_criteria {
            println!("  - {gap}");
        }

        if show_criteria {
            for outcome in &entry.eligibility.criteria {
                let mark = if outcome.satisfied { "met" } else { "unmet" };
                println!("    {} [{}]", outcome.criterion.label(), mark);
            }
        }
    }

    println!(
        "\nSummary: {} eligible, {} partially eligible",
        report.summary.eligible.len(),
        report.summary.partially_eligible.len()
    );
    if report.summary.closing_soon.is_empty() {
        println!("Closing soon: none");
    } else {
        println!("Closing soon");
        for entry in &report.summary.closing_soon {
            println!("- {} ({} day(s) left)", entry.name, entry.days_remaining);
        }
    }
}

fn describe_deadline_short(status: &DeadlineStatus) -> String {
    match status.days_remaining {
        Some(days) if days >= 0 => format!("{} ({days} day(s) left)", status.status_label),
        _ => status.status_label.to_string(),
    }
}
