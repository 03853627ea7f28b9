use crate::infra::{load_catalog, InMemoryWeighRepository};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tow_compliance::config::AppConfig;
use tow_compliance::error::AppError;
use tow_compliance::workflows::weigh::{
    ComplianceRow, ComplianceStatus, GcmPolicy, WeighOutcome, WeighService, WeighSubmission,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct EvaluateArgs {
    /// Path to a weigh submission in JSON
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Vehicle capacity CSV used to resolve `vehicle_ref` (defaults to APP_CAPACITY_CATALOG)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the full outcome as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog_path = args.catalog.or(config.catalog.path);
    let catalog = load_catalog(catalog_path.as_deref())?;

    let raw = std::fs::read_to_string(&args.input)?;
    let submission: WeighSubmission = serde_json::from_str(&raw)?;

    let service = WeighService::new(
        Arc::new(InMemoryWeighRepository::default()),
        Arc::new(catalog),
        config.engine,
    );
    let outcome = service.evaluate(&submission)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        let policy = service.engine().config().gcm_policy;
        print!("{}", render_report(&submission, &outcome, policy));
    }

    Ok(())
}

pub(crate) fn render_report(
    submission: &WeighSubmission,
    outcome: &WeighOutcome,
    gcm_policy: GcmPolicy,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} / {}",
        submission.input.scenario.label(),
        submission.input.method.label()
    );
    let _ = writeln!(out, "Verdict: {}", outcome.result.verdict_label());
    let _ = writeln!(out, "GCM from: {}", gcm_policy.label());

    let _ = writeln!(out, "\nCompliance");
    for row in &outcome.result.rows {
        let _ = writeln!(out, "  {}", render_row(row));
    }

    if !outcome.result.advisories.is_empty() {
        let _ = writeln!(out, "\nTowing ratios");
        for ratio in &outcome.result.advisories {
            let value = ratio
                .value
                .map(|percent| format!("{percent:.1}%"))
                .unwrap_or_else(|| "N/A".to_string());
            let flag = match ratio.within_ideal_range {
                Some(true) => "within ideal range",
                Some(false) => "outside ideal range",
                None => "not available",
            };
            let _ = writeln!(
                out,
                "  {:<28} {:>8}  ideal {} ({})",
                ratio.name.label(),
                value,
                ratio.ideal_range_description,
                flag
            );
        }
    }

    out
}

fn render_row(row: &ComplianceRow) -> String {
    let label = row.metric.label();
    match row.status {
        ComplianceStatus::NotApplicable | ComplianceStatus::NotComplete => {
            format!("{label:<24} {:>12}", row.status.label())
        }
        ComplianceStatus::Ok | ComplianceStatus::Over => {
            let limit = row.limit.unwrap_or_default();
            let difference = row.difference.unwrap_or_default();
            format!(
                "{label:<24} {:>7.0} kg / {} {:.0} kg ({:+.0} kg) {}",
                row.measured,
                row.metric.rating_label(),
                limit,
                difference,
                row.status.label()
            )
        }
    }
}
