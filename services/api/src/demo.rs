use crate::infra::{demo_schools, InMemorySchoolStore};
use clap::Args;
use school_ledger::enrollment::dashboard::{DashboardController, DashboardView, SchoolStore};
use school_ledger::enrollment::import::{read_fee_schedule_from_path, read_schools_from_path};
use school_ledger::enrollment::report::build_report;
use school_ledger::enrollment::report::views::ReportTable;
use school_ledger::enrollment::{Aggregator, FeeSchedule, LicenseClass, SchoolId};
use school_ledger::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// CSV of schools (`id,name,B,A1,...`). Defaults to the demo schools.
    #[arg(long)]
    pub(crate) schools_csv: Option<PathBuf>,
    /// CSV fee table (`category,fee`). Defaults to the standard table.
    #[arg(long)]
    pub(crate) fees_csv: Option<PathBuf>,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// School to open the dashboard for
    #[arg(long, default_value = "yildiz")]
    pub(crate) school: String,
    /// License class to enroll candidates under
    #[arg(long, default_value = "B", value_parser = parse_class)]
    pub(crate) class: LicenseClass,
    /// Number of candidates to add before withdrawing one
    #[arg(long, default_value_t = 2)]
    pub(crate) enroll: u32,
}

fn parse_class(raw: &str) -> Result<LicenseClass, String> {
    raw.parse::<LicenseClass>().map_err(|err| err.to_string())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        schools_csv,
        fees_csv,
        json,
    } = args;

    let schools = match schools_csv {
        Some(path) => read_schools_from_path(path)?,
        None => demo_schools(),
    };
    let fees = match fees_csv {
        Some(path) => read_fee_schedule_from_path(path)?,
        None => FeeSchedule::standard(),
    };

    let report = build_report(&Aggregator::new(Arc::new(fees)), &schools);
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Report payload unavailable: {err}"),
        }
    } else {
        render_report(&report);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        school,
        class,
        enroll,
    } = args;

    let store = Arc::new(InMemorySchoolStore::with_schools(demo_schools()));
    let fees = Arc::new(FeeSchedule::standard());
    let mut controller = DashboardController::open(store.clone(), fees, &SchoolId(school))?;

    println!("Driving school dashboard demo");
    render_dashboard(&controller.render_from_store()?);

    println!("\nEnrolling {enroll} candidate(s) under {}", class.label());
    for _ in 0..enroll {
        let count = controller.increase(class)?;
        let totals = controller.totals();
        println!(
            "- {} -> {} | total {} candidates, {}",
            class.code(),
            count,
            totals.total_candidates,
            totals.total_fee_display
        );
    }

    let count = controller.decrease(class)?;
    println!("Withdrew one candidate from {} -> {}", class.code(), count);

    controller.toggle_candidate_form();
    controller.toggle_analytics();
    println!();
    render_dashboard(&controller.render(&store.schools()?));

    Ok(())
}

pub(crate) fn render_dashboard(view: &DashboardView) {
    println!("{}", view.welcome);
    println!(
        "Toplam Kursiyer: {} | Toplam Ücret: {}",
        view.totals.total_candidates, view.totals.total_fee_display
    );

    if let Some(entries) = &view.candidate_form {
        println!("\nKursiyer girişi");
        for entry in entries {
            println!("- {}: {}", entry.label, entry.count);
        }
    }

    if let Some(chart) = &view.analytics {
        println!("\n{}", chart.title);
        for point in &chart.points {
            println!("- {:<12} {}", point.label, distribution_bar(point.count));
        }
    }

    if let Some(report) = &view.report {
        println!();
        render_report(report);
    }
}

const MAX_BAR_WIDTH: u64 = 40;

/// Text bar for a class count; counts wider than the terminal print as numbers.
fn distribution_bar(count: u64) -> String {
    if count > MAX_BAR_WIDTH {
        format!("{} ({count})", "#".repeat(MAX_BAR_WIDTH as usize))
    } else {
        "#".repeat(count as usize)
    }
}

pub(crate) fn render_report(report: &ReportTable) {
    println!("{}", report.title);
    for row in &report.rows {
        let counts = row
            .classes
            .iter()
            .map(|cell| format!("{}={}", cell.category.code(), cell.count))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "- {}: {} | {} candidates | {}",
            row.school_name, counts, row.total_candidates, row.total_fee_display
        );
    }
    let footer_counts = report
        .footer
        .classes
        .iter()
        .map(|cell| format!("{}={}", cell.category.code(), cell.count))
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "{}: {} | {} candidates | {}",
        report.footer.label,
        footer_counts,
        report.footer.total_candidates,
        report.footer.total_fee_display
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_bar_caps_width() {
        assert_eq!(distribution_bar(0), "");
        assert_eq!(distribution_bar(3), "###");
        let capped = distribution_bar(u64::MAX);
        assert!(capped.starts_with(&"#".repeat(40)));
        assert!(capped.ends_with(&format!("({})", u64::MAX)));
        assert_eq!(capped.matches('#').count(), 40);
    }
}
