use super::super::aggregate::Aggregator;
use super::super::domain::{LicenseClass, SchoolRecord};
use super::super::fees::format_amount;
use super::views::{ClassCount, ReportColumn, ReportFooter, ReportRow, ReportTable};

const REPORT_TITLE: &str = "Detaylı Sürücü Kursları Raporu";
const FOOTER_LABEL: &str = "Toplam";

/// Tabulate every school in input order with a grand-total footer.
pub fn build_report(aggregator: &Aggregator, schools: &[SchoolRecord]) -> ReportTable {
    let columns = LicenseClass::ordered()
        .into_iter()
        .map(|category| ReportColumn {
            category,
            label: category.label(),
        })
        .collect();

    let rows = schools
        .iter()
        .map(|school| {
            let total_fee = aggregator.total_fee(&school.candidates);
            ReportRow {
                school_id: school.id.clone(),
                school_name: school.name.clone(),
                classes: class_counts(aggregator.class_distribution(&school.candidates)),
                total_candidates: aggregator.total_candidates(&school.candidates),
                total_fee,
                total_fee_display: format_amount(total_fee),
            }
        })
        .collect();

    let aggregate = aggregator.aggregate_across(schools.iter().map(|school| &school.candidates));
    let footer = ReportFooter {
        label: FOOTER_LABEL,
        classes: class_counts(aggregate.per_class_totals),
        total_candidates: aggregate.total_candidates,
        total_fee: aggregate.total_fee,
        total_fee_display: format_amount(aggregate.total_fee),
    };

    ReportTable {
        title: REPORT_TITLE,
        columns,
        rows,
        footer,
    }
}

fn class_counts<I>(distribution: I) -> Vec<ClassCount>
where
    I: IntoIterator<Item = (LicenseClass, u64)>,
{
    distribution
        .into_iter()
        .map(|(category, count)| ClassCount { category, count })
        .collect()
}
