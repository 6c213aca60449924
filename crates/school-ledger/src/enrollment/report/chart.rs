use super::super::aggregate::Aggregator;
use super::super::domain::SchoolRecord;
use super::views::{ChartPoint, ChartSeries};

const CHART_TITLE: &str = "Sınıflara Göre Kursiyer Dağılımı";
const SERIES_LABEL: &str = "Kursiyer Sayısı";

/// Per-class distribution for one school; no cross-school aggregation.
pub fn distribution_series(aggregator: &Aggregator, school: &SchoolRecord) -> ChartSeries {
    let points = aggregator
        .class_distribution(&school.candidates)
        .into_iter()
        .map(|(category, count)| ChartPoint {
            category,
            label: category.label(),
            count,
        })
        .collect();

    ChartSeries {
        title: CHART_TITLE,
        series_label: SERIES_LABEL,
        school_id: school.id.clone(),
        points,
    }
}
