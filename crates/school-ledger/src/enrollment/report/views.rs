use super::super::domain::{LicenseClass, SchoolId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportColumn {
    pub category: LicenseClass,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    pub category: LicenseClass,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub school_id: SchoolId,
    pub school_name: String,
    pub classes: Vec<ClassCount>,
    pub total_candidates: u64,
    pub total_fee: u64,
    pub total_fee_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFooter {
    pub label: &'static str,
    pub classes: Vec<ClassCount>,
    pub total_candidates: u64,
    pub total_fee: u64,
    pub total_fee_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub title: &'static str,
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<ReportRow>,
    pub footer: ReportFooter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub category: LicenseClass,
    pub label: &'static str,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub title: &'static str,
    pub series_label: &'static str,
    pub school_id: SchoolId,
    pub points: Vec<ChartPoint>,
}
