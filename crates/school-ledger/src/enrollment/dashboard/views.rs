use super::super::domain::{LicenseClass, SchoolId};
use super::super::report::views::{ChartSeries, ReportTable};
use serde::{Deserialize, Serialize};

/// Show/hide state of the dashboard panels. Pure UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelVisibility {
    #[serde(default)]
    pub candidate_form: bool,
    #[serde(default)]
    pub analytics: bool,
    #[serde(default = "default_report_expanded")]
    pub report: bool,
}

fn default_report_expanded() -> bool {
    true
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            candidate_form: false,
            analytics: false,
            report: default_report_expanded(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolTotals {
    pub total_candidates: u64,
    pub total_fee: u64,
    pub total_fee_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateEntry {
    pub category: LicenseClass,
    pub label: &'static str,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub school_id: SchoolId,
    pub school_name: String,
    pub welcome: String,
    pub totals: SchoolTotals,
    pub panels: PanelVisibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_form: Option<Vec<CandidateEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportTable>,
}

/// Result of a single candidate-count change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationView {
    pub school_id: SchoolId,
    pub category: LicenseClass,
    pub count: u64,
    pub totals: SchoolTotals,
}
