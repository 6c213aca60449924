use std::sync::Arc;

use tracing::{debug, warn};

use super::super::aggregate::Aggregator;
use super::super::domain::{LedgerError, LicenseClass, SchoolId, SchoolRecord};
use super::super::fees::{format_amount, FeeSchedule};
use super::super::report::{build_report, distribution_series};
use super::store::{SchoolStore, StoreError};
use super::views::{CandidateEntry, DashboardView, MutationView, PanelVisibility, SchoolTotals};

/// Controller for the active school's dashboard.
///
/// Mutations land on the local ledger first and are then relayed to the store,
/// so totals always reflect the latest change even when the relay fails.
pub struct DashboardController<S> {
    store: Arc<S>,
    aggregator: Aggregator,
    school: SchoolRecord,
    panels: PanelVisibility,
}

impl<S> DashboardController<S>
where
    S: SchoolStore + 'static,
{
    pub fn new(store: Arc<S>, fees: Arc<FeeSchedule>, school: SchoolRecord) -> Self {
        Self {
            store,
            aggregator: Aggregator::new(fees),
            school,
            panels: PanelVisibility::default(),
        }
    }

    /// Load the active school from the store.
    pub fn open(
        store: Arc<S>,
        fees: Arc<FeeSchedule>,
        school_id: &SchoolId,
    ) -> Result<Self, DashboardError> {
        let school = store
            .fetch(school_id)?
            .ok_or_else(|| StoreError::NotFound(school_id.clone()))?;
        Ok(Self::new(store, fees, school))
    }

    pub fn school(&self) -> &SchoolRecord {
        &self.school
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn panels(&self) -> PanelVisibility {
        self.panels
    }

    pub fn with_panels(mut self, panels: PanelVisibility) -> Self {
        self.panels = panels;
        self
    }

    pub fn increase(&mut self, class: LicenseClass) -> Result<u64, DashboardError> {
        self.adjust(class, 1)
    }

    pub fn decrease(&mut self, class: LicenseClass) -> Result<u64, DashboardError> {
        self.adjust(class, -1)
    }

    /// Adjust a class count and relay the full ledger to the store.
    pub fn adjust(&mut self, class: LicenseClass, delta: i64) -> Result<u64, DashboardError> {
        let count = self.school.candidates.adjust(class, delta);
        debug!(school = %self.school.id, %class, delta, count, "candidate count adjusted");

        if let Err(err) = self
            .store
            .persist_ledger(&self.school.id, self.school.candidates.snapshot())
        {
            warn!(school = %self.school.id, error = %err, "failed to relay ledger to store");
            return Err(err.into());
        }

        Ok(count)
    }

    /// Adjust by wire code, surfacing unknown categories.
    pub fn adjust_code(&mut self, code: &str, delta: i64) -> Result<MutationView, DashboardError> {
        let class = LicenseClass::from_code(code)?;
        let count = self.adjust(class, delta)?;
        Ok(MutationView {
            school_id: self.school.id.clone(),
            category: class,
            count,
            totals: self.totals(),
        })
    }

    pub fn totals(&self) -> SchoolTotals {
        let total_fee = self.aggregator.total_fee(&self.school.candidates);
        SchoolTotals {
            total_candidates: self.aggregator.total_candidates(&self.school.candidates),
            total_fee,
            total_fee_display: format_amount(total_fee),
        }
    }

    pub fn toggle_candidate_form(&mut self) -> bool {
        self.panels.candidate_form = !self.panels.candidate_form;
        self.panels.candidate_form
    }

    pub fn toggle_analytics(&mut self) -> bool {
        self.panels.analytics = !self.panels.analytics;
        self.panels.analytics
    }

    pub fn toggle_report(&mut self) -> bool {
        self.panels.report = !self.panels.report;
        self.panels.report
    }

    /// Build the dashboard from the current ledger and the given collection.
    ///
    /// The active school's row in the report is taken from the local ledger.
    pub fn render(&self, schools: &[SchoolRecord]) -> DashboardView {
        let candidate_form = self.panels.candidate_form.then(|| {
            LicenseClass::ordered()
                .into_iter()
                .map(|category| CandidateEntry {
                    category,
                    label: category.label(),
                    count: self.school.candidates.read(category),
                })
                .collect()
        });

        let analytics = self
            .panels
            .analytics
            .then(|| distribution_series(&self.aggregator, &self.school));

        let report = self.panels.report.then(|| {
            let schools: Vec<SchoolRecord> = schools
                .iter()
                .map(|school| {
                    if school.id == self.school.id {
                        self.school.clone()
                    } else {
                        school.clone()
                    }
                })
                .collect();
            build_report(&self.aggregator, &schools)
        });

        DashboardView {
            school_id: self.school.id.clone(),
            school_name: self.school.name.clone(),
            welcome: format!("Hoş Geldiniz, {}!", self.school.name),
            totals: self.totals(),
            panels: self.panels,
            candidate_form,
            analytics,
            report,
        }
    }

    /// Render against the store's current collection.
    pub fn render_from_store(&self) -> Result<DashboardView, DashboardError> {
        let schools = self.store.schools()?;
        Ok(self.render(&schools))
    }
}

/// Error raised by the dashboard controller.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
