//! Totals derived from ledgers.
//!
//! Nothing here is cached: each call recomputes from the ledgers it is given,
//! so a total can never lag behind the ledger it was computed from.

use serde::Serialize;
use std::sync::Arc;

use super::domain::LicenseClass;
use super::fees::FeeSchedule;
use super::ledger::{Ledger, LedgerSnapshot};

/// Summary over one or more ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedAggregate {
    pub total_candidates: u64,
    pub total_fee: u64,
    pub per_class_totals: LedgerSnapshot,
}

impl DerivedAggregate {
    pub fn empty() -> Self {
        Self {
            total_candidates: 0,
            total_fee: 0,
            per_class_totals: Ledger::new().snapshot(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    fees: Arc<FeeSchedule>,
}

impl Aggregator {
    pub fn new(fees: Arc<FeeSchedule>) -> Self {
        Self { fees }
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    // Counts are unbounded, so every sum below saturates at u64::MAX.
    pub fn total_candidates(&self, ledger: &Ledger) -> u64 {
        LicenseClass::ordered()
            .into_iter()
            .map(|class| ledger.read(class))
            .fold(0, u64::saturating_add)
    }

    pub fn total_fee(&self, ledger: &Ledger) -> u64 {
        LicenseClass::ordered()
            .into_iter()
            .map(|class| ledger.read(class).saturating_mul(self.fees.fee_of(class)))
            .fold(0, u64::saturating_add)
    }

    pub fn class_distribution(&self, ledger: &Ledger) -> Vec<(LicenseClass, u64)> {
        LicenseClass::ordered()
            .into_iter()
            .map(|class| (class, ledger.read(class)))
            .collect()
    }

    pub fn aggregate_across<'a, I>(&self, ledgers: I) -> DerivedAggregate
    where
        I: IntoIterator<Item = &'a Ledger>,
    {
        ledgers
            .into_iter()
            .fold(DerivedAggregate::empty(), |mut aggregate, ledger| {
                aggregate.total_candidates = aggregate
                    .total_candidates
                    .saturating_add(self.total_candidates(ledger));
                aggregate.total_fee = aggregate.total_fee.saturating_add(self.total_fee(ledger));
                for (class, total) in aggregate.per_class_totals.iter_mut() {
                    *total = total.saturating_add(ledger.read(*class));
                }
                aggregate
            })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(Arc::new(FeeSchedule::standard()))
    }
}
