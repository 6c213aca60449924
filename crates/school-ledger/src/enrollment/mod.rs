//! Candidate ledgers per driving school and the totals derived from them.

pub mod aggregate;
pub mod dashboard;
pub mod domain;
pub mod fees;
pub mod import;
pub mod ledger;
pub mod report;

pub use aggregate::{Aggregator, DerivedAggregate};
pub use domain::{LedgerError, LicenseClass, SchoolId, SchoolRecord};
pub use fees::{format_amount, FeeEntry, FeeSchedule};
pub use ledger::{Ledger, LedgerSnapshot};
