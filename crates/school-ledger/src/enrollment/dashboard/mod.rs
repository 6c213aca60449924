//! Active-school dashboard: candidate mutations, running totals, panels, and
//! the HTTP endpoints that drive them.

pub mod controller;
pub mod router;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use controller::{DashboardController, DashboardError};
pub use router::{dashboard_router, CandidateChange, DashboardState};
pub use store::{SchoolStore, StoreError};
pub use views::{CandidateEntry, DashboardView, MutationView, PanelVisibility, SchoolTotals};
