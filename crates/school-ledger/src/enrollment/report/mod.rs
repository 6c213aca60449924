mod chart;
mod table;
pub mod views;

pub use chart::distribution_series;
pub use table::build_report;
