//! Built-in job handler implementations.

pub mod report;
pub mod retention;

pub use report::ReportJobHandler;
pub use retention::RetentionJobHandler;

/// Job type of the retention sweep.
pub const RETENTION_SWEEP: &str = "retention_sweep";
/// Job type of the daily sales report.
pub const DAILY_SALES_REPORT: &str = "daily_sales_report";
