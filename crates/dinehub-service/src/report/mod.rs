//! Sales summaries over live and archived orders.

pub mod sales;

pub use sales::SalesReportService;
