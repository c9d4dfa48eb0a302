//! Sales report generation service.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use dinehub_core::error::AppError;
use dinehub_core::types::TimeRange;
use dinehub_entity::{Order, OrderStatus, SalesReport};
use dinehub_store::{OrderQuery, RecordStore};

/// Generates order and revenue summaries.
#[derive(Clone)]
pub struct SalesReportService {
    /// Backing record store.
    store: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for SalesReportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesReportService").finish()
    }
}

impl SalesReportService {
    /// Creates a new sales report service.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Summarises orders created inside `range`, including archived ones.
    ///
    /// Both bounds must be set. The report is not persisted.
    pub async fn generate(&self, range: TimeRange) -> Result<SalesReport, AppError> {
        let (Some(period_start), Some(period_end)) = (range.from, range.until) else {
            return Err(AppError::validation("Report range needs both bounds"));
        };
        if period_start >= period_end {
            return Err(AppError::validation("Report range is empty"));
        }

        let live = self
            .store
            .list_orders(&OrderQuery::all().created_in(range))
            .await?;
        let archived = self.store.list_archived_orders(&range).await?;

        let mut orders_by_status: BTreeMap<String, u64> = OrderStatus::ALL
            .iter()
            .map(|status| (status.as_str().to_string(), 0))
            .collect();
        let mut completed_revenue = 0;

        for order in live.iter().chain(archived.iter().map(|a| &a.order)) {
            tally(order, &mut orders_by_status, &mut completed_revenue);
        }

        Ok(SalesReport {
            id: String::new(),
            period_start,
            period_end,
            orders_by_status,
            completed_revenue,
            archived_orders_included: archived.len() as u64,
            generated_at: Utc::now(),
        })
    }

    /// Generates and stores the report for one UTC day.
    pub async fn generate_daily(&self, date: NaiveDate) -> Result<SalesReport, AppError> {
        let report = self.generate(TimeRange::day(date)).await?;
        let saved = self.store.save_report(report).await?;

        info!(
            report_id = %saved.id,
            %date,
            orders = saved.order_count(),
            revenue = saved.completed_revenue,
            "Daily sales report saved"
        );

        Ok(saved)
    }
}

fn tally(order: &Order, by_status: &mut BTreeMap<String, u64>, revenue: &mut i64) {
    *by_status.entry(order.status.as_str().to_string()).or_insert(0) += 1;
    if order.status == OrderStatus::Completed {
        *revenue += order.total();
    }
}
