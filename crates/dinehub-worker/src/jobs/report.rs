//! Daily sales report job handler.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing;

use dinehub_service::SalesReportService;

use super::DAILY_SALES_REPORT;
use crate::executor::{JobExecutionError, JobHandler};

/// Optional job payload
#[derive(Debug, Default, Deserialize)]
struct ReportPayload {
    /// Day to summarise; yesterday (UTC) when absent
    #[serde(default)]
    date: Option<NaiveDate>,
}

/// Handles daily sales report generation
#[derive(Debug, Clone)]
pub struct ReportJobHandler {
    /// Report service
    service: SalesReportService,
}

impl ReportJobHandler {
    /// Create a new report job handler
    pub fn new(service: SalesReportService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl JobHandler for ReportJobHandler {
    fn job_type(&self) -> &str {
        DAILY_SALES_REPORT
    }

    async fn execute(&self, payload: &Value) -> Result<Option<Value>, JobExecutionError> {
        let payload: ReportPayload = if payload.is_null() {
            ReportPayload::default()
        } else {
            serde_json::from_value(payload.clone())
                .map_err(|e| JobExecutionError::Permanent(format!("Invalid report payload: {e}")))?
        };

        let date = match payload.date {
            Some(date) => date,
            None => Utc::now()
                .date_naive()
                .checked_sub_days(Days::new(1))
                .ok_or_else(|| JobExecutionError::Permanent("Date out of range".to_string()))?,
        };

        tracing::info!(%date, "Generating daily sales report");

        let report = self
            .service
            .generate_daily(date)
            .await
            .map_err(|e| JobExecutionError::from_app_error("Daily sales report failed", e))?;

        Ok(Some(serde_json::json!({
            "task": DAILY_SALES_REPORT,
            "report_id": report.id,
            "date": date,
            "orders": report.order_count(),
            "completed_revenue": report.completed_revenue,
        })))
    }
}
