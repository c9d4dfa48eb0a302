//! Sales report entity model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sales summary over a period, stored in the reports collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    /// Store-assigned identifier (empty until saved).
    #[serde(default)]
    pub id: String,
    /// Period start (inclusive).
    pub period_start: DateTime<Utc>,
    /// Period end (exclusive).
    pub period_end: DateTime<Utc>,
    /// Number of orders per status, keyed by status string.
    pub orders_by_status: BTreeMap<String, u64>,
    /// Sum of completed order totals in minor currency units.
    pub completed_revenue: i64,
    /// How many of the counted orders came from the archive.
    pub archived_orders_included: u64,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

impl SalesReport {
    /// Total number of orders counted.
    pub fn order_count(&self) -> u64 {
        self.orders_by_status.values().sum()
    }
}
