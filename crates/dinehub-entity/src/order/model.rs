//! Order entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::status::OrderStatus;

/// A single ordered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OrderItem {
    /// Menu item name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Number of portions.
    #[validate(range(min = 1))]
    pub quantity: u32,
    /// Price of one portion in minor currency units.
    #[validate(range(min = 0))]
    pub unit_price: i64,
}

impl OrderItem {
    /// Line total in minor currency units.
    pub fn line_total(&self) -> i64 {
        i64::from(self.quantity) * self.unit_price
    }
}

/// A table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier.
    pub id: String,
    /// Human-readable order code printed on tickets.
    pub order_code: String,
    /// Table document identifier.
    pub table_id: String,
    /// Table number shown to staff.
    pub table_number: u32,
    /// Customer name.
    pub customer_name: String,
    /// Ordered lines, in the order they were added.
    pub items: Vec<OrderItem>,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last changed.
    pub updated_at: DateTime<Utc>,
    /// Whether the order has been moved to the archive collection.
    #[serde(default)]
    pub archived: bool,
}

impl Order {
    /// Order total in minor currency units.
    pub fn total(&self) -> i64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Whether the order was created strictly before `cutoff`.
    pub fn created_before(&self, cutoff: DateTime<Utc>) -> bool {
        self.created_at < cutoff
    }
}

/// Data required to place a new order. New orders always start pending.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrder {
    /// Human-readable order code.
    #[validate(length(min = 1, max = 32))]
    pub order_code: String,
    /// Table document identifier.
    #[validate(length(min = 1))]
    pub table_id: String,
    /// Table number.
    pub table_number: u32,
    /// Customer name.
    #[validate(length(min = 1, max = 120))]
    pub customer_name: String,
    /// Ordered lines.
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItem>,
}

/// An order moved to the long-term archive collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedOrder {
    /// The order exactly as it was, with `archived` set.
    #[serde(flatten)]
    pub order: Order,
    /// When the order was archived.
    pub archived_at: DateTime<Utc>,
}

impl ArchivedOrder {
    /// Build the archive copy of a live order.
    pub fn from_order(order: &Order, archived_at: DateTime<Utc>) -> Self {
        Self {
            order: Order {
                archived: true,
                ..order.clone()
            },
            archived_at,
        }
    }
}
