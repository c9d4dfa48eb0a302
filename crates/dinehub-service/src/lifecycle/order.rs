//! Order lifecycle: placement and kitchen-flow transitions.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use validator::Validate;

use dinehub_core::error::AppError;
use dinehub_entity::{CreateOrder, Order, OrderStatus};
use dinehub_store::RecordStore;

/// Applies order status transitions.
#[derive(Clone)]
pub struct OrderLifecycle {
    /// Backing record store.
    store: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for OrderLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderLifecycle").finish()
    }
}

impl OrderLifecycle {
    /// Creates a new order lifecycle service.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validates and stores a new pending order.
    pub async fn place_order(&self, request: CreateOrder) -> Result<Order, AppError> {
        request.validate()?;

        let order = self.store.create_order(request).await?;

        info!(
            order_id = %order.id,
            order_code = %order.order_code,
            table = order.table_number,
            total = order.total(),
            "Order placed"
        );

        Ok(order)
    }

    /// Moves an order to `target`.
    ///
    /// Forward moves go one step at a time through
    /// `pending -> confirmed -> preparing -> completed`. Any non-terminal
    /// order may be cancelled. The write is conditional on the status read
    /// here, so a concurrent change to the same order fails with `Conflict`.
    pub async fn transition_order(&self, id: &str, target: OrderStatus) -> Result<Order, AppError> {
        let current = self
            .store
            .get_order(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;

        if let Err(e) = current.status.ensure_transition(target) {
            debug!(order_id = %id, from = %current.status, to = %target, "Rejected transition");
            return Err(e);
        }

        let updated = self
            .store
            .update_order_status(id, current.status, target, Utc::now())
            .await?;

        info!(
            order_id = %id,
            order_code = %updated.order_code,
            from = %current.status,
            to = %updated.status,
            "Order status changed"
        );

        Ok(updated)
    }
}
