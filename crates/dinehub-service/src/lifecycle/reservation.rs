//! Reservation lifecycle: booking and confirm/cancel transitions.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use validator::Validate;

use dinehub_core::error::AppError;
use dinehub_entity::{CreateReservation, ReservationStatus, TableReservation};
use dinehub_store::RecordStore;

/// Applies reservation status transitions.
#[derive(Clone)]
pub struct ReservationLifecycle {
    /// Backing record store.
    store: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for ReservationLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationLifecycle").finish()
    }
}

impl ReservationLifecycle {
    /// Creates a new reservation lifecycle service.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validates and stores a new pending reservation.
    pub async fn book_reservation(
        &self,
        request: CreateReservation,
    ) -> Result<TableReservation, AppError> {
        request.validate()?;

        let reservation = self.store.create_reservation(request).await?;

        info!(
            reservation_id = %reservation.id,
            guests = reservation.number_of_guests,
            date = %reservation.reservation_date,
            "Reservation booked"
        );

        Ok(reservation)
    }

    /// Moves a reservation to `target`.
    ///
    /// Only `pending -> confirmed` and `pending -> cancelled` are accepted.
    /// An illegal transition fails with `InvalidTransition` before anything
    /// is written.
    pub async fn transition_reservation(
        &self,
        id: &str,
        target: ReservationStatus,
    ) -> Result<TableReservation, AppError> {
        let current = self
            .store
            .get_reservation(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;

        if let Err(e) = current.status.ensure_transition(target) {
            debug!(reservation_id = %id, from = %current.status, to = %target, "Rejected transition");
            return Err(e);
        }

        let updated = self
            .store
            .update_reservation_status(id, current.status, target, Utc::now())
            .await?;

        info!(
            reservation_id = %id,
            from = %current.status,
            to = %updated.status,
            "Reservation status changed"
        );

        Ok(updated)
    }
}
