//! Reservation and order status state machines.
//!
//! Transition rules live on the status enums in `dinehub-entity`; the
//! services here load the record, check the rule, and apply exactly one
//! conditional write through the store.

pub mod order;
pub mod reservation;

pub use order::OrderLifecycle;
pub use reservation::ReservationLifecycle;
