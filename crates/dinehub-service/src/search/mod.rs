//! In-memory reservation search and status filtering.

pub mod reservation;

pub use reservation::{ReservationSearch, StatusFilter, filter_reservations};
